pub mod backend_client;
pub mod booking_detail_transformer;
pub mod form_schedule_service;
pub mod itinerary_generation_service;
pub mod pricing_service;
