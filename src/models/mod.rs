pub mod activity;
pub mod booking_detail;
pub mod bookings;
pub mod itinerary;
pub mod traveler;
