pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
