pub mod config;
pub mod consts;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod traits;
pub mod utils;
