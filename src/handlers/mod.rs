pub mod health_handler;
pub mod launch_handlers;
pub mod pool_handlers;
pub mod wallet_handlers;

pub use health_handler::*;
