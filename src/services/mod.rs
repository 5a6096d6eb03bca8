mod http;
mod flashnet_client;
mod wallet_client;
pub mod session;
pub mod launch_service;
pub mod pool_service;
mod swap_service;
mod wallet_service;

pub use flashnet_client::FlashnetClient;
pub use wallet_client::WalletClient;
pub use session::{Session, SessionError};
pub use launch_service::LaunchService;
pub use pool_service::PoolService;
pub use swap_service::SwapService;
pub use wallet_service::WalletService;
