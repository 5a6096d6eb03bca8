pub mod amount;
pub mod bonding_curve;
pub mod format;
pub mod pubkey;
pub mod slippage;
