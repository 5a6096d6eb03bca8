pub mod error;
pub mod launch;
pub mod pool;
pub mod swap;
pub mod wallet;

pub use error::{ApiError, CurveError, ErrorResponse, QuoteError, VendorError};
pub use launch::*;
pub use pool::*;
pub use swap::*;
pub use wallet::*;
