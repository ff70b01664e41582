pub mod capital;
pub mod error;
pub mod projection;
pub mod time_value;
pub mod types;

#[cfg(feature = "scenarios")]
pub mod scenarios;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::ValeriError;
pub use types::*;

/// Standard result type for all valeri operations
pub type ValeriResult<T> = Result<T, ValeriError>;
