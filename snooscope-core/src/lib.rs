pub mod error;
pub mod error_utils;
pub mod format;
pub mod types;

pub use error::*;
pub use error_utils::*;
pub use format::*;
pub use types::*;
