pub mod error;
pub mod types;

pub use error::{GorefError, Result};
pub use types::{Command, DebugInfo, ResolutionRequest, ResolutionResult, RESULT_KIND};
