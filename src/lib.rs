//! Pair MVC controller actions with their view templates.
//!
//! Given a cursor position in `<root>/ctrls/<Type>.go`, find the action
//! method under the cursor and compute `<root>/web/templates/<Type>/<action>.html`,
//! or go the other way from a template back to its controller file.

pub mod config;
pub mod core;
pub mod output;
pub mod parser;
pub mod resolver;

use tracing::error;

use crate::config::Config;
use crate::core::{ResolutionRequest, ResolutionResult};
use crate::output::ResponseEnvelope;
use crate::resolver::Resolver;

/// Resolve a request into the record emitted on stdout.
///
/// A failed resolution still produces a record, with an empty `FilePath`
/// and the error text in `DebugInfo.error`.
pub fn run(request: ResolutionRequest, config: Config) -> ResponseEnvelope {
    let result = Resolver::new(config)
        .and_then(|mut resolver| resolver.resolve(&request))
        .unwrap_or_else(|e| {
            error!(
                "Failed to resolve {} for {}: {}",
                request.command,
                request.file_path.display(),
                e
            );
            ResolutionResult::failed(&e)
        });

    ResponseEnvelope::new(&request, result)
}
