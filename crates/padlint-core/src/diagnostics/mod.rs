//! Diagnostics produced by rules and their rendering
//!
//! - [`types`]: diagnostics, locations, suggestions and the source map
//! - [`renderer`]: human, compact, GitHub and JSON output

pub mod renderer;
pub mod types;

pub use renderer::{DiagnosticRenderer, OutputFormat};
pub use types::*;
