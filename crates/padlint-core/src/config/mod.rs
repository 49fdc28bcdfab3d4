//! Configuration system for padlint
//!
//! - JSON and JSONC configuration files, parsed with json5 (comments and
//!   trailing commas allowed)
//! - Auto-discovery by walking up from the start directory
//! - Per-rule severity overrides and options
//!
//! ## Configuration Files
//!
//! Searched in each directory, first match wins:
//! `.padlintrc.json`, `.padlintrc.jsonc`, `padlint.json`.
//!
//! ## Example Configuration
//!
//! ```jsonc
//! {
//!   "linter": {
//!     "enabled": true,
//!     "rules": {
//!       // "off" | "info" | "warn" | "error", or an object
//!       "layout/multiline-jsx-padding": "error"
//!     }
//!   },
//!   "files": {
//!     "include": ["src/**/*.tsx"],
//!     "exclude": ["**/node_modules/**", "**/*.generated.tsx"]
//!   }
//! }
//! ```

mod loader;
mod padlint_config;

pub use loader::{ConfigLoader, CONFIG_FILE_NAMES};
pub use padlint_config::{
    FilesConfiguration, LinterConfiguration, PadlintConfiguration, RuleConfig, RuleSetting,
    RuleSeverity,
};
