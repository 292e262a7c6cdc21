//! CLI command handlers. Each command is in its own file.

mod completions;
mod fetch;
mod mirrors;
mod resolve;
mod settings;
mod status;

pub use completions::{run_completions, run_man};
pub use fetch::run_fetch;
pub use mirrors::run_mirrors;
pub use resolve::run_resolve;
pub use settings::{run_set_enabled, run_set_mirror, run_toggle};
pub use status::run_status;
