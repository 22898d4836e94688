//! CLI command handlers, one file per command.

mod check_meta;
mod docs;
mod download;
mod hash;
mod verify;

pub use check_meta::run_check_meta;
pub use docs::{run_completions, run_man};
pub use download::{run_download, DownloadArgs};
pub use hash::run_hash;
pub use verify::run_verify;
