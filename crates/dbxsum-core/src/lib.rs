pub mod config;
pub mod logging;

pub mod content_hash;
pub mod download;
pub mod metadata;
pub mod progress;
pub mod remote_path;
pub mod transport;
pub mod verify;
