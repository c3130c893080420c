pub mod config;
pub mod error;
pub mod run;
pub mod source;
pub mod steam_api;
pub mod storage;

pub use config::{RunMode, RunOptions};
pub use run::{run, RunSummary};
pub use source::StatSource;
pub use storage::FileStorage;
