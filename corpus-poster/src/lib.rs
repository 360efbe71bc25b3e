pub mod cli;
pub mod gcs;
pub mod load_config;
pub mod status;

pub use cli::{run, Cli};
