pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod mannequin;
pub mod reclaim;
pub mod utils;

pub use error::{Result, ReclaimError};
pub use config::Config;
