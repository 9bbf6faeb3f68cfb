//! Type definitions for profile-stats

mod config;
mod error;
mod stats;

pub use config::*;
pub use error::*;
pub use stats::*;
