//! # GradeTrack Common Library
//!
//! Shared code for the GradeTrack service:
//! - Database pool setup and assessment queries
//! - The pure statistics engine (current standing, what-if projection,
//!   weight-sum validation)
//! - Configuration loading
//! - Error types

pub mod config;
pub mod db;
pub mod error;
pub mod stats;

pub use error::{Error, Result};
