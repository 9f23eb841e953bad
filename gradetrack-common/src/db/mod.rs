//! Database pool, models, and queries

pub mod assessments;
pub mod init;
pub mod models;

pub use assessments::*;
pub use init::*;
pub use models::*;
