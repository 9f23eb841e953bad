//! HTTP API handlers for gradetrack-ui

pub mod assessments;
pub mod buildinfo;
pub mod health;
pub mod stats;
pub mod ui;

pub use assessments::assessment_routes;
pub use buildinfo::buildinfo_routes;
pub use health::health_routes;
pub use stats::stats_routes;
pub use ui::ui_routes;
