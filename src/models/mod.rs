//! Data models

pub mod analysis;
pub mod incident;
pub mod report;

pub use analysis::*;
pub use incident::*;
pub use report::*;
