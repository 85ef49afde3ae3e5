//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod dashboard;
pub mod notice;
pub mod response;
pub mod settings;

pub use dashboard::*;
pub use notice::*;
pub use response::*;
pub use settings::*;
