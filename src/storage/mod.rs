//! Storage Layer
//!
//! Handles local persistence: the JSON config file.

pub mod config;

pub use config::*;
