//! Commands
//!
//! Entry points called by the CLI. Each takes the shared [`AppState`] and
//! returns a [`CommandResponse`].
//!
//! [`AppState`]: crate::state::AppState
//! [`CommandResponse`]: crate::models::response::CommandResponse

pub mod health;
pub mod init;
pub mod insights;
pub mod notices;
pub mod scenarios;
pub mod selection;
pub mod settings;

pub use health::*;
pub use init::*;
pub use insights::*;
pub use notices::*;
pub use scenarios::*;
pub use selection::*;
pub use settings::*;
