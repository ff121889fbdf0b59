//! Application state for Ascend
//!
//! This crate holds the state owned by collaborators outside the navigation
//! core: the published authentication state and the per-screen data loading
//! state machine.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod load;

pub use auth::{AuthSnapshot, AuthStateProvider, AuthStore};
pub use load::{DataSource, LoadError, LoadState, ScreenLoader};
