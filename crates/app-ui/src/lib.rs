//! User interface layer for Ascend
//!
//! This crate provides the navigation core of the app and the descriptors of
//! the screens it can show.
//!
//! # Modules
//!
//! - [`navigation`] - Destinations, deep links, the navigation stack, view
//!   resolution and root flow selection
//! - [`screens`] - Application screens
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{deep_link, Destination, NavigationConfig, NavigationStack};
//!
//! let mut stack = NavigationStack::new(&NavigationConfig::default());
//! stack.push(Destination::Dashboard);
//!
//! if let Some(destination) = deep_link::parse("app://profile/u1") {
//!     stack.push(destination);
//! }
//! assert_eq!(stack.depth(), 2);
//! assert!(stack.can_go_back());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod screens;

// Re-export commonly used types
pub use navigation::{
    ConfigError, DeepLinkCodec, DeepLinkError, Destination, ExportFormat, FeatureArea,
    NavigationConfig, NavigationEvent, NavigationSnapshot, NavigationStack, NavigatorView,
    RootFlow, RootFlowSelector, ShareType, SharedNavigationStack, TelemetrySink, TracingSink,
    ViewHandle, ViewResolver, APP_NAME,
};

pub use screens::{AuthForm, LegalDocument, Screen, SubscriptionPage};
