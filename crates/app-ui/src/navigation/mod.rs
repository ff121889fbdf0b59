//! Navigation system for Ascend
//!
//! This module provides a type-safe navigation framework with:
//! - A closed catalog of destinations
//! - Deep link decoding and encoding
//! - Navigation stack and bounded history management
//! - Destination to screen resolution
//! - Root flow selection driven by the auth state

pub mod config;
pub mod deep_link;
pub mod destination;
pub mod resolver;
pub mod root_flow;
pub mod stack;
pub mod telemetry;

pub use config::{ConfigError, NavigationConfig};
pub use deep_link::{DeepLinkCodec, DeepLinkError};
pub use destination::{Destination, ExportFormat, FeatureArea, ShareType, APP_NAME};
pub use resolver::{ViewHandle, ViewResolver};
pub use root_flow::{RootFlow, RootFlowSelector};
pub use stack::{NavigationStack, NavigatorView, SharedNavigationStack};
pub use telemetry::{NavigationEvent, NavigationSnapshot, TelemetrySink, TracingSink};
