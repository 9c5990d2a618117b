//! Domain model and dual-backend data access for the Meraki dashboard.
//!
//! - **[`Dashboard`]**: facade over exactly one [`DashboardProvider`],
//!   chosen from [`BackendMode`] at construction.
//! - **[`RestProvider`]**: accessors over the direct HTTP client.
//! - **[`SdkProvider`]**: accessors over the SDK-style client, routed
//!   through the version-tolerance [`SdkShim`](sdk::SdkShim).
//! - **Domain model** ([`model`]): records both backends normalize into
//!   (see [`convert`]).

pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod rest;
pub mod sdk;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{BackendMode, DashboardConfig};
pub use dashboard::Dashboard;
pub use error::CoreError;
pub use provider::{
    ClientsQuery, DashboardProvider, NETWORK_CLIENTS_MAX_PAGES, PortWindow,
    SIGNAL_QUALITY_MAX_PAGES, SignalQualityQuery,
};
pub use rest::RestProvider;
pub use sdk::SdkProvider;

pub use model::{
    ConnectionType, Device, DeviceStatus, Network, NetworkClient, Organization, ProductType,
    SignalSample, SwitchPort, SwitchPorts,
};
