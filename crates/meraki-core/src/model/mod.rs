// ── Unified domain model ──
//
// Canonical record shapes. Both backends normalize into these through
// `crate::convert`, so a record looks the same whichever client fetched it.

pub mod client;
pub mod device;
pub mod organization;

pub use client::{ConnectionType, NetworkClient, SignalSample};
pub use device::{Device, DeviceStatus, ProductType, SwitchPort, SwitchPorts};
pub use organization::{Network, Organization};
