// SDK-style surface: manifest-checked client over the shared transport.

pub mod client;
pub mod manifest;
pub mod operations;
pub mod session;

pub use client::{DashboardApi, TIMEOUT_KEYWORDS, TOTAL_PAGES};
pub use manifest::SdkManifest;
pub use operations::{CATALOGUE, OperationDef};
pub use session::{RestSession, SessionCall};
