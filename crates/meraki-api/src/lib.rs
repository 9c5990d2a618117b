// meraki-api: async client for the Meraki Dashboard API.
//
// Two surfaces over one retrying transport:
// - `rest`: direct path + params GETs with Link-header pagination
// - `sdk`:  an SDK-style client whose operations, constructor keywords,
//           and raw session shape are described by an `SdkManifest`

pub mod error;
pub mod pagination;
pub mod params;
pub mod rest;
pub mod sdk;
pub mod transport;

pub use error::Error;
pub use pagination::{CURSOR_PARAM, Page, PageBody, StopReason, Sweep, next_cursor, paginate};
pub use params::{Param, Params};
pub use rest::RestClient;
pub use sdk::{DashboardApi, RestSession, SdkManifest, SessionCall};
pub use transport::{
    API_KEY_HEADER, ApiResponse, DEFAULT_BASE_URL, RetryPolicy, Transport, TransportConfig,
};
