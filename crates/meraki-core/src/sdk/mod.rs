// SDK backend: the version-tolerance shim and the provider built on it.

pub mod provider;
pub mod shim;

pub use provider::SdkProvider;
pub use shim::{Capabilities, Returns, SdkShim, SessionShape, ShimRequest};
