// Raw request session exposed by the SDK-style client.
//
// Older builds take `get(url, params)`; newer ones take
// `get(metadata, url, params)` where metadata names the operation for the
// SDK's own logging. The accepted shape comes from the manifest.

use serde_json::Value;
use tracing::info;

use crate::error::Error;
use crate::transport::Transport;

const CALLABLE: &str = "RestSession.get";

/// One raw `get` invocation, in either calling convention.
#[derive(Debug, Clone, Copy)]
pub enum SessionCall<'a> {
    Plain {
        url: &'a str,
        params: &'a [(String, String)],
    },
    WithMetadata {
        metadata: &'a Value,
        url: &'a str,
        params: &'a [(String, String)],
    },
}

impl SessionCall<'_> {
    fn arity(&self) -> usize {
        match self {
            Self::Plain { .. } => 2,
            Self::WithMetadata { .. } => 3,
        }
    }
}

/// Raw GET access to any dashboard path.
///
/// Params are sent as given; callers pre-encode list keys (`name[]`).
#[derive(Debug, Clone)]
pub struct RestSession {
    transport: Transport,
    signature: Vec<String>,
    log_calls: bool,
}

impl RestSession {
    pub(crate) fn new(transport: Transport, signature: Vec<String>, log_calls: bool) -> Self {
        Self {
            transport,
            signature,
            log_calls,
        }
    }

    /// Parameter names of `get`, in order.
    pub fn signature(&self) -> &[String] {
        &self.signature
    }

    /// Issue a raw GET. Fails with `ArityMismatch` when the call shape does
    /// not match this build's signature.
    pub async fn get(&self, call: SessionCall<'_>) -> Result<Value, Error> {
        let expected = self.signature.len();
        let given = call.arity();
        if expected != given {
            return Err(Error::ArityMismatch {
                callable: CALLABLE.into(),
                expected,
                given,
            });
        }

        let (url, params) = match call {
            SessionCall::Plain { url, params } => (url, params),
            SessionCall::WithMetadata {
                metadata,
                url,
                params,
            } => {
                if self.log_calls {
                    let operation = metadata
                        .get("operation")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown");
                    info!(operation, "session GET {url}");
                }
                (url, params)
            }
        };

        Ok(self.transport.get(url, params).await?.body)
    }
}
