// ── SDK version-tolerance shim ──
//
// SDK releases drift: the constructor's timeout keyword changes name,
// generated operations come and go, `total_pages` is not accepted
// everywhere, and the raw session `get` takes either (url, params) or
// (metadata, url, params). The shim probes the client's manifest once,
// keeps what it found, and routes each request to whatever the build
// supports.

use std::collections::{BTreeMap, BTreeSet};

use meraki_api::sdk::operations;
use meraki_api::sdk::{DashboardApi, SdkManifest, SessionCall, TOTAL_PAGES};
use meraki_api::Params;
use secrecy::ExposeSecret;
use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::config::DashboardConfig;
use crate::error::CoreError;

/// Constructor timeout keywords, most preferred first.
const TIMEOUT_PREFERENCE: &[&str] = &["timeout", "request_timeout", "single_request_timeout"];

/// Optional constructor keywords passed only when the build accepts them.
const OPTIONAL_CONSTRUCTOR: &[&str] = &["base_url", "suppress_logging", "wait_on_rate_limit", "maximum_retries"];

/// Calling convention of the raw session `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionShape {
    /// `get(url, params)`
    Plain,
    /// `get(metadata, url, params)`
    WithMetadata,
}

impl SessionShape {
    fn from_signature(params: &[String]) -> Self {
        if params.len() >= 3 {
            Self::WithMetadata
        } else {
            Self::Plain
        }
    }
}

/// What one SDK build supports, as probed from its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub timeout_keyword: Option<&'static str>,
    pub constructor: BTreeSet<&'static str>,
    pub session: Option<SessionShape>,
    pub operations: BTreeMap<String, BTreeSet<String>>,
}

impl Capabilities {
    pub fn probe(manifest: &SdkManifest) -> Self {
        let timeout_keyword = TIMEOUT_PREFERENCE
            .iter()
            .copied()
            .find(|k| manifest.accepts_constructor(k));
        let constructor = OPTIONAL_CONSTRUCTOR
            .iter()
            .copied()
            .filter(|k| manifest.accepts_constructor(k))
            .collect();

        Self {
            timeout_keyword,
            constructor,
            session: manifest.session_get().map(SessionShape::from_signature),
            operations: manifest.operations.clone(),
        }
    }

    pub fn has_operation(&self, id: &str) -> bool {
        self.operations.contains_key(id)
    }

    pub fn accepts(&self, id: &str, keyword: &str) -> bool {
        self.operations
            .get(id)
            .is_some_and(|kwargs| kwargs.contains(keyword))
    }
}

/// What the caller expects back from an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Returns {
    List,
    Object,
}

/// One logical request routed through the shim.
#[derive(Debug, Clone)]
pub struct ShimRequest<'a> {
    pub operation: &'static str,
    pub args: &'a [&'a str],
    /// Logical names; the shim picks the encoding for the chosen route.
    pub params: Params,
    /// Page ceiling to request through `total_pages`, if accepted.
    pub max_pages: Option<usize>,
    pub returns: Returns,
}

impl<'a> ShimRequest<'a> {
    pub fn list(operation: &'static str, args: &'a [&'a str], params: Params) -> Self {
        Self {
            operation,
            args,
            params,
            max_pages: None,
            returns: Returns::List,
        }
    }

    pub fn object(operation: &'static str, args: &'a [&'a str]) -> Self {
        Self {
            operation,
            args,
            params: Params::new(),
            max_pages: None,
            returns: Returns::Object,
        }
    }

    pub fn pages(mut self, max_pages: usize) -> Self {
        self.max_pages = Some(max_pages);
        self
    }
}

/// An SDK client plus the capabilities probed from it.
#[derive(Debug, Clone)]
pub struct SdkShim {
    api: DashboardApi,
    caps: Capabilities,
}

impl SdkShim {
    /// Probe the configured manifest and build the client with the
    /// keywords that build accepts.
    pub fn connect(config: &DashboardConfig) -> Result<Self, CoreError> {
        let caps = Capabilities::probe(&config.sdk_manifest);

        let mut kwargs = Map::new();
        kwargs.insert("api_key".into(), json!(config.api_key.expose_secret()));
        for keyword in &caps.constructor {
            let value = match *keyword {
                "base_url" => json!(config.base_url.as_str().trim_end_matches('/')),
                "suppress_logging" => json!(true),
                "wait_on_rate_limit" => json!(true),
                "maximum_retries" => json!(config.max_retries),
                _ => continue,
            };
            kwargs.insert((*keyword).to_owned(), value);
        }
        if let Some(keyword) = caps.timeout_keyword {
            kwargs.insert(keyword.to_owned(), json!(config.timeout.as_secs()));
        }

        info!(
            release = %config.sdk_manifest.release,
            timeout_keyword = caps.timeout_keyword.unwrap_or("none"),
            session = ?caps.session,
            "SDK client probed"
        );

        let api = DashboardApi::from_kwargs(&kwargs, config.sdk_manifest.clone())?;
        Ok(Self { api, caps })
    }

    /// Wrap an existing client, probing its manifest.
    pub fn from_api(api: DashboardApi) -> Self {
        let caps = Capabilities::probe(api.manifest());
        Self { api, caps }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Route a request to the generated operation, else the raw session.
    ///
    /// A generated operation that does not accept one of the request's
    /// keywords is bypassed for the raw session when the build has one.
    pub async fn fetch(&self, request: ShimRequest<'_>) -> Result<Value, CoreError> {
        let op = request.operation;

        if self.caps.has_operation(op) {
            let raw_available = self.caps.session.is_some() && self.api.session().is_some();
            let rejected = request
                .params
                .names()
                .find(|k| !self.caps.accepts(op, k))
                .map(str::to_owned);
            match rejected {
                Some(keyword) if raw_available => {
                    debug!(operation = op, %keyword, "keyword not accepted; using raw session");
                }
                _ => return self.call_operation(request).await,
            }
        }

        let (Some(shape), Some(session), Some(def)) =
            (self.caps.session, self.api.session(), operations::find(op))
        else {
            return Err(CoreError::UnsupportedBackendOperation {
                operation: op.to_owned(),
            });
        };

        debug!(operation = op, ?shape, "raw session get");
        let url = def.render_path(request.args);
        let query = request.params.to_query();
        let body = match shape {
            SessionShape::Plain => {
                session
                    .get(SessionCall::Plain {
                        url: &url,
                        params: &query,
                    })
                    .await?
            }
            SessionShape::WithMetadata => {
                let metadata = json!({"tags": def.tags, "operation": op});
                session
                    .get(SessionCall::WithMetadata {
                        metadata: &metadata,
                        url: &url,
                        params: &query,
                    })
                    .await?
            }
        };

        Ok(match (request.returns, body) {
            (Returns::List, body @ Value::Array(_)) | (Returns::Object, body) => body,
            (Returns::List, _) => Value::Array(Vec::new()),
        })
    }

    async fn call_operation(&self, request: ShimRequest<'_>) -> Result<Value, CoreError> {
        let op = request.operation;
        let mut kwargs = request.params;
        if let Some(pages) = request.max_pages {
            if self.caps.accepts(op, TOTAL_PAGES) {
                kwargs = kwargs.scalar(TOTAL_PAGES, pages);
            } else {
                debug!(operation = op, "total_pages not accepted; first page only");
            }
        }

        let body = self.api.call(op, request.args, &kwargs).await?;

        // Swept lists keep what they have on a malformed page, as the
        // cursor walker does.
        if request.max_pages.is_some() && !body.is_array() {
            warn!(operation = op, "expected a list page; returning no items");
            return Ok(Value::Array(Vec::new()));
        }
        Ok(body)
    }
}
