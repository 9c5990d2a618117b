// SDK-style dashboard client.
//
// Mirrors the calling conventions of the vendor SDK: a keyword-configured
// constructor, generated operations addressed by `operationId` with
// positional path arguments plus keyword query arguments, optional
// `total_pages` pagination, and a raw session. Every call is checked
// against the manifest the client was built with.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::info;

use super::manifest::SdkManifest;
use super::operations::{self, OperationDef};
use super::session::RestSession;
use crate::error::Error;
use crate::pagination::{CURSOR_PARAM, Page, paginate};
use crate::params::{Param, Params};
use crate::transport::{DEFAULT_BASE_URL, RetryPolicy, Transport, TransportConfig};

const CONSTRUCTOR: &str = "DashboardAPI";

/// Keywords a release may use for the per-request timeout.
pub const TIMEOUT_KEYWORDS: &[&str] = &["single_request_timeout", "request_timeout", "timeout"];

/// Keyword selecting how many pages a paginated operation walks.
pub const TOTAL_PAGES: &str = "total_pages";

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAXIMUM_RETRIES: u32 = 2;

/// SDK-style client over the shared transport.
#[derive(Debug, Clone)]
pub struct DashboardApi {
    transport: Transport,
    manifest: SdkManifest,
    session: Option<RestSession>,
    log_calls: bool,
}

impl DashboardApi {
    /// Construct from keyword arguments, as the SDK constructor would.
    ///
    /// Unknown keywords fail with `UnexpectedKeyword`; `api_key` is required.
    pub fn from_kwargs(kwargs: &Map<String, Value>, manifest: SdkManifest) -> Result<Self, Error> {
        if let Some(keyword) = kwargs.keys().find(|k| !manifest.accepts_constructor(k)) {
            return Err(Error::UnexpectedKeyword {
                callable: CONSTRUCTOR.into(),
                keyword: keyword.clone(),
            });
        }

        let api_key = kwargs
            .get("api_key")
            .and_then(Value::as_str)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::MissingArgument {
                callable: CONSTRUCTOR.into(),
                argument: "api_key".into(),
            })?;

        let base_url = kwargs
            .get("base_url")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_BASE_URL);

        let timeout = TIMEOUT_KEYWORDS
            .iter()
            .find_map(|k| kwargs.get(*k))
            .map_or(Ok(DEFAULT_TIMEOUT_SECS), |v| {
                v.as_u64().ok_or_else(|| Error::InvalidArgument {
                    callable: CONSTRUCTOR.into(),
                    argument: "timeout".into(),
                    value: v.to_string(),
                })
            })?;

        let wait_on_rate_limit = kwargs
            .get("wait_on_rate_limit")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let max_retries = if wait_on_rate_limit {
            kwargs
                .get("maximum_retries")
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(DEFAULT_MAXIMUM_RETRIES)
        } else {
            0
        };

        let log_calls = !kwargs
            .get("suppress_logging")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let config = TransportConfig {
            timeout: Duration::from_secs(timeout),
            retry: RetryPolicy::with_max_retries(max_retries),
        };
        let key = SecretString::from(api_key.to_owned());
        let transport = Transport::new(base_url, &key, &config)?;

        Ok(Self::assemble(transport, manifest, log_calls))
    }

    /// Wrap an existing transport (tests, custom clients).
    pub fn with_transport(transport: Transport, manifest: SdkManifest) -> Self {
        Self::assemble(transport, manifest, false)
    }

    fn assemble(transport: Transport, manifest: SdkManifest, log_calls: bool) -> Self {
        let session = manifest
            .session_get()
            .map(|sig| RestSession::new(transport.clone(), sig.to_vec(), log_calls));

        if log_calls {
            info!(release = %manifest.release, "dashboard SDK client ready");
        }

        Self {
            transport,
            manifest,
            session,
            log_calls,
        }
    }

    pub fn manifest(&self) -> &SdkManifest {
        &self.manifest
    }

    /// The raw session, when this build has one.
    pub fn session(&self) -> Option<&RestSession> {
        self.session.as_ref()
    }

    /// Whether this build exposes a generated operation.
    pub fn has_operation(&self, id: &str) -> bool {
        self.manifest.operation(id).is_some() && operations::find(id).is_some()
    }

    /// Invoke a generated operation.
    ///
    /// `args` fill the path parameters in order. `kwargs` become query
    /// parameters, except `total_pages` (`"all"` or a count) which walks
    /// the `Link` cursor on paginated operations and returns the
    /// concatenated list. Without it the first page's body is returned
    /// as is.
    pub async fn call(&self, id: &str, args: &[&str], kwargs: &Params) -> Result<Value, Error> {
        let (def, accepted) = match (operations::find(id), self.manifest.operation(id)) {
            (Some(def), Some(accepted)) => (def, accepted),
            _ => return Err(Error::UnknownOperation(id.to_owned())),
        };

        check_arguments(def, args)?;
        if let Some(keyword) = kwargs.names().find(|k| !accepted.contains(*k)) {
            return Err(Error::UnexpectedKeyword {
                callable: id.to_owned(),
                keyword: keyword.to_owned(),
            });
        }

        let mut query = kwargs.clone();
        let total_pages = query
            .remove(TOTAL_PAGES)
            .map(|v| parse_total_pages(id, &v))
            .transpose()?;

        let path = def.render_path(args);
        if self.log_calls {
            info!(operation = id, "{} > {id}", def.tags.join(" > "));
        }

        // Without `total_pages` a paginated operation is one plain GET and
        // its body comes back untouched, list or not.
        let Some(total_pages) = total_pages.filter(|_| def.paginated) else {
            return Ok(self.transport.get(&path, &query.to_query()).await?.body);
        };

        let transport = &self.transport;
        let path = path.as_str();
        let sweep = paginate(total_pages, |cursor| {
            let params = match cursor {
                Some(c) => query.clone().scalar(CURSOR_PARAM, c),
                None => query.clone(),
            };
            async move {
                let resp = transport.get(path, &params.to_query()).await?;
                Ok(Page::from_response(resp))
            }
        })
        .await?;

        Ok(Value::Array(sweep.items))
    }
}

fn check_arguments(def: &OperationDef, args: &[&str]) -> Result<(), Error> {
    let expected = def.path_params.len();
    if let Some(missing) = def.path_params.get(args.len()) {
        return Err(Error::MissingArgument {
            callable: def.id.to_owned(),
            argument: (*missing).to_owned(),
        });
    }
    if args.len() > expected {
        return Err(Error::ArityMismatch {
            callable: def.id.to_owned(),
            expected,
            given: args.len(),
        });
    }
    Ok(())
}

fn parse_total_pages(callable: &str, value: &Param) -> Result<usize, Error> {
    let invalid = || Error::InvalidArgument {
        callable: callable.to_owned(),
        argument: TOTAL_PAGES.into(),
        value: value.to_string(),
    };
    match value {
        Param::Scalar(s) if s == "all" => Ok(usize::MAX),
        Param::Scalar(s) => s.parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(invalid),
        Param::List(_) => Err(invalid()),
    }
}
