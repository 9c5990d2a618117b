// Cursor pagination over `Link: <…startingAfter=…>; rel="next"` headers.
//
// List endpoints return a bare JSON array per page. The continuation
// cursor lives in the `rel="next"` URL's `startingAfter` query parameter.

use std::future::Future;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::ApiResponse;

/// Query parameter carrying the cursor.
pub const CURSOR_PARAM: &str = "startingAfter";

/// Extract the `startingAfter` cursor from a `Link` header.
///
/// Returns `None` when the header has no `rel="next"` segment, the URL is
/// not angle-bracketed or does not parse, or the parameter is absent.
pub fn next_cursor(link_header: &str) -> Option<String> {
    let segment = link_header
        .split(',')
        .map(str::trim)
        .find(|part| part.contains(r#"rel="next""#))?;

    let target = segment.split(';').next()?.trim();
    let url = target.strip_prefix('<')?.strip_suffix('>')?;
    let url = Url::parse(url).ok()?;

    url.query_pairs()
        .find(|(k, _)| k == CURSOR_PARAM)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

// ── Page / Sweep ─────────────────────────────────────────────────────

/// Body of a single page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageBody<T> {
    Items(Vec<T>),
    /// The endpoint answered with something other than a list.
    Malformed(Value),
}

/// One fetched page plus the cursor for the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub body: PageBody<T>,
    pub next_cursor: Option<String>,
}

impl<T> Page<T> {
    pub fn items(items: Vec<T>, next_cursor: Option<String>) -> Self {
        Self {
            body: PageBody::Items(items),
            next_cursor,
        }
    }

    pub fn malformed(body: Value) -> Self {
        Self {
            body: PageBody::Malformed(body),
            next_cursor: None,
        }
    }
}

impl Page<Value> {
    /// Split a raw list response into items and the next cursor.
    pub fn from_response(resp: ApiResponse) -> Self {
        let next_cursor = resp.link().and_then(next_cursor);
        match resp.body {
            Value::Array(items) => Self::items(items, next_cursor),
            other => Self::malformed(other),
        }
    }
}

/// Why a sweep stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page carried no cursor.
    Exhausted,
    /// `max_pages` pages were fetched while a cursor was still present.
    Ceiling,
    /// A page body was not a list; earlier items are kept.
    Malformed,
}

/// Accumulated result of a pagination sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct Sweep<T> {
    pub items: Vec<T>,
    pub pages: usize,
    pub stop: StopReason,
}

impl<T> Sweep<T> {
    pub fn is_truncated(&self) -> bool {
        self.stop != StopReason::Exhausted
    }
}

/// Walk pages until the cursor runs out or `max_pages` pages were fetched.
///
/// `fetch` receives the cursor for the page to load (`None` for the first).
/// Pages are fetched strictly one after another. A malformed page ends the
/// sweep without error; transport errors propagate.
pub async fn paginate<T, F, Fut>(max_pages: usize, mut fetch: F) -> Result<Sweep<T>, Error>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>, Error>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0;

    while pages < max_pages {
        let page = fetch(cursor.take()).await?;
        pages += 1;

        match page.body {
            PageBody::Items(batch) => items.extend(batch),
            PageBody::Malformed(body) => {
                warn!(
                    page = pages,
                    kept = items.len(),
                    "expected a list page, got {}; stopping pagination",
                    kind(&body)
                );
                return Ok(Sweep {
                    items,
                    pages,
                    stop: StopReason::Malformed,
                });
            }
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                return Ok(Sweep {
                    items,
                    pages,
                    stop: StopReason::Exhausted,
                });
            }
        }
    }

    debug!(pages, "page ceiling reached");
    Ok(Sweep {
        items,
        pages,
        stop: StopReason::Ceiling,
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;

    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_cursor_from_next_link() {
        let header = r#"<https://x/y?startingAfter=ABC123>; rel="next""#;
        assert_eq!(next_cursor(header).as_deref(), Some("ABC123"));
    }

    #[test]
    fn picks_next_among_several_relations() {
        let header = concat!(
            r#"<https://api.meraki.com/api/v1/networks/N_1/clients?perPage=3&startingAfter=a000>; rel=first, "#,
            r#"<https://api.meraki.com/api/v1/networks/N_1/clients?perPage=3&startingAfter=k9%3D>; rel="next", "#,
            r#"<https://api.meraki.com/api/v1/networks/N_1/clients?perPage=3&endingBefore=zzz>; rel=last"#,
        );
        assert_eq!(next_cursor(header).as_deref(), Some("k9="));
    }

    #[test]
    fn no_next_segment_yields_none() {
        let header = r#"<https://x/y?startingAfter=ABC123>; rel="prev""#;
        assert_eq!(next_cursor(header), None);
    }

    #[test]
    fn malformed_headers_yield_none() {
        assert_eq!(next_cursor(""), None);
        assert_eq!(next_cursor(r#"https://x/y?startingAfter=A; rel="next""#), None);
        assert_eq!(next_cursor(r#"<not a url>; rel="next""#), None);
        assert_eq!(next_cursor(r#"<https://x/y?perPage=10>; rel="next""#), None);
    }

    fn page(ids: &[u32], next: Option<&str>) -> Page<u32> {
        Page::items(ids.to_vec(), next.map(str::to_owned))
    }

    #[tokio::test]
    async fn stops_when_cursor_runs_out() {
        let pages = [
            page(&[1, 2], Some("c1")),
            page(&[3], Some("c2")),
            page(&[4, 5], None),
        ];
        let seen = RefCell::new(Vec::new());

        let sweep = paginate(10, |cursor| {
            seen.borrow_mut().push(cursor);
            let idx = seen.borrow().len() - 1;
            let next = pages[idx].clone();
            async move { Ok(next) }
        })
        .await
        .unwrap();

        assert_eq!(sweep.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(sweep.pages, 3);
        assert_eq!(sweep.stop, StopReason::Exhausted);
        assert_eq!(
            seen.into_inner(),
            vec![None, Some("c1".to_owned()), Some("c2".to_owned())]
        );
    }

    #[tokio::test]
    async fn honours_page_ceiling() {
        let calls = RefCell::new(0_usize);

        let sweep = paginate(4, |_| {
            *calls.borrow_mut() += 1;
            async { Ok(page(&[7], Some("again"))) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), 4);
        assert_eq!(sweep.items.len(), 4);
        assert_eq!(sweep.stop, StopReason::Ceiling);
        assert!(sweep.is_truncated());
    }

    #[tokio::test]
    async fn malformed_page_keeps_earlier_items() {
        let calls = RefCell::new(0_usize);

        let sweep = paginate(10, |_| {
            *calls.borrow_mut() += 1;
            let n = *calls.borrow();
            async move {
                if n == 1 {
                    Ok(page(&[1, 2], Some("c1")))
                } else {
                    Ok(Page::malformed(json!({"errors": ["oops"]})))
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), 2);
        assert_eq!(sweep.items, vec![1, 2]);
        assert_eq!(sweep.stop, StopReason::Malformed);
    }

    #[tokio::test]
    async fn zero_ceiling_fetches_nothing() {
        let sweep: Sweep<u32> = paginate(0, |_| async { Ok(page(&[1], None)) })
            .await
            .unwrap();
        assert!(sweep.items.is_empty());
        assert_eq!(sweep.pages, 0);
    }

    #[test]
    fn from_response_splits_body_and_cursor() {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "link",
            r#"<https://x/y?startingAfter=Q1>; rel="next""#.parse().unwrap(),
        );
        let resp = ApiResponse {
            status: 200,
            headers,
            body: json!([{"id": 1}]),
        };

        let page = Page::from_response(resp);
        assert_eq!(page.next_cursor.as_deref(), Some("Q1"));
        assert_eq!(page.body, PageBody::Items(vec![json!({"id": 1})]));
    }
}
