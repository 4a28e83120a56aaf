//! Policy headers declared in HTML markup.
//!
//! Pages can declare a Content-Security-Policy with
//! `<meta http-equiv="Content-Security-Policy" content="...">` and a referrer
//! policy with `<meta name="referrer" content="...">`. The scanner grades
//! these alongside the transport headers, so they are pulled out here into a
//! typed header set.

use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde::Serialize;

use crate::config::{
    HEADER_CONTENT_SECURITY_POLICY, HEADER_REFERRER_POLICY, HTTP_EQUIV_CSP_VALUE,
    META_NAME_REFERRER_VALUE,
};
use crate::error_handling::ExtractError;
use crate::utils::parse_selector_with_fallback;

const META_SELECTOR_STR: &str = "meta";

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback(META_SELECTOR_STR, "http-equiv extraction"));

/// Header-like directives found in `<meta>` tags.
///
/// `content_security_policy` keeps every CSP meta tag in document order,
/// duplicates included: browsers enforce all of them, so the consumer has
/// to intersect them. `referrer_policy` is single-valued and only set when a
/// matching tag exists (the last one wins).
///
/// Serializes as `{"Content-Security-Policy": [...], "Referrer-Policy": "..."}`
/// with `Referrer-Policy` omitted when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HttpEquivHeaders {
    /// Raw policy strings from CSP meta tags
    #[serde(rename = "Content-Security-Policy")]
    pub content_security_policy: Vec<String>,

    /// Content of the last `<meta name="referrer">` tag
    #[serde(
        rename = "Referrer-Policy",
        skip_serializing_if = "Option::is_none"
    )]
    pub referrer_policy: Option<String>,
}

/// Value returned by a case-insensitive lookup on [`HttpEquivHeaders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpEquivValue<'a> {
    /// Multi-valued header (Content-Security-Policy)
    Policies(&'a [String]),
    /// Single-valued header (Referrer-Policy)
    Single(&'a str),
}

impl HttpEquivHeaders {
    /// Looks up a header by name, ignoring ASCII case.
    ///
    /// `Content-Security-Policy` is always present (possibly empty);
    /// `Referrer-Policy` only when a matching meta tag was found. Any other
    /// name returns `None`.
    pub fn get(&self, name: &str) -> Option<HttpEquivValue<'_>> {
        if name.eq_ignore_ascii_case(HEADER_CONTENT_SECURITY_POLICY) {
            Some(HttpEquivValue::Policies(&self.content_security_policy))
        } else if name.eq_ignore_ascii_case(HEADER_REFERRER_POLICY) {
            self.referrer_policy.as_deref().map(HttpEquivValue::Single)
        } else {
            None
        }
    }

    /// Returns `true` if [`get`](Self::get) would return a value.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Extracts http-equiv style headers from HTML.
///
/// Never fails: input that cannot be parsed yields the default set (no CSP
/// policies, no referrer policy).
///
/// # Arguments
///
/// * `html` - Raw page content; need not be well-formed, or HTML at all
pub fn parse_http_equiv_headers(html: &str) -> HttpEquivHeaders {
    match try_parse_http_equiv_headers(html) {
        Ok(headers) => headers,
        Err(e) => {
            log::debug!("Falling back to empty http-equiv headers: {}", e);
            HttpEquivHeaders::default()
        }
    }
}

/// Extracts http-equiv style headers from HTML, reporting parser faults.
///
/// # Errors
///
/// Returns `ExtractError::ParserFault` if the HTML parser panics on the input.
pub fn try_parse_http_equiv_headers(html: &str) -> Result<HttpEquivHeaders, ExtractError> {
    panic::catch_unwind(AssertUnwindSafe(|| {
        let document = Html::parse_document(html);
        collect_meta_headers(&document)
    }))
    .map_err(|payload| ExtractError::ParserFault(panic_message(payload.as_ref())))
}

/// Walks every `<meta>` element in document order.
///
/// A tag with both `http-equiv` and `content` is only considered as a CSP
/// declaration; it is never re-examined as a referrer tag.
fn collect_meta_headers(document: &Html) -> HttpEquivHeaders {
    let mut headers = HttpEquivHeaders::default();

    for element in document.select(&META_SELECTOR) {
        let meta = element.value();
        let content = meta.attr("content");

        if let (Some(http_equiv), Some(content)) = (meta.attr("http-equiv"), content) {
            if attr_matches(http_equiv, HTTP_EQUIV_CSP_VALUE) {
                headers.content_security_policy.push(content.to_string());
            }
        } else if let (Some(name), Some(content)) = (meta.attr("name"), content) {
            if attr_matches(name, META_NAME_REFERRER_VALUE) {
                headers.referrer_policy = Some(content.to_string());
            }
        }
    }

    log::debug!(
        "Found {} CSP meta tag(s), referrer policy {}",
        headers.content_security_policy.len(),
        if headers.referrer_policy.is_some() {
            "present"
        } else {
            "absent"
        }
    );

    headers
}

fn attr_matches(value: &str, expected: &str) -> bool {
    value.trim().to_lowercase() == expected
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
