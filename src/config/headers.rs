//! HTTP header name constants.
//!
//! Names of the policy headers that can also be declared in markup.

/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "Referrer-Policy";

// Attribute values matched (lowercased, trimmed) on meta tags
pub(crate) const HTTP_EQUIV_CSP_VALUE: &str = "content-security-policy";
pub(crate) const META_NAME_REFERRER_VALUE: &str = "referrer";
