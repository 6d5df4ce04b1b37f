//! Affiliate wrapping for outbound ticket links.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unescaped, matching `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Rewrites ticket URLs through the commission-tracking redirect.
#[derive(Debug, Clone)]
pub struct AffiliateLinker {
    base: String,
}

impl AffiliateLinker {
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// `{base}?u={encoded}`. Never returns the bare URL.
    #[must_use]
    pub fn wrap(&self, ticket_url: &str) -> String {
        format!(
            "{}?u={}",
            self.base,
            utf8_percent_encode(ticket_url, URI_COMPONENT)
        )
    }
}
