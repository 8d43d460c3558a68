//! Redirect fallback page rendering.
//!
//! Hosts without server-side redirect support serve a small HTML document at
//! the old location instead. The document forwards immediately via
//! `<meta http-equiv="refresh">`, keeps a canonical link for crawlers, and a
//! script preserves the query string and fragment of the original request.
//!
//! # Page Format
//!
//! ```html
//! <!DOCTYPE html>
//! <html>
//!   <head>
//!     <meta charset="UTF-8" />
//!     <meta http-equiv="refresh" content="0; url=/new-path" />
//!     <link rel="canonical" href="https://example.com/new-path" />
//!   </head>
//!   <script>
//!     window.location.href = '/new-path' + window.location.search + window.location.hash;
//!   </script>
//! </html>
//! ```

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use std::borrow::Cow;

use crate::config::SiteSection;
use crate::redirect::RedirectRule;

/// Characters percent-encoded inside a path segment on output. Non-ASCII
/// bytes are always encoded; the quote characters keep the result safe to
/// embed in attributes and script strings.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#')
    .add(b'%');

/// Render the fallback page for one planned rule.
pub fn page_for_rule(site: &SiteSection, rule: &RedirectRule) -> String {
    let destination = encode_pathname(&join_base_url(&site.base_url, rule.to.as_str()));
    let canonical = canonical_url(site.url.as_deref(), &destination);
    render(&destination, &canonical)
}

/// Prepend the site base url to a site-relative path.
pub fn join_base_url(base_url: &str, path: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{base}{path}")
}

/// Percent-encode a pathname for browser output, segment by segment.
pub fn encode_pathname(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

/// Absolute canonical URL when the site url is configured, the encoded
/// destination itself otherwise.
pub fn canonical_url(site_url: Option<&str>, destination: &str) -> String {
    site_url
        .and_then(|site| url::Url::parse(site).ok())
        .and_then(|base| base.join(destination).ok())
        .map(String::from)
        .unwrap_or_else(|| destination.to_string())
}

/// Build the page document. `destination` must already be encoded.
fn render(destination: &str, canonical: &str) -> String {
    let mut html = String::with_capacity(512);

    html.push_str("<!DOCTYPE html>\n<html>\n  <head>\n");
    html.push_str("    <meta charset=\"UTF-8\" />\n");
    html.push_str("    <meta http-equiv=\"refresh\" content=\"0; url=");
    html.push_str(&escape_attr(destination));
    html.push_str("\" />\n");
    html.push_str("    <link rel=\"canonical\" href=\"");
    html.push_str(&escape_attr(canonical));
    html.push_str("\" />\n  </head>\n  <script>\n");
    html.push_str("    window.location.href = '");
    html.push_str(&escape_script(destination));
    html.push_str("' + window.location.search + window.location.hash;\n");
    html.push_str("  </script>\n</html>\n");

    html
}

/// Escape special characters for a double-quoted HTML attribute.
fn escape_attr(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;"),
    )
}

/// Escape a string for a single-quoted script literal. `</` is broken up so
/// the document's own `</script>` cannot be terminated early.
fn escape_script(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\'']) && !s.contains("</") {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace("</", "<\\/"),
    )
}
