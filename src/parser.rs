//! Hostname extraction from adblock-style gfwlist rules.
//!
//! Only the parts of the syntax needed to pull a hostname out of a rule are
//! understood:
//!
//! - `||example.com` / `|http://example.com/path` anchors
//! - `.example.com` leading dots
//! - `!comment`, `[AutoProxy 0.2.9]` headers and `@@whitelist` rules are dropped
//! - rules containing `.*` are skipped
//!
//! Every `*` is rewritten to `/`, which turns `foo.com*bar` into a path and
//! keeps the host. This is a heuristic: a wildcard inside the host part still
//! produces a truncated hostname (`cdn*.example.com` yields `cdn`).

use ahash::AHashSet;
use url::Url;

use crate::error::HostnameError;

/// Set of unique hostnames extracted from a rule list.
pub type HostnameSet = AHashSet<String>;

/// Check if a line is a comment (`!`) or a section header (`[`).
///
/// These lines never carry a rule in either output mode.
pub fn is_directive_line(line: &str) -> bool {
    line.starts_with('!') || line.starts_with('[')
}

/// Extract the set of hostnames referenced by a rule list.
///
/// Lines that yield no hostname are dropped; extraction failures are logged.
pub fn parse_gfwlist<S: AsRef<str>>(lines: &[S]) -> HostnameSet {
    let mut hostnames = HostnameSet::new();

    for line in lines {
        let Some(rule) = normalize_rule(line.as_ref()) else {
            continue;
        };

        match extract_hostname(&rule) {
            Ok(hostname) => {
                hostnames.insert(hostname);
            }
            Err(e) => log::warn!("Skipping rule: {}", e),
        }
    }

    hostnames
}

/// Rewrite a rule into a URL-ish token, or `None` if it should be skipped.
fn normalize_rule(line: &str) -> Option<String> {
    if line.contains(".*") {
        return None;
    }

    let line = if line.contains('*') {
        line.replace('*', "/")
    } else {
        line.to_string()
    };

    let rule = if line.starts_with('|') {
        line.trim_start_matches('|')
    } else {
        line.trim_start_matches('.')
    };

    // Whitelist rules are never honoured: listed domains always go through the proxy
    if rule.is_empty() || is_directive_line(rule) || rule.starts_with('@') {
        return None;
    }

    Some(rule.to_string())
}

/// Extract the hostname from a normalized rule.
///
/// Rules without a scheme are treated as `http://` URLs. An empty authority
/// (`http:///path`) or a host with an empty label (`.example.com`) yields no
/// hostname.
pub fn extract_hostname(rule: &str) -> Result<String, HostnameError> {
    let (authority, parsed) = match rule
        .strip_prefix("http://")
        .or_else(|| rule.strip_prefix("https://"))
    {
        Some(rest) => (rest, Url::parse(rule)),
        None => (rule, Url::parse(&format!("http://{}", rule))),
    };

    // WHATWG parsing skips extra slashes and would take the path as the host
    if authority.starts_with('/') || authority.starts_with('\\') {
        return Err(HostnameError::MissingHost(rule.to_string()));
    }

    let url = parsed.map_err(|source| HostnameError::InvalidUrl {
        rule: rule.to_string(),
        source,
    })?;

    match url.host_str() {
        Some(host) if !host.split('.').any(str::is_empty) => Ok(host.to_string()),
        _ => Err(HostnameError::MissingHost(rule.to_string())),
    }
}
