//! Fast and precise PAC generators.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::template::{PacTemplate, DOMAINS_PLACEHOLDER, PROXY_PLACEHOLDER, RULES_PLACEHOLDER};
use crate::parser::{is_directive_line, parse_gfwlist};
use crate::tld::TldTable;
use crate::Result;

/// PAC generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PacMode {
    /// O(1) lookup of reduced root domains
    #[default]
    Fast,
    /// Adblock-style matching over the raw rule list
    Precise,
}

impl PacMode {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PacMode::Fast => "fast",
            PacMode::Precise => "precise",
        }
    }
}

impl fmt::Display for PacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rendered PAC script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacOutput {
    /// Script text with all placeholders substituted
    pub script: String,
    /// Root domains (fast) or rules (precise) embedded in the script
    pub entries: usize,
}

/// Renders PAC scripts from the fast and precise templates.
#[derive(Debug, Clone)]
pub struct PacGenerator {
    fast: PacTemplate,
    precise: PacTemplate,
}

impl PacGenerator {
    /// Create a generator from the two templates.
    pub fn new(fast: PacTemplate, precise: PacTemplate) -> Self {
        Self { fast, precise }
    }

    /// Generate a PAC script from a combined rule list.
    ///
    /// Fast mode extracts and reduces hostnames first; precise mode embeds
    /// the rules themselves.
    pub fn generate(
        &self,
        mode: PacMode,
        rules: &[String],
        tlds: &TldTable,
        proxy: &str,
    ) -> Result<PacOutput> {
        match mode {
            PacMode::Fast => {
                let hostnames = parse_gfwlist(rules);
                let domains = tlds.reduce(hostnames.iter());
                log::info!(
                    "Extracted {} hostnames, reduced to {} root domains",
                    hostnames.len(),
                    domains.len()
                );
                Ok(PacOutput {
                    script: self.generate_fast(&domains, proxy)?,
                    entries: domains.len(),
                })
            }
            PacMode::Precise => {
                let kept = filter_precise_rules(rules);
                log::info!("Embedding {} rules", kept.len());
                Ok(PacOutput {
                    script: self.render_rules(&kept, proxy)?,
                    entries: kept.len(),
                })
            }
        }
    }

    /// Render the fast template with a `domain -> 1` lookup map.
    pub fn generate_fast<S: AsRef<str>>(&self, domains: &[S], proxy: &str) -> Result<String> {
        let map: BTreeMap<&str, u8> = domains.iter().map(|d| (d.as_ref(), 1)).collect();

        let proxy_json = serde_json::to_string(proxy)?;
        let domains_json = to_json_pretty(&map)?;

        self.fast.render(&[
            (PROXY_PLACEHOLDER, proxy_json.as_str()),
            (DOMAINS_PLACEHOLDER, domains_json.as_str()),
        ])
    }

    /// Render the precise template with the raw rule list.
    ///
    /// Empty lines, comments and section headers are removed. Anchors,
    /// wildcards and `@@` whitelist rules are kept for the script to evaluate.
    pub fn generate_precise<S: AsRef<str>>(&self, rules: &[S], proxy: &str) -> Result<String> {
        self.render_rules(&filter_precise_rules(rules), proxy)
    }

    fn render_rules(&self, rules: &[&str], proxy: &str) -> Result<String> {
        let proxy_json = serde_json::to_string(proxy)?;
        let rules_json = to_json_pretty(rules)?;

        self.precise.render(&[
            (PROXY_PLACEHOLDER, proxy_json.as_str()),
            (RULES_PLACEHOLDER, rules_json.as_str()),
        ])
    }
}

/// Keep the rule lines that are meaningful to an adblock matcher.
pub fn filter_precise_rules<S: AsRef<str>>(rules: &[S]) -> Vec<&str> {
    rules
        .iter()
        .map(|rule| rule.as_ref())
        .filter(|rule| !rule.is_empty() && !is_directive_line(rule))
        .collect()
}

/// Serialize with two-space indentation.
fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn generator() -> PacGenerator {
        PacGenerator::new(
            PacTemplate::new(r#"{"proxy": __PROXY__, "domains": __DOMAINS__}"#),
            PacTemplate::new(r#"{"proxy": __PROXY__, "rules": __RULES__}"#),
        )
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_generate_fast_is_json() {
        let output = generator()
            .generate_fast(&["google.com", "twitter.com"], "SOCKS5 127.0.0.1:1080;")
            .unwrap();

        assert!(!output.contains(PROXY_PLACEHOLDER));
        assert!(!output.contains(DOMAINS_PLACEHOLDER));

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["proxy"], "SOCKS5 127.0.0.1:1080;");
        assert_eq!(value["domains"]["google.com"], 1);
        assert_eq!(value["domains"]["twitter.com"], 1);
        assert_eq!(value["domains"].as_object().unwrap().len(), 2);
    }

    #[test]
    fn test_generate_fast_sorted_and_indented() {
        let output = generator()
            .generate_fast(&["b.com", "a.com"], "DIRECT")
            .unwrap();

        let expected = "{\"proxy\": \"DIRECT\", \"domains\": {\n  \"a.com\": 1,\n  \"b.com\": 1\n}}";
        assert_eq!(output, expected);
    }

    #[test]
    fn test_proxy_is_escaped() {
        let output = generator()
            .generate_fast::<&str>(&[], "PROXY \"quoted\";")
            .unwrap();

        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["proxy"], "PROXY \"quoted\";");
        assert!(value["domains"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_generate_precise_filters_directives() {
        let rules = lines(&[
            "[AutoProxy 0.2.9]",
            "!comment",
            "",
            "||example.com",
            "@@||direct.example.com",
            "|http://*.example.org",
            ".example.net",
        ]);
        let output = generator().generate_precise(&rules, "PROXY p:80;").unwrap();

        assert!(!output.contains(RULES_PLACEHOLDER));
        let value: Value = serde_json::from_str(&output).unwrap();
        let kept: Vec<&str> = value["rules"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            kept,
            vec![
                "||example.com",
                "@@||direct.example.com",
                "|http://*.example.org",
                ".example.net"
            ]
        );
    }

    #[test]
    fn test_generate_dispatch() {
        let tlds = TldTable::from_text("com\norg\n");
        let rules = lines(&["!c", "||www.google.com", "@@||baidu.com", "||mail.google.com"]);
        let pac = generator();

        let fast = pac.generate(PacMode::Fast, &rules, &tlds, "P").unwrap();
        assert_eq!(fast.entries, 1);
        let value: Value = serde_json::from_str(&fast.script).unwrap();
        let domains: Vec<&String> = value["domains"].as_object().unwrap().keys().collect();
        assert_eq!(domains, vec!["google.com"]);

        let precise = pac.generate(PacMode::Precise, &rules, &tlds, "P").unwrap();
        assert_eq!(precise.entries, 3);
        assert_eq!(precise.script, pac.generate_precise(&rules, "P").unwrap());
        let value: Value = serde_json::from_str(&precise.script).unwrap();
        assert_eq!(value["rules"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_wrong_template_is_error() {
        let pac = PacGenerator::new(
            PacTemplate::new("var rules = __RULES__; var proxy = __PROXY__;"),
            PacTemplate::new("var domains = __DOMAINS__; var proxy = __PROXY__;"),
        );
        assert!(pac.generate_fast(&["a.com"], "P").is_err());
        assert!(pac.generate_precise(&["||a.com"], "P").is_err());
    }

    #[test]
    fn test_mode_display() {
        assert_eq!(PacMode::default(), PacMode::Fast);
        assert_eq!(PacMode::Precise.to_string(), "precise");
    }
}
