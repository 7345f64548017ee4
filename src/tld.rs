//! Public suffix table and root domain reduction.

use ahash::AHashSet;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::Result;

/// Flat table of public suffixes (`com`, `co.uk`, `com.cn`, ...).
///
/// Unlike the full Public Suffix List there are no wildcard or exception
/// rules: every entry is a literal suffix.
///
/// # Examples
/// ```
/// use gfwlist2pac::TldTable;
///
/// let tlds = TldTable::from_text("com\nuk\nco.uk\n");
/// assert_eq!(tlds.reduce_domain("www.google.com").as_deref(), Some("google.com"));
/// assert_eq!(tlds.reduce_domain("a.b.co.uk").as_deref(), Some("b.co.uk"));
/// assert_eq!(tlds.reduce_domain("localhost"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TldTable {
    suffixes: AHashSet<String>,
}

impl TldTable {
    /// Build a table from text with one suffix per line.
    ///
    /// Blank lines and `//` comments are ignored. Entries are lowercased.
    pub fn from_text(text: &str) -> Self {
        let suffixes = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("//"))
            .map(str::to_lowercase)
            .collect();

        Self { suffixes }
    }

    /// Load a table from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_text(&content))
    }

    /// Check if a suffix is in the table.
    pub fn contains(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    /// Get the number of suffixes.
    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Reduce a hostname to its registrable root domain.
    ///
    /// Candidates are built from the right, one label at a time. The rightmost
    /// label must be a known suffix, otherwise the hostname is rejected. The
    /// first candidate that is not itself a suffix is the root domain. A
    /// hostname made only of suffix labels (`co.uk`) reduces to itself.
    pub fn reduce_domain(&self, hostname: &str) -> Option<String> {
        let labels: Vec<&str> = hostname.split('.').collect();
        let mut root = None;

        for i in 0..labels.len() {
            let candidate = labels[labels.len() - i - 1..].join(".");
            if i == 0 && !self.contains(&candidate) {
                return None;
            }

            let is_suffix = self.contains(&candidate);
            root = Some(candidate);
            if !is_suffix {
                break;
            }
        }

        root
    }

    /// Reduce a set of hostnames to sorted, deduplicated root domains.
    ///
    /// Hostnames without a known suffix are dropped.
    pub fn reduce<I, S>(&self, hostnames: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roots: BTreeSet<String> = hostnames
            .into_iter()
            .filter_map(|hostname| self.reduce_domain(hostname.as_ref()))
            .collect();

        roots.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TldTable {
        TldTable::from_text(
            "// comment\n\ncom\nnet\norg\nuk\nco.uk\njp\nco.jp\ncn\ncom.cn\nhk\ncom.hk\n",
        )
    }

    #[test]
    fn test_from_text() {
        let tlds = TldTable::from_text("// header\nCOM\n\n  co.uk  \n");
        assert_eq!(tlds.len(), 2);
        assert!(tlds.contains("com"));
        assert!(tlds.contains("co.uk"));
        assert!(!tlds.contains("// header"));
    }

    #[test]
    fn test_reduce_simple() {
        let tlds = table();
        assert_eq!(tlds.reduce_domain("www.google.com").as_deref(), Some("google.com"));
        assert_eq!(tlds.reduce_domain("google.com").as_deref(), Some("google.com"));
        assert_eq!(tlds.reduce_domain("a.b.c.example.org").as_deref(), Some("example.org"));
    }

    #[test]
    fn test_reduce_multi_label_suffix() {
        let tlds = table();
        assert_eq!(tlds.reduce_domain("a.b.co.uk").as_deref(), Some("b.co.uk"));
        assert_eq!(tlds.reduce_domain("news.sina.com.cn").as_deref(), Some("sina.com.cn"));
        assert_eq!(tlds.reduce_domain("example.uk").as_deref(), Some("example.uk"));
    }

    #[test]
    fn test_reduce_suffix_only() {
        let tlds = table();
        assert_eq!(tlds.reduce_domain("co.uk").as_deref(), Some("co.uk"));
        assert_eq!(tlds.reduce_domain("com").as_deref(), Some("com"));
    }

    #[test]
    fn test_reduce_punycode_suffix() {
        let tlds = TldTable::from_text("xn--fiqs8s\nxn--55qx5d.xn--fiqs8s\n");
        assert_eq!(
            tlds.reduce_domain("www.xn--fsqu00a.xn--fiqs8s").as_deref(),
            Some("xn--fsqu00a.xn--fiqs8s")
        );
        assert_eq!(
            tlds.reduce_domain("a.b.xn--55qx5d.xn--fiqs8s").as_deref(),
            Some("b.xn--55qx5d.xn--fiqs8s")
        );
    }

    #[test]
    fn test_reduce_unknown_tld() {
        let tlds = table();
        assert_eq!(tlds.reduce_domain("localhost"), None);
        assert_eq!(tlds.reduce_domain("www.example.invalid"), None);
        assert_eq!(tlds.reduce_domain("10.0.0.1"), None);
        assert!(tlds.reduce(["a.example.zz", "b.test"]).is_empty());
    }

    #[test]
    fn test_reduce_sorted_and_deduped() {
        let tlds = table();
        let roots = tlds.reduce([
            "www.youtube.com",
            "m.youtube.com",
            "a.b.co.uk",
            "twitter.com",
            "intranet",
        ]);
        assert_eq!(roots, vec!["b.co.uk", "twitter.com", "youtube.com"]);
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let tlds = table();
        let roots = tlds.reduce([
            "www.google.com",
            "a.b.co.uk",
            "x.y.z.example.com.hk",
            "co.jp",
        ]);
        assert_eq!(tlds.reduce(&roots), roots);
    }
}
