//! End-to-end gfwlist to PAC conversion.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use crate::combiner::combine_lists;
use crate::decoder::decode_gfwlist;
use crate::pac::PacMode;
use crate::resources::Resources;
use crate::source::{http_client, RuleSource, DEFAULT_TIMEOUT};
use crate::{Error, Result};

/// Settings for a single conversion run.
#[derive(Debug, Clone)]
pub struct Config {
    /// gfwlist location; the canonical URL when `None`
    pub input: Option<RuleSource>,
    /// Path of the generated PAC file
    pub output: PathBuf,
    /// Proxy directive embedded in the PAC, e.g. `SOCKS5 127.0.0.1:1080;`
    pub proxy: String,
    /// Extra rules appended after the builtin rules
    pub user_rule: Option<RuleSource>,
    /// Generation strategy
    pub mode: PacMode,
    /// Network timeout for downloads
    pub timeout: Duration,
}

impl Config {
    /// Create a fast-mode config reading the canonical gfwlist.
    pub fn new(output: impl Into<PathBuf>, proxy: impl Into<String>) -> Self {
        Self {
            input: None,
            output: output.into(),
            proxy: proxy.into(),
            user_rule: None,
            mode: PacMode::Fast,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Validate settings that clap cannot check.
    pub fn validate(&self) -> Result<()> {
        if self.proxy.trim().is_empty() {
            return Err(Error::Config("proxy must not be empty".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(Error::Config("output path must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

/// Counters from a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertStats {
    /// Lines in the combined rule list
    pub rule_lines: usize,
    /// Entries embedded in the PAC: root domains or rules, depending on mode
    pub entries: usize,
    /// Size of the written PAC file
    pub bytes_written: usize,
}

/// Runs the full pipeline against a set of resources.
pub struct Converter {
    resources: Resources,
}

impl Converter {
    /// Create a converter.
    pub fn new(resources: Resources) -> Self {
        Self { resources }
    }

    /// Get the resources this converter uses.
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Build the PAC script for already-fetched content.
    ///
    /// `gfwlist` may be base64 or plain text.
    pub fn render(
        &self,
        gfwlist: &str,
        user_rule: Option<&str>,
        mode: PacMode,
        proxy: &str,
    ) -> Result<(String, ConvertStats)> {
        let content = decode_gfwlist(gfwlist);
        let rules = combine_lists(&content, &self.resources.builtin_rules, user_rule);
        let output = self.resources.generator().generate(
            mode,
            &rules,
            &self.resources.tld_table,
            proxy,
        )?;

        let stats = ConvertStats {
            rule_lines: rules.len(),
            entries: output.entries,
            bytes_written: output.script.len(),
        };
        Ok((output.script, stats))
    }

    /// Fetch the inputs, generate the PAC and write it to `config.output`.
    pub fn run(&self, config: &Config) -> Result<ConvertStats> {
        config.validate()?;

        let client = http_client(config.timeout)?;

        let input = config.input.clone().unwrap_or_else(RuleSource::gfwlist);
        let raw = input.read(&client)?;
        let gfwlist = String::from_utf8_lossy(&raw);

        let user_rule = match &config.user_rule {
            Some(source) => {
                let raw = source.read(&client)?;
                Some(String::from_utf8_lossy(&raw).into_owned())
            }
            None => None,
        };

        let (pac, stats) = self.render(&gfwlist, user_rule.as_deref(), config.mode, &config.proxy)?;

        let mut file = fs::File::create(&config.output)?;
        file.write_all(pac.as_bytes())?;

        log::info!(
            "Wrote {} PAC to {:?} ({} bytes)",
            config.mode,
            config.output,
            stats.bytes_written
        );

        Ok(stats)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Resources::bundled())
    }
}
