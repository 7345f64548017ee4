//! Rule list sources: local files and remote URLs.
//!
//! A source argument is a URL when it has both a scheme and a host
//! (`https://example.com/list.txt`). Anything else, including Windows
//! paths such as `C:\rules.txt`, is read from the filesystem.
//!
//! Downloads make a single attempt with a timeout; any failure is fatal
//! to the run.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::Result;

/// Canonical gfwlist location, used when no input is given.
pub const GFWLIST_URL: &str = "https://raw.githubusercontent.com/gfwlist/gfwlist/master/gfwlist.txt";

/// Default network timeout for downloads.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Where a rule list is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    /// Local file
    Local(PathBuf),
    /// Remote URL
    Remote(String),
}

impl RuleSource {
    /// Classify a command-line argument as a URL or a local path.
    pub fn parse(arg: &str) -> Self {
        match Url::parse(arg) {
            Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => {
                RuleSource::Remote(arg.to_string())
            }
            _ => RuleSource::Local(PathBuf::from(arg)),
        }
    }

    /// The canonical gfwlist URL.
    pub fn gfwlist() -> Self {
        RuleSource::Remote(GFWLIST_URL.to_string())
    }

    /// Check if this source is fetched over the network.
    pub fn is_remote(&self) -> bool {
        matches!(self, RuleSource::Remote(_))
    }

    /// Read the raw bytes of this source.
    pub fn read(&self, client: &reqwest::blocking::Client) -> Result<Vec<u8>> {
        match self {
            RuleSource::Local(path) => {
                let content = fs::read(path)?;
                log::debug!("Read {} bytes from {:?}", content.len(), path);
                Ok(content)
            }
            RuleSource::Remote(url) => {
                log::info!("Downloading {}", url);
                let response = client.get(url).send()?.error_for_status()?;
                let content = response.bytes()?.to_vec();
                log::debug!("Downloaded {} bytes from {}", content.len(), url);
                Ok(content)
            }
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSource::Local(path) => write!(f, "{}", path.display()),
            RuleSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Build the blocking HTTP client used for downloads.
pub fn http_client(timeout: Duration) -> Result<reqwest::blocking::Client> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("gfwlist2pac/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
