//! gfwlist2pac - convert gfwlist into a proxy auto-config (PAC) file.
//!
//! The gfwlist is a base64-encoded blocklist written in a subset of adblock
//! filter syntax. This crate turns it into a PAC script a browser can use to
//! send listed sites through a proxy and everything else direct.
//!
//! # Pipeline
//!
//! 1. [`decode_gfwlist`] - base64 or plain text
//! 2. [`combine_lists`] - gfwlist + builtin rules + user rules
//! 3. [`parse_gfwlist`] - extract hostnames from rules
//! 4. [`TldTable::reduce`] - collapse hostnames to root domains
//! 5. [`PacGenerator`] - render the fast or precise template
//!
//! # Quick Start
//!
//! ```ignore
//! use gfwlist2pac::{Config, Converter, Resources};
//!
//! let config = Config::new("proxy.pac", "SOCKS5 127.0.0.1:1080;");
//! let stats = Converter::new(Resources::bundled()).run(&config)?;
//! println!("{} domains", stats.entries);
//! ```
//!
//! # Modes
//!
//! - **Fast**: the PAC holds a `domain -> 1` map and checks each host suffix
//!   against it, O(1) per lookup.
//! - **Precise**: the PAC holds the raw rules and evaluates them with an
//!   adblock-style matcher, O(n) per lookup. Whitelist rules are honoured.

mod error;

pub mod combiner;
pub mod converter;
pub mod decoder;
pub mod pac;
pub mod parser;
pub mod resources;
pub mod source;
pub mod tld;

// Re-export core types
pub use error::{DecodeError, Error, HostnameError, Result};

// Re-export pipeline stages
pub use combiner::combine_lists;
pub use decoder::{decode_gfwlist, try_decode_base64};
pub use parser::{extract_hostname, is_directive_line, parse_gfwlist, HostnameSet};
pub use tld::TldTable;

// Re-export generation and the end-to-end run
pub use converter::{Config, ConvertStats, Converter};
pub use pac::{PacGenerator, PacMode, PacOutput, PacTemplate};
pub use resources::Resources;
pub use source::{RuleSource, GFWLIST_URL};
