//! PAC script generation.

mod generator;
mod template;

pub use generator::{filter_precise_rules, PacGenerator, PacMode, PacOutput};
pub use template::{PacTemplate, DOMAINS_PLACEHOLDER, PROXY_PLACEHOLDER, RULES_PLACEHOLDER};
