//! Read-only data the converter runs against.
//!
//! The bundle is compiled into the binary. A directory with the same file
//! names can replace it at runtime.

use std::fs;
use std::path::Path;

use crate::pac::{PacGenerator, PacTemplate};
use crate::tld::TldTable;
use crate::Result;

/// File name of the builtin rule list.
pub const BUILTIN_FILE: &str = "builtin.txt";
/// File name of the public suffix table.
pub const TLD_FILE: &str = "tld.txt";
/// File name of the fast (O(1) lookup) template.
pub const FAST_TEMPLATE_FILE: &str = "proxy.pac";
/// File name of the precise (adblock matching) template.
pub const PRECISE_TEMPLATE_FILE: &str = "abp.js";

const BUNDLED_BUILTIN: &str = include_str!("../resources/builtin.txt");
const BUNDLED_TLD: &str = include_str!("../resources/tld.txt");
const BUNDLED_FAST_TEMPLATE: &str = include_str!("../resources/proxy.pac");
const BUNDLED_PRECISE_TEMPLATE: &str = include_str!("../resources/abp.js");

/// Builtin rules, public suffix table and PAC templates.
#[derive(Debug, Clone)]
pub struct Resources {
    /// Rules appended after the gfwlist
    pub builtin_rules: String,
    /// Public suffix table for domain reduction
    pub tld_table: TldTable,
    /// Template for fast mode
    pub fast_template: PacTemplate,
    /// Template for precise mode
    pub precise_template: PacTemplate,
}

impl Resources {
    /// Resources compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            builtin_rules: BUNDLED_BUILTIN.to_string(),
            tld_table: TldTable::from_text(BUNDLED_TLD),
            fast_template: PacTemplate::new(BUNDLED_FAST_TEMPLATE),
            precise_template: PacTemplate::new(BUNDLED_PRECISE_TEMPLATE),
        }
    }

    /// Load resources from a directory.
    ///
    /// All four files must be present.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| fs::read_to_string(dir.join(name));

        let resources = Self {
            builtin_rules: read(BUILTIN_FILE)?,
            tld_table: TldTable::from_text(&read(TLD_FILE)?),
            fast_template: PacTemplate::new(read(FAST_TEMPLATE_FILE)?),
            precise_template: PacTemplate::new(read(PRECISE_TEMPLATE_FILE)?),
        };

        log::debug!(
            "Loaded resources from {:?}: {} public suffixes",
            dir,
            resources.tld_table.len()
        );

        Ok(resources)
    }

    /// Build a PAC generator from the two templates.
    pub fn generator(&self) -> PacGenerator {
        PacGenerator::new(self.fast_template.clone(), self.precise_template.clone())
    }
}

impl Default for Resources {
    fn default() -> Self {
        Self::bundled()
    }
}
