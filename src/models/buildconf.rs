use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hashbrown::HashMap;

use crate::utils::errors::SignError;

// Generated configuration fragments, relative to the build directory. The
// Kconfig output must exist; the devicetree fragment only exists for boards
// with a devicetree.
const KCONFIG_FRAGMENT: &str = "zephyr/.config";
const DTS_FRAGMENT: &str = "zephyr/include/generated/generated_dts_board.conf";

/// Read-only key/value view of the configuration a build was compiled
/// with, merged from its generated Kconfig and devicetree fragments.
pub struct BuildConfiguration {
    options: HashMap<String, String>,
}

impl BuildConfiguration {
    pub fn from_build_dir(build_dir: &Path) -> Result<Self> {
        let mut bcfg = Self {
            options: HashMap::new(),
        };

        let dts_file = build_dir.join(DTS_FRAGMENT);
        if dts_file.exists() {
            bcfg.parse_fragment(&fs::read_to_string(&dts_file)?);
        }

        let kconfig_file = build_dir.join(KCONFIG_FRAGMENT);
        let contents = fs::read_to_string(&kconfig_file)
            .with_context(|| format!("Failed reading build config {}", kconfig_file.display()))?;
        bcfg.parse_fragment(&contents);

        Ok(bcfg)
    }

    /// Merge one `KEY=value` fragment; later fragments win on duplicates.
    fn parse_fragment(&mut self, contents: &str) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim_matches('"');
            self.options.insert(key.to_string(), value.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Look up a required numeric option. The generated fragments mix
    /// decimal and `0x`-prefixed values, so the radix is auto-detected and
    /// callers get a plain integer back.
    pub fn get_int(&self, key: &str) -> Result<i64> {
        let Some(value) = self.get(key) else {
            return Err(SignError::MissingKey(key.to_string()).into());
        };

        parse_int(value).with_context(|| format!("Bad value for {}: {:?}", key, value))
    }
}

fn parse_int(value: &str) -> Result<i64> {
    let parsed = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else if let Some(oct) = value.strip_prefix("0o") {
        i64::from_str_radix(oct, 8)
    } else if let Some(bin) = value.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else {
        value.parse()
    };

    match parsed {
        Ok(v) => Ok(v),
        Err(_) => bail!("not an integer"),
    }
}
