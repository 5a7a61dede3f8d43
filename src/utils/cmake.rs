use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use hashbrown::HashMap;

pub const CACHE_FILE: &str = "CMakeCache.txt";

/// Read-only view of a build's CMakeCache.txt.
///
/// Entries have the form `KEY:TYPE=VALUE`; the TYPE tag is irrelevant to us
/// and dropped during parsing.
pub struct CMakeCache {
    entries: HashMap<String, String>,
}

impl CMakeCache {
    pub fn from_build_dir(build_dir: &Path) -> Result<Self> {
        Self::from_file(&build_dir.join(CACHE_FILE))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed reading CMake cache {}", path.display()))?;
        Ok(Self::parse(&contents))
    }

    fn parse(contents: &str) -> Self {
        let mut entries = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") || line.starts_with('#') {
                continue;
            }
            // Split on the first ':' and the first '=' after it.
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let Some((_type, value)) = rest.split_once('=') else {
                continue;
            };
            entries.insert(key.to_string(), value.to_string());
        }

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

/// Output artifacts the build advertises through its cached runner
/// configuration. An absent entry means the build does not produce that
/// kind of image.
pub struct BuildOutputs {
    pub bin_file: Option<PathBuf>,
    pub hex_file: Option<PathBuf>,
}

impl BuildOutputs {
    pub fn from_cache(cache: &CMakeCache) -> Self {
        Self {
            bin_file: cache.get("ZEPHYR_RUNNER_CONFIG_KERNEL_BIN").map(PathBuf::from),
            hex_file: cache.get("ZEPHYR_RUNNER_CONFIG_KERNEL_HEX").map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod cmake_tests {
    use super::*;

    const CACHE: &str = "\
# This is the CMakeCache file.
// For build in directory: /tmp/build

ZEPHYR_BASE:PATH=/home/user/zephyr
ZEPHYR_RUNNER_CONFIG_KERNEL_BIN:STRING=zephyr/zephyr.bin
CMAKE_BUILD_TYPE:STRING=
WEIRD_VALUE:STRING=a=b:c
NOT_AN_ENTRY
";

    #[test]
    fn test_parse_cache() {
        let cache = CMakeCache::parse(CACHE);

        assert_eq!(cache.get("ZEPHYR_BASE"), Some("/home/user/zephyr"));
        assert_eq!(cache.get("CMAKE_BUILD_TYPE"), Some(""));
        // Value keeps everything after the first '='
        assert_eq!(cache.get("WEIRD_VALUE"), Some("a=b:c"));
        assert!(!cache.contains("NOT_AN_ENTRY"));
        assert!(!cache.contains("# This is the CMakeCache file."));
    }

    #[test]
    fn test_build_outputs() {
        let cache = CMakeCache::parse(CACHE);
        let outputs = BuildOutputs::from_cache(&cache);

        assert_eq!(outputs.bin_file, Some(PathBuf::from("zephyr/zephyr.bin")));
        assert!(outputs.hex_file.is_none());
    }

    #[test]
    fn test_from_fixture() {
        let cache = CMakeCache::from_build_dir(Path::new("extra/test_files/build")).unwrap();
        assert!(cache.contains("ZEPHYR_BASE"));

        let outputs = BuildOutputs::from_cache(&cache);
        assert!(outputs.bin_file.is_some());
        assert!(outputs.hex_file.is_some());
    }
}
