use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::utils::cmake::CMakeCache;

pub const DEFAULT_BUILD_DIR: &str = "build";

/// Checks whether a directory holds the artifacts of a Zephyr build,
/// i.e. its CMake cache loads and records a ZEPHYR_BASE.
pub fn is_zephyr_build(build_dir: &Path) -> bool {
    match CMakeCache::from_build_dir(build_dir) {
        Ok(cache) => cache.contains("ZEPHYR_BASE"),
        Err(_) => false,
    }
}

/// Guess a build directory when none was given: a "build" subdirectory of
/// the working directory, then the working directory itself.
pub fn find_build_dir() -> Option<PathBuf> {
    for candidate in [DEFAULT_BUILD_DIR, "."] {
        let path = PathBuf::from(candidate);
        if is_zephyr_build(&path) {
            return Some(path);
        }
    }

    None
}

fn is_shell_safe(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b"_@%+=:,./-".contains(&b))
}

fn quote_sh(token: &str) -> String {
    if is_shell_safe(token) {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

/// Render a command token list the way it could be pasted into a POSIX
/// shell. Only used for diagnostics, so non-UTF-8 tokens are lossy.
pub fn quote_sh_list(cmd: &[OsString]) -> String {
    cmd.iter()
        .map(|t| quote_sh(&t.to_string_lossy()))
        .collect::<Vec<_>>()
        .join(" ")
}
