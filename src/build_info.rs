//! Build-time information
//!
//! This module provides access to build metadata captured at compile time,
//! including build timestamps, cargo configuration, compiler version and,
//! when the crate is built from a git checkout, the commit it was built from.

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-unknown-linux-gnu, x86_64-apple-darwin)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// Rust compiler version (e.g., 1.75.0)
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Rust channel (stable, beta, or nightly)
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

/// Full commit SHA, absent outside a git checkout
pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

/// Branch name, absent outside a git checkout
pub const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");

const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");

/// First 7 characters of the commit SHA, or "unknown"
pub fn git_sha_short() -> &'static str {
    match GIT_SHA {
        Some(sha) if sha.len() >= 7 && sha.is_char_boundary(7) => &sha[..7],
        Some(sha) if !sha.is_empty() => sha,
        _ => "unknown",
    }
}

/// Branch name, or "unknown"
pub fn git_branch() -> &'static str {
    GIT_BRANCH.filter(|b| !b.is_empty()).unwrap_or("unknown")
}

/// Whether the working tree had uncommitted changes at build time
pub fn is_git_dirty() -> bool {
    GIT_DIRTY == Some("true")
}

/// Returns a formatted build version string
///
/// Format: `{package_version}+{sha}-{target_triple}-opt{opt_level}`
/// Example: `0.1.0+1a2b3c4-x86_64-unknown-linux-gnu-opt0`
pub fn version_string() -> String {
    format!(
        "{}+{}-{}-opt{}",
        env!("CARGO_PKG_VERSION"),
        git_sha_short(),
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL
    )
}

/// Returns a detailed build info string
///
/// Includes git state, build timestamp, target, optimization level, and
/// compiler version
pub fn detailed_info() -> String {
    format!(
        "Git: {}@{}{}\nBuilt: {}\nTarget: {}\nOptimization: {}\nRustc: {} ({})",
        git_branch(),
        git_sha_short(),
        if is_git_dirty() { " (dirty)" } else { "" },
        BUILD_TIMESTAMP,
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL,
        RUSTC_SEMVER,
        RUSTC_CHANNEL
    )
}
