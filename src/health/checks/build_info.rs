//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, Details, SystemCheck};

/// Checks that build information is accessible and valid
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (git, rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();

        if build_info::GIT_SHA.is_some() {
            details.ok(format!(
                "Git: {}@{} (dirty: {})",
                build_info::git_branch(),
                build_info::git_sha_short(),
                build_info::is_git_dirty()
            ));
        } else {
            details.info("Git: not built from a checkout");
        }

        details.info(format!("Build time: {}", build_info::BUILD_TIMESTAMP));
        details.info(format!(
            "Rustc: {} ({})",
            build_info::RUSTC_SEMVER,
            build_info::RUSTC_CHANNEL
        ));
        details.info(format!("Target: {}", build_info::CARGO_TARGET_TRIPLE));
        details.info(format!("Opt level: {}", build_info::CARGO_OPT_LEVEL));

        let version = build_info::version_string();
        if version.starts_with(env!("CARGO_PKG_VERSION")) {
            details.ok(format!("Version: {version}"));
        } else {
            details.fail(format!("Version string malformed: {version}"));
        }

        details.finish("Build metadata accessible")
    }
}
