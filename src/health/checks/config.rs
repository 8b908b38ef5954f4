//! Configuration system health check

use crate::config::AppConfig;
use crate::health::check::{CheckResult, CheckStatus, Details, SystemCheck};

/// Checks that configuration loads for every profile and that the gameplay
/// tuning it produces is playable
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading and gameplay tuning sanity")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => {
                    details.ok(format!(
                        "Profile '{profile}': loaded (window {}x{}, distance {})",
                        config.window.width, config.window.height, config.game.arena.total_distance
                    ));
                    for problem in config.game.problems() {
                        details.fail(format!("Profile '{profile}': {problem}"));
                    }
                }
                Err(e) => details.fail(format!("Profile '{profile}': failed to load - {e}")),
            }
        }

        match AppConfig::load_from_env() {
            Ok(config) => details.ok(format!("Environment config: profile '{}' loaded", config.profile)),
            Err(e) => details.warn(format!("Environment config: {e}")),
        }

        let message = match details.status() {
            CheckStatus::Fail => "Configuration is missing or unplayable".to_string(),
            CheckStatus::Warn => "Config loaded with warnings".to_string(),
            CheckStatus::Pass => {
                format!("{} profiles validated", self.profiles.len())
            }
        };
        details.finish(message)
    }
}
