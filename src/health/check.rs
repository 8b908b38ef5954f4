//! Core health check trait and types

use std::time::Duration;

/// Status of a system check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    /// Check passed successfully
    Pass,
    /// Check passed with warnings
    Warn,
    /// Check failed
    Fail,
}

impl CheckStatus {
    /// Returns true if the check passed (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Warn)
    }

    /// Returns true if the check failed
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckStatus::Pass => "PASS".green().to_string(),
            CheckStatus::Warn => "WARN".yellow().to_string(),
            CheckStatus::Fail => "FAIL".red().to_string(),
        }
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// The status of the check
    pub status: CheckStatus,
    /// Brief message describing the result
    pub message: String,
    /// Optional detailed information
    pub details: Option<String>,
    /// How long the check took
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            duration: Duration::ZERO,
        }
    }

    /// Creates a passing check result
    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    /// Creates a warning check result
    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    /// Creates a failing check result
    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    /// Adds optional details to the result
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the duration for this check
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Line-by-line detail log that tracks the worst status seen
#[derive(Debug, Default)]
pub struct Details {
    lines: Vec<String>,
    worst: Option<CheckStatus>,
}

impl Details {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, status: CheckStatus, marker: &str, line: impl AsRef<str>) {
        self.lines.push(format!("  {marker} {}", line.as_ref()));
        self.worst = Some(self.worst.map_or(status, |worst| worst.max(status)));
    }

    pub fn ok(&mut self, line: impl AsRef<str>) {
        self.record(CheckStatus::Pass, "✓", line);
    }

    pub fn warn(&mut self, line: impl AsRef<str>) {
        self.record(CheckStatus::Warn, "⚠", line);
    }

    pub fn fail(&mut self, line: impl AsRef<str>) {
        self.record(CheckStatus::Fail, "✗", line);
    }

    /// Unmarked informational line
    pub fn info(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("  {}", line.as_ref()));
    }

    /// Worst status recorded so far (Pass when nothing was recorded)
    pub fn status(&self) -> CheckStatus {
        self.worst.unwrap_or(CheckStatus::Pass)
    }

    /// Builds a result with the worst recorded status and the given message
    pub fn finish(self, message: impl Into<String>) -> CheckResult {
        CheckResult::with_status(self.status(), message).with_details(self.lines.join("\n"))
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    /// Perform the health check
    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_track_worst_status() {
        let mut details = Details::new();
        assert_eq!(details.status(), CheckStatus::Pass);

        details.ok("fine");
        details.warn("hmm");
        details.info("context");
        details.ok("fine again");
        assert_eq!(details.status(), CheckStatus::Warn);

        details.fail("broken");
        let result = details.finish("done");
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.details.as_deref().map(|d| d.lines().count()), Some(5));
    }
}
