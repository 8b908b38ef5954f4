//! System information health check

use sysinfo::System;

use crate::health::check::{CheckResult, CheckStatus, Details, SystemCheck};

/// Checks that system information can be gathered
pub struct SystemInfoCheck;

impl SystemInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for SystemInfoCheck {
    fn name(&self) -> &'static str {
        "System Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates OS, CPU, and memory information gathering")
    }

    fn check(&self) -> CheckResult {
        let mut sys = System::new_all();
        sys.refresh_all();

        let mut details = Details::new();
        let unknown = || "Unknown".to_string();

        details.info(format!(
            "OS: {} {}",
            System::name().unwrap_or_else(unknown),
            System::os_version().unwrap_or_else(unknown)
        ));
        details.info(format!(
            "Kernel: {}",
            System::kernel_version().unwrap_or_else(unknown)
        ));

        let physical_cores = System::physical_core_count().unwrap_or(0);
        let logical_cores = sys.cpus().len();
        if physical_cores == 0 || logical_cores == 0 {
            details.warn("Unable to detect CPU cores");
        } else {
            details.ok(format!(
                "CPU cores: {physical_cores} physical, {logical_cores} logical"
            ));
        }

        let total_memory_gb = sys.total_memory() as f64 / 1_073_741_824.0;
        if total_memory_gb < 1.0 {
            details.warn(format!("Memory: {total_memory_gb:.1} GB total (low)"));
        } else {
            details.ok(format!("Memory: {total_memory_gb:.1} GB total"));
        }

        if let Some(hostname) = System::host_name() {
            details.info(format!("Hostname: {hostname}"));
        }

        let message = match details.status() {
            CheckStatus::Pass => "System info gathered successfully",
            _ => "System info gathered with warnings",
        };
        details.finish(message)
    }
}
