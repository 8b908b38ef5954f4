//! Health checks for startup validation and CI
//!
//! Each check exercises one subsystem without opening a window: config
//! loading and tuning sanity, a short seeded flight run, build metadata, the
//! host machine, the debug overlay state and adapter availability per render
//! tier. `mini-flight --check` prints the report and exits with its code.
//!
//! # Example
//!
//! ```no_run
//! use mini_flight::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(WorldCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("Ready for takeoff");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, Details, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs every built-in check
///
/// The graphics probe only warns on machines without an adapter, so a
/// headless run can still be healthy.
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::WorldCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::SystemInfoCheck::new())
        .add_check(checks::DebugUICheck::new())
        .add_check(checks::GraphicsBackendCheck::new())
        .run()
}
