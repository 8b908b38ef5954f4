use std::process::ExitCode;

use clap::Parser;
use mini_flight::app::App;
use mini_flight::build_info;
use mini_flight::config::AppConfig;
use mini_flight::health;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn";

/// Keep the craft airborne and reach the destination
#[derive(Debug, Parser)]
#[command(name = "mini-flight", version, about)]
struct Cli {
    /// Config profile to load (defaults to APP_PROFILE, then "release")
    #[arg(long)]
    profile: Option<String>,

    /// Fixed RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Skip hardware adapters and render with the software fallback
    #[arg(long)]
    software: bool,

    /// Run the health checks, print the report and exit
    #[arg(long)]
    check: bool,

    /// Print details for every health check, not only failing ones
    #[arg(long, requires = "check")]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> AppConfig {
        let loaded = match &self.profile {
            Some(profile) => AppConfig::load(profile),
            None => AppConfig::load_from_env(),
        };
        let config = loaded.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        self.apply_overrides(config)
    }

    /// Applies command-line overrides and rejects unplayable tuning
    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if self.seed.is_some() {
            config.game.seed = self.seed;
        }
        config.renderer.force_software |= self.software;
        config.into_playable()
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    info!(version = %build_info::version_string(), "Mini Flight");

    if cli.check {
        let report = health::run_all_checks();
        health::print_report(&report, cli.verbose);
        return Ok(report.process_exit_code());
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cli.load_config());
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal_error() {
        error!(error = %e, "Exited after fatal error");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_requires_check() {
        assert!(Cli::try_parse_from(["mini-flight", "--verbose"]).is_err());
        let cli = Cli::try_parse_from(["mini-flight", "--check", "--verbose"]).unwrap();
        assert!(cli.check && cli.verbose);
    }

    #[test]
    fn test_unplayable_tuning_is_replaced_before_the_first_tick() {
        let cli = Cli::try_parse_from(["mini-flight", "--seed", "4"]).unwrap();
        let mut hostile = AppConfig::default();
        hostile.game.craft.ceiling_y = 500.0;
        hostile.game.pacing.max_frame_ms = -5.0;

        let config = cli.apply_overrides(hostile);
        assert!(config.game.is_playable());
        assert_eq!(config.game.seed, Some(4));

        let mut world = mini_flight::sim::World::with_flight(config.game);
        world.tick(1.0 / 60.0);
        assert_eq!(world.tick_count(), 1);
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli =
            Cli::try_parse_from(["mini-flight", "--profile", "nope", "--seed", "12", "--software"])
                .unwrap();
        let config = cli.load_config();
        assert_eq!(config.game.seed, Some(12));
        assert!(config.renderer.force_software);
    }
}
