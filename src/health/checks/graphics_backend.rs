//! Graphics backend health check

use crate::app::renderer::{RenderTier, create_instance};
use crate::health::check::{CheckResult, Details, SystemCheck};

/// Probes every render tier for an adapter without opening a window
///
/// Headless machines commonly have no adapter at all, so an empty probe is a
/// warning rather than a failure.
pub struct GraphicsBackendCheck;

impl GraphicsBackendCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphicsBackendCheck {
    fn default() -> Self {
        Self::new()
    }
}

fn device_type_name(device_type: wgpu::DeviceType) -> &'static str {
    match device_type {
        wgpu::DeviceType::DiscreteGpu => "Discrete GPU",
        wgpu::DeviceType::IntegratedGpu => "Integrated GPU",
        wgpu::DeviceType::VirtualGpu => "Virtual GPU",
        wgpu::DeviceType::Cpu => "CPU",
        wgpu::DeviceType::Other => "Other",
    }
}

impl SystemCheck for GraphicsBackendCheck {
    fn name(&self) -> &'static str {
        "Graphics Backend"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates wgpu instance creation and adapter availability per render tier")
    }

    fn check(&self) -> CheckResult {
        let mut details = Details::new();

        let runtime = match tokio::runtime::Builder::new_current_thread().build() {
            Ok(runtime) => runtime,
            Err(e) => {
                details.fail(format!("Could not start probe runtime: {e}"));
                return details.finish("Adapter probe could not run");
            }
        };

        let instance = create_instance();
        details.ok("wgpu instance created");

        let mut available = Vec::new();
        for tier in RenderTier::ALL {
            match runtime.block_on(instance.request_adapter(&tier.adapter_options(None))) {
                Ok(adapter) => {
                    let info = adapter.get_info();
                    details.ok(format!(
                        "Tier {tier}: {} - {} ({:?})",
                        info.name,
                        device_type_name(info.device_type),
                        info.backend
                    ));
                    available.push(tier);
                }
                Err(e) => details.warn(format!("Tier {tier}: no adapter ({e})")),
            }
        }

        match available.first() {
            Some(RenderTier::Accelerated) => {
                details.finish(format!("{} of 3 tiers available (accelerated)", available.len()))
            }
            Some(best) => details.finish(format!("Best available tier: {best}")),
            None => details.finish("No graphics adapter found (headless?)"),
        }
    }
}
