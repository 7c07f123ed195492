//! Partition visualization CLI
//!
//! Run with: cargo run --features cli -- [octree|octree-global|quadtree-global]...

use partition_vis::scenario::{self, Scenario};
use partition_vis::{RenderConfig, RunReport};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

const ENV_SCENARIO: &str = "PARTITION_VIS_SCENARIO";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,partition_vis=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = RenderConfig::from_env()?;

    let mut names: Vec<String> = std::env::args().skip(1).collect();
    if names.is_empty() {
        if let Ok(name) = std::env::var(ENV_SCENARIO) {
            names.push(name);
        }
    }
    let scenarios = scenario::select(&names)?;

    for scenario in scenarios {
        let report = match scenario.run(&config) {
            Ok(report) => report,
            Err(err) => {
                error!(scenario = %scenario, error = %err, "Rendering failed");
                return Err(err.into());
            }
        };
        info!(scenario = %scenario, output = %report.output.display(), "Figure saved");

        if config.show {
            show(scenario, &config, &report)?;
        }
    }
    Ok(())
}

#[cfg(feature = "viewer")]
fn show(scenario: Scenario, config: &RenderConfig, report: &RunReport) -> Result<(), Box<dyn std::error::Error>> {
    partition_vis::viewer::show(&report.scene, config.view(scenario.dimension()), &config.style())?;
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn show(scenario: Scenario, _config: &RenderConfig, report: &RunReport) -> Result<(), Box<dyn std::error::Error>> {
    info!(
        scenario = %scenario,
        output = %report.output.display(),
        "Viewer not compiled in (enable the `viewer` feature), figure left on disk"
    );
    Ok(())
}
