use std::path::Path;

use anyhow::Context;
use helm2bundle_build::output::{self, existing_outputs, write_outputs};
use helm2bundle_build::{DockerfileGenerator, ServiceBundleDescriptor, extract_chart};
use helm2bundle_core::BundleConfig;

/// Generate `apb.yml` and `Dockerfile` in the working directory for `chart_file`.
pub fn package(chart_file: &str, force: bool) -> anyhow::Result<()> {
    let work_dir = Path::new(".");

    // Refuse before touching the archive, unless --force
    if !force {
        let existing = existing_outputs(work_dir).context("could not check for existing files")?;
        if !existing.is_empty() {
            anyhow::bail!(
                "use --force to overwrite existing {} and/or {}",
                output::APB_FILE,
                output::DOCKERFILE
            );
        }
    }

    let config = BundleConfig::load(work_dir)?;

    let chart = extract_chart(chart_file).context("could not get values from helm chart")?;
    tracing::info!(chart = chart.name(), archive = chart.archive_file_name(), "read chart");

    let descriptor = ServiceBundleDescriptor::from_extraction(&chart);
    let dockerfile = DockerfileGenerator::new(&config.build, chart.archive_file_name()).render();

    let written = write_outputs(work_dir, &descriptor, &dockerfile, force)
        .context("could not write bundle files")?;

    for path in &written {
        if let Some(name) = path.file_name() {
            println!("Created {}", name.to_string_lossy());
        }
    }

    Ok(())
}
