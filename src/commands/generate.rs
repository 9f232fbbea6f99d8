use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::Colorize;

use crate::catalog::GenerationMode;
use crate::cli::Cli;
use crate::config::{self, Config};
use crate::descriptor;
use crate::normalize::{self, ResizePolicy};
use crate::render;

pub fn run(cli: &Cli, input: &Path, output: &Path, favicon_only: bool, stretch: bool) -> Result<()> {
    let file_name = input.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    if !config::allowed_file(file_name) {
        bail!(
            "Unsupported file format: {} (allowed: {})",
            input.display(),
            config::ALLOWED_EXTENSIONS.join(", ")
        );
    }

    let config = Config::load(&cli.config)?;
    let bytes = fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;

    let policy = if stretch {
        ResizePolicy::Stretch
    } else {
        ResizePolicy::AspectPad
    };
    let mode = if favicon_only {
        GenerationMode::FaviconOnly
    } else {
        GenerationMode::FullSet
    };

    let base = normalize::canonicalize(&bytes, config.render.base_resolution, policy)?;
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut reports = render::render_catalog(&base, mode.entries(), policy, output);
    if mode == GenerationMode::FullSet {
        reports.extend(render::render_apple_folder(&base, policy, output));
    }

    let mut written = 0;
    for report in &reports {
        match &report.outcome {
            Ok(_) => {
                written += 1;
                println!("  {} {}", "✓".green(), report.name);
            }
            Err(err) => println!("  {} {} {}", "!".yellow(), report.name.bold(), err),
        }
    }
    if written == 0 {
        bail!("Every icon failed to render");
    }

    if mode == GenerationMode::FullSet {
        descriptor::write_manifest(output, &config.render.app_name)?;
        println!("  {} {}", "✓".green(), descriptor::MANIFEST_NAME);
        descriptor::write_browserconfig(output, &config.render.tile_color)?;
        println!("  {} {}", "✓".green(), descriptor::BROWSERCONFIG_NAME);
        written += 2;
    }

    println!(
        "\n{} Wrote {} files to {}",
        "✓".green(),
        written,
        output.display()
    );
    Ok(())
}
