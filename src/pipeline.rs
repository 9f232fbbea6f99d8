//! One request, start to finish: normalize the upload, render the catalog,
//! write the descriptors, and package the result. Stages run strictly in
//! order; any failure propagates and the working-directory guard cleans up.

use std::path::PathBuf;

use image::ImageFormat;

use crate::archive;
use crate::catalog::GenerationMode;
use crate::config::Config;
use crate::descriptor;
use crate::error::Error;
use crate::normalize::{self, ResizePolicy};
use crate::render;
use crate::workdir::WorkDir;

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    pub mode: GenerationMode,
    pub policy: ResizePolicy,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub id: String,
    /// Set for full-set runs: the archive file name under the temp root.
    pub archive_name: Option<String>,
    /// Set for favicon-only runs: the ICO inside the kept working directory.
    pub favicon_path: Option<PathBuf>,
    pub rendered: usize,
    pub failed: usize,
}

pub fn run(config: &Config, upload: &[u8], opts: &GenerateOptions) -> Result<PipelineOutput, Error> {
    let work = WorkDir::create(&config.server.temp_dir)?;
    let id = work.id().to_string();

    let base = normalize::canonicalize(upload, config.render.base_resolution, opts.policy)?;
    base.save_with_format(work.path().join("original.png"), ImageFormat::Png)
        .map_err(|e| Error::encode("original.png", e))?;

    let mut reports = render::render_catalog(&base, opts.mode.entries(), opts.policy, work.path());

    match opts.mode {
        GenerationMode::FaviconOnly => {
            // The ICO is the deliverable; a failed entry fails the request.
            let report = reports
                .pop()
                .ok_or_else(|| Error::encode("favicon.ico", "catalog is empty"))?;
            let favicon_path = report.outcome?;
            work.keep();
            Ok(PipelineOutput {
                id,
                archive_name: None,
                favicon_path: Some(favicon_path),
                rendered: 1,
                failed: 0,
            })
        }
        GenerationMode::FullSet => {
            reports.extend(render::render_apple_folder(&base, opts.policy, work.path()));
            descriptor::write_manifest(work.path(), &config.render.app_name)?;
            descriptor::write_browserconfig(work.path(), &config.render.tile_color)?;

            let rendered = reports.iter().filter(|r| r.is_ok()).count();
            let failed = reports.len() - rendered;
            if rendered == 0 {
                return Err(Error::encode("icon set", "every catalog entry failed"));
            }
            if failed > 0 {
                tracing::warn!(id = %id, failed, "shipping a partial icon set");
            }

            let zip_name = archive::archive_name(&id);
            archive::pack(work.path(), &config.server.temp_dir.join(&zip_name))?;
            drop(work);

            Ok(PipelineOutput {
                id,
                archive_name: Some(zip_name),
                favicon_path: None,
                rendered,
                failed,
            })
        }
    }
}
