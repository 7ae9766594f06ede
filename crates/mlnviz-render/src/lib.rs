//! Renderer dispatch for mlnviz.
//!
//! Each [`RendererKind`] maps to one [`Renderer`] that shapes a parsed
//! dataset into the figure description of a browser plotting library and
//! writes a self-contained HTML page to the artifact path.
//!
//! # Module Structure
//!
//! - [`html`]: page builder and escaping helpers
//! - [`layout`]: deterministic placement and palettes
//! - `renderers`: one module per visualization

pub mod html;
mod kind;
pub mod layout;
mod renderers;

use std::fs;
use std::path::{Path, PathBuf};

use mlnviz_core::{ArtifactPath, DatasetType, InputDataset, LabelMapping};
use tracing::{error, info};

pub use kind::RendererKind;
pub use mlnviz_error::{Error, ErrorKind, Result};
pub use renderers::renderer_for;

/// Everything a renderer needs for one request.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub dataset: &'a InputDataset,
    pub mapping: &'a LabelMapping,
    pub dataset_type: DatasetType,
    /// Display name of the layer, already stripped of the user prefix
    pub cluster_name: &'a str,
    pub artifact: &'a ArtifactPath,
}

pub trait Renderer {
    fn kind(&self) -> RendererKind;

    /// Produce the complete HTML page.
    fn build(&self, ctx: &RenderContext<'_>) -> Result<String>;

    /// Build the page and write it to the artifact path.
    fn render(&self, ctx: &RenderContext<'_>) -> Result<PathBuf> {
        let page = self.build(ctx)?;
        write_artifact(ctx.artifact.path(), &page)?;
        Ok(ctx.artifact.path().to_path_buf())
    }
}

/// Write `contents`, creating the parent directory when missing.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::from(e)
                .with_operation("render::write_artifact")
                .with_context("dir", parent.display().to_string())
        })?;
    }
    fs::write(path, contents).map_err(|e| {
        Error::from(e)
            .with_operation("render::write_artifact")
            .with_context("path", path.display().to_string())
    })
}

/// Run the renderer for `kind` against `ctx`.
///
/// A dataset the renderer cannot draw fails with `UnsupportedInput`; any
/// other failure is re-tagged `RenderFailed`. Failures are logged here and
/// returned, never raised further.
pub fn dispatch(kind: RendererKind, ctx: &RenderContext<'_>) -> Result<PathBuf> {
    let result = if kind.accepts(ctx.dataset.format) {
        renderer_for(kind)
            .render(ctx)
            .map_err(|e| match e.kind() {
                ErrorKind::UnsupportedInput => e,
                _ => e.with_kind(ErrorKind::RenderFailed),
            })
    } else {
        Err(Error::unsupported_input(format!(
            "{kind} cannot draw {} input",
            ctx.dataset.format.extension()
        )))
    };

    match result {
        Ok(path) => {
            info!(renderer = %kind, path = %path.display(), "visualization written");
            Ok(path)
        }
        Err(e) => {
            error!(
                renderer = %kind,
                path = %ctx.artifact.path().display(),
                error = %e,
                "visualization failed"
            );
            Err(e
                .with_operation("render::dispatch")
                .with_context("renderer", kind.name()))
        }
    }
}
