//! Optional TOML settings file.
//!
//! ```toml
//! output_root = "/srv/mln/alice"
//! mapping_dir = "/srv/mln/mappings"
//! renderers = ["plotly", "pyvis"]
//! force = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

use mlnviz_core::Error;
use mlnviz_render::RendererKind;

use crate::VizOptions;
use crate::options::{InputOptions, OutputOptions};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub output_root: Option<PathBuf>,
    #[serde(default)]
    pub mapping_dir: Option<PathBuf>,
    #[serde(default)]
    pub renderers: Vec<String>,
    #[serde(default)]
    pub force: Option<bool>,
}

impl Settings {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let settings: Settings =
            toml::from_str(&text).with_context(|| format!("invalid TOML in {}", path.display()))?;
        Ok(settings)
    }

    /// Merge with command-line values; anything given on the command line wins.
    pub fn resolve(
        self,
        input: InputOptions,
        output: OutputOptions,
        renderers: &[String],
    ) -> Result<VizOptions> {
        let input_path = input
            .input
            .context("no input file given (use --input FILE)")?;

        let names = if renderers.is_empty() {
            self.renderers.as_slice()
        } else {
            renderers
        };
        let kinds = parse_renderers(names)?;

        let mut options = VizOptions::new(input_path).with_renderers(kinds);
        if let Some(dir) = input.mapping_dir.or(self.mapping_dir) {
            options = options.with_mapping_dir(dir);
        }
        if let Some(root) = output.output_root.or(self.output_root) {
            options = options.with_output_root(root);
        }
        Ok(options.with_force(output.force || self.force.unwrap_or(false)))
    }
}

pub fn parse_renderers(names: &[String]) -> Result<Vec<RendererKind>> {
    names
        .iter()
        .map(|name| {
            RendererKind::from_str(name.trim())
                .map_err(|_| Error::unsupported_renderer(name.trim()))
                .context("see --list for the known renderers")
        })
        .collect()
}
