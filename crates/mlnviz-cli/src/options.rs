//! Shared CLI options for mlnviz.

use std::path::PathBuf;

use clap::Args;

/// Where the layer file and its label mapping come from.
#[derive(Args, Debug, Clone, Default)]
pub struct InputOptions {
    /// Layer file to visualize (.net, .ecom or .vcom)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory holding `{base}.map` label files.
    /// Defaults to the input file's directory.
    #[arg(short = 'm', long = "mapping-dir", value_name = "DIR")]
    pub mapping_dir: Option<PathBuf>,
}

/// Where artifacts go and whether cached ones may be reused.
#[derive(Args, Debug, Clone, Default)]
pub struct OutputOptions {
    /// User output root; artifacts land in `{root}/visualization/`
    #[arg(short = 'o', long = "output-root", value_name = "DIR")]
    pub output_root: Option<PathBuf>,

    /// Regenerate even when a fresh artifact exists
    #[arg(long)]
    pub force: bool,
}

impl InputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn with_mapping_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mapping_dir = Some(dir.into());
        self
    }
}

impl OutputOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = Some(root.into());
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}
