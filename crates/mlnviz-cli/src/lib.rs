//! mlnviz command-line interface.
//!
pub mod config;
pub mod options;
pub mod pipeline;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use mlnviz_core::Result;
use mlnviz_render::RendererKind;

pub use config::Settings;
pub use options::{InputOptions, OutputOptions};
pub use pipeline::{VizRequest, visualize};

/// Options for one mlnviz run: one input, any number of renderers.
#[derive(Debug, Clone)]
pub struct VizOptions {
    pub input: PathBuf,
    pub mapping_dir: PathBuf,
    pub output_root: PathBuf,
    pub renderers: Vec<RendererKind>,
    pub force: bool,
}

impl VizOptions {
    /// Mapping files default to the input's directory, output to `.`.
    pub fn new(input: impl Into<PathBuf>) -> Self {
        let input = input.into();
        let mapping_dir = match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self {
            input,
            mapping_dir,
            output_root: PathBuf::from("."),
            renderers: Vec::new(),
            force: false,
        }
    }

    pub fn with_mapping_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.mapping_dir = dir.into();
        self
    }

    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn with_renderers(mut self, renderers: Vec<RendererKind>) -> Self {
        self.renderers = renderers;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn request(&self, kind: RendererKind) -> VizRequest {
        VizRequest {
            input: self.input.clone(),
            mapping_dir: self.mapping_dir.clone(),
            output_root: self.output_root.clone(),
            kind,
            force: self.force,
        }
    }
}

/// Result of one renderer in a batch.
#[derive(Debug)]
pub struct VizOutcome {
    pub kind: RendererKind,
    pub result: Result<PathBuf>,
}

impl VizOutcome {
    pub fn path(&self) -> Option<&Path> {
        self.result.as_ref().ok().map(PathBuf::as_path)
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// The artifact path, or `false` when the renderer failed.
impl fmt::Display for VizOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "false"),
        }
    }
}

/// Run every requested renderer against the input, in order.
pub fn run_batch(opts: &VizOptions) -> Vec<VizOutcome> {
    info!(
        input = %opts.input.display(),
        renderers = opts.renderers.len(),
        "starting batch"
    );
    opts.renderers
        .iter()
        .map(|&kind| {
            let result = visualize(&opts.request(kind));
            match &result {
                Err(e) if e.kind().is_request_fatal() => {
                    error!(renderer = %kind, error = %e, "input rejected");
                }
                Err(e) => warn!(renderer = %kind, error = %e, "renderer produced no artifact"),
                Ok(_) => {}
            }
            VizOutcome { kind, result }
        })
        .collect()
}
