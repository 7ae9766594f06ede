//! Single request pipeline: name → cache → parse → mapping → dispatch.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use mlnviz_core::{
    CacheDecision, CacheKey, DatasetType, Error, InputFormat, LabelMapping, RegenerationCache,
    Result, parse_file,
};
use mlnviz_render::{RenderContext, RendererKind, dispatch};

/// One renderer run against one input file.
#[derive(Debug, Clone)]
pub struct VizRequest {
    pub input: PathBuf,
    pub mapping_dir: PathBuf,
    pub output_root: PathBuf,
    pub kind: RendererKind,
    pub force: bool,
}

/// File name up to its first `.`.
pub fn base_name(input: &Path) -> String {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((base, _)) => base.to_string(),
        None => file_name,
    }
}

/// Owner of the output root: the last or second-to-last `/` component that
/// is non-empty and not hidden.
pub fn user_name(output_root: &Path) -> Option<String> {
    let root = output_root.to_string_lossy();
    let components: Vec<&str> = root.split('/').collect();
    components
        .iter()
        .rev()
        .take(2)
        .find(|c| !c.is_empty() && !c.starts_with('.'))
        .map(|c| c.to_string())
}

/// Base name with every `{user}_` removed.
pub fn cluster_name(base: &str, user: Option<&str>) -> String {
    match user {
        Some(user) => base.replace(&format!("{user}_"), ""),
        None => base.to_string(),
    }
}

/// Produce (or reuse) the artifact for `request` and return its path.
///
/// Parse failures abort the request before any renderer runs. A missing
/// mapping file is not an error.
pub fn visualize(request: &VizRequest) -> Result<PathBuf> {
    let input = request.input.to_string_lossy();
    let format = InputFormat::from_path(&request.input).ok_or_else(|| {
        Error::unsupported_extension(input.to_string()).with_operation("pipeline::visualize")
    })?;
    let dataset_type = DatasetType::detect(&input);

    let base = base_name(&request.input);
    let user = user_name(&request.output_root);
    let cluster = cluster_name(&base, user.as_deref());
    debug!(%base, user = ?user, %cluster, %dataset_type, "resolved names");

    let cache = RegenerationCache::new(&request.output_root);
    let key = CacheKey {
        cluster_name: &cluster,
        renderer_tag: request.kind.artifact_tag(),
        source: &request.input,
        extension: format.extension(),
    };
    let artifact = if request.force {
        cache.artifact_path(&key)
    } else {
        match cache.decide(&key)? {
            CacheDecision::Reuse(artifact) => {
                info!(renderer = %request.kind, path = %artifact.path().display(), "reusing artifact");
                return Ok(artifact.into_path_buf());
            }
            CacheDecision::Generate(artifact) => artifact,
        }
    };

    let dataset = parse_file(&request.input)?;
    let mapping_path = request.mapping_dir.join(format!("{base}.map"));
    let mapping = LabelMapping::load_optional(&mapping_path)?;

    let ctx = RenderContext {
        dataset: &dataset,
        mapping: &mapping,
        dataset_type,
        cluster_name: &cluster,
        artifact: &artifact,
    };
    dispatch(request.kind, &ctx)
}
