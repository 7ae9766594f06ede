//! Regeneration cache: reuse an artifact unless its source file is newer.
//!
//! Staleness is a pure modification-time comparison. Renderer changes are not
//! detected; delete the artifact (or force) to rebuild after upgrading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::{Error, Result};

/// Directory under the output root that holds every artifact.
pub const VISUALIZATION_DIR: &str = "visualization";

/// Deterministic location of a visualization artifact:
/// `{output_root}/visualization/{tag}_{cluster}_{suffix}.html`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactPath {
    path: PathBuf,
}

impl ArtifactPath {
    pub fn new(output_root: &Path, renderer_tag: &str, cluster_name: &str, extension: &str) -> Self {
        let path = output_root
            .join(VISUALIZATION_DIR)
            .join(Self::file_name(renderer_tag, cluster_name, extension));
        Self { path }
    }

    pub fn file_name(renderer_tag: &str, cluster_name: &str, extension: &str) -> String {
        format!(
            "{renderer_tag}_{cluster_name}_{}.html",
            Self::suffix_for_extension(extension)
        )
    }

    /// `ecom` and `vcom` keep their name; every other input is a `Network`.
    pub fn suffix_for_extension(extension: &str) -> &'static str {
        match extension.trim_start_matches('.') {
            "ecom" => "ecom",
            "vcom" => "vcom",
            _ => "Network",
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

/// Inputs to a cache lookup.
#[derive(Debug, Clone, Copy)]
pub struct CacheKey<'a> {
    pub cluster_name: &'a str,
    pub renderer_tag: &'a str,
    pub source: &'a Path,
    /// Source extension, with or without the leading dot
    pub extension: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheDecision {
    /// Artifact is missing or older than its source
    Generate(ArtifactPath),
    /// Artifact is at least as new as its source
    Reuse(ArtifactPath),
}

impl CacheDecision {
    pub fn must_generate(&self) -> bool {
        matches!(self, CacheDecision::Generate(_))
    }

    pub fn artifact(&self) -> &ArtifactPath {
        match self {
            CacheDecision::Generate(artifact) | CacheDecision::Reuse(artifact) => artifact,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegenerationCache {
    output_root: PathBuf,
}

impl RegenerationCache {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn artifact_path(&self, key: &CacheKey<'_>) -> ArtifactPath {
        ArtifactPath::new(
            &self.output_root,
            key.renderer_tag,
            key.cluster_name,
            key.extension,
        )
    }

    pub fn decide(&self, key: &CacheKey<'_>) -> Result<CacheDecision> {
        let artifact = self.artifact_path(key);

        // Anything that keeps us from reading the artifact counts as absent.
        let artifact_mtime = match fs::metadata(artifact.path()).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            Err(_) => {
                debug!(path = %artifact.path().display(), "artifact missing, generating");
                return Ok(CacheDecision::Generate(artifact));
            }
        };

        let source_mtime = modified(key.source)?;
        debug!(
            source = %key.source.display(),
            artifact = %artifact.path().display(),
            source_mtime = ?source_mtime,
            artifact_mtime = ?artifact_mtime,
            "comparing modification times"
        );

        if source_mtime > artifact_mtime {
            Ok(CacheDecision::Generate(artifact))
        } else {
            Ok(CacheDecision::Reuse(artifact))
        }
    }

    /// `true` when the artifact is absent or older than its source.
    pub fn needs_regeneration(&self, key: &CacheKey<'_>) -> Result<bool> {
        self.decide(key).map(|d| d.must_generate())
    }
}

fn modified(path: &Path) -> Result<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).map_err(|e| {
        Error::from(e)
            .with_operation("cache::decide")
            .with_context("source", path.display().to_string())
    })
}
