use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};

use mlnviz_core::{CacheKey, RegenerationCache, VISUALIZATION_DIR};
use tempfile::TempDir;

fn set_mtime(path: &Path, mtime: SystemTime) {
    let file = File::options()
        .write(true)
        .open(path)
        .expect("open for mtime update");
    file.set_modified(mtime).expect("set mtime");
}

struct Fixture {
    _dir: TempDir,
    root: std::path::PathBuf,
    source: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dir.path().join("alice");
        fs::create_dir_all(root.join(VISUALIZATION_DIR)).expect("create visualization dir");
        let source = dir.path().join("alice_L1.net");
        fs::write(&source, "L1\n0\n0\n").expect("write source");
        Fixture {
            _dir: dir,
            root,
            source,
        }
    }

    fn key(&self) -> CacheKey<'_> {
        CacheKey {
            cluster_name: "L1",
            renderer_tag: "plotly",
            source: &self.source,
            extension: ".net",
        }
    }

    fn write_artifact(&self) -> std::path::PathBuf {
        let path = self.root.join(VISUALIZATION_DIR).join("plotly_L1_Network.html");
        fs::write(&path, "<html></html>").expect("write artifact");
        path
    }
}

#[test]
fn absent_artifact_must_generate() {
    let fx = Fixture::new();
    let cache = RegenerationCache::new(&fx.root);
    let decision = cache.decide(&fx.key()).unwrap();

    assert!(decision.must_generate());
    assert_eq!(
        decision.artifact().path(),
        fx.root.join("visualization/plotly_L1_Network.html")
    );
}

#[test]
fn artifact_newer_than_source_is_reused() {
    let fx = Fixture::new();
    let artifact = fx.write_artifact();
    let base = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&fx.source, base);
    set_mtime(&artifact, base + Duration::from_secs(60));

    let cache = RegenerationCache::new(&fx.root);
    assert!(!cache.needs_regeneration(&fx.key()).unwrap());
}

#[test]
fn equal_mtimes_are_reused() {
    let fx = Fixture::new();
    let artifact = fx.write_artifact();
    let stamp = SystemTime::now() - Duration::from_secs(600);
    set_mtime(&fx.source, stamp);
    set_mtime(&artifact, stamp);

    let cache = RegenerationCache::new(&fx.root);
    assert!(!cache.needs_regeneration(&fx.key()).unwrap());
}

#[test]
fn artifact_older_than_source_must_generate() {
    let fx = Fixture::new();
    let artifact = fx.write_artifact();
    let base = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&artifact, base);
    set_mtime(&fx.source, base + Duration::from_secs(60));

    let cache = RegenerationCache::new(&fx.root);
    assert!(cache.needs_regeneration(&fx.key()).unwrap());
}

#[test]
fn missing_source_with_existing_artifact_is_an_error() {
    let fx = Fixture::new();
    fx.write_artifact();
    fs::remove_file(&fx.source).unwrap();

    let cache = RegenerationCache::new(&fx.root);
    let err = cache.decide(&fx.key()).unwrap_err();
    assert_eq!(err.kind(), mlnviz_core::ErrorKind::FileNotFound);
}
