use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use mlnviz_cli::{VizOptions, VizRequest, run_batch, visualize};
use mlnviz_core::ErrorKind;
use mlnviz_render::RendererKind;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const NET: &str = "\
alice_L1
3
2
0
1
2
0,1,1.0
1,2,2.0
";

struct Workspace {
    _dir: TempDir,
    input: PathBuf,
    output_root: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        let input = data.join("alice_L1.net");
        fs::write(&input, NET).unwrap();
        let output_root = dir.path().join("alice");
        fs::create_dir_all(&output_root).unwrap();
        Workspace {
            _dir: dir,
            input,
            output_root,
        }
    }

    fn options(&self, renderers: Vec<RendererKind>) -> VizOptions {
        VizOptions::new(&self.input)
            .with_output_root(&self.output_root)
            .with_renderers(renderers)
    }

    fn request(&self, kind: RendererKind) -> VizRequest {
        self.options(vec![kind]).request(kind)
    }

    fn artifact(&self, name: &str) -> PathBuf {
        self.output_root.join("visualization").join(name)
    }
}

fn set_mtime(path: &Path, mtime: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

#[test]
fn cluster_name_drops_the_user_prefix() {
    let ws = Workspace::new();
    let path = visualize(&ws.request(RendererKind::Plotly)).unwrap();
    assert_eq!(path, ws.artifact("plotly_L1_Network.html"));
    assert!(path.exists());
}

#[test]
fn failing_renderer_does_not_stop_the_batch() {
    let ws = Workspace::new();
    let outcomes = run_batch(&ws.options(vec![
        RendererKind::Map,
        RendererKind::WordCloud,
        RendererKind::Pyvis,
    ]));

    assert_eq!(outcomes.len(), 3);
    let map = outcomes[0].result.as_ref().unwrap_err();
    assert_eq!(map.kind(), ErrorKind::UnsupportedInput);
    assert_eq!(outcomes[0].to_string(), "false");
    let cloud = outcomes[1].result.as_ref().unwrap_err();
    assert_eq!(cloud.kind(), ErrorKind::UnsupportedInput);
    assert_eq!(outcomes[2].path(), Some(ws.artifact("pyvis_L1_Network.html").as_path()));
}

#[test]
fn fresh_artifact_is_reused_without_rendering() {
    let ws = Workspace::new();
    let first = visualize(&ws.request(RendererKind::Bokeh)).unwrap();

    fs::write(&first, "cached").unwrap();
    let base = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&ws.input, base);
    set_mtime(&first, base + Duration::from_secs(10));

    let second = visualize(&ws.request(RendererKind::Bokeh)).unwrap();
    assert_eq!(second, first);
    assert_eq!(fs::read_to_string(&second).unwrap(), "cached");
}

#[test]
fn stale_or_forced_artifacts_are_rebuilt() {
    let ws = Workspace::new();
    let path = visualize(&ws.request(RendererKind::Plotly)).unwrap();
    fs::write(&path, "old").unwrap();

    let base = SystemTime::now() - Duration::from_secs(3600);
    set_mtime(&path, base);
    set_mtime(&ws.input, base + Duration::from_secs(10));
    visualize(&ws.request(RendererKind::Plotly)).unwrap();
    assert!(fs::read_to_string(&path).unwrap().starts_with("<!DOCTYPE html>"));

    fs::write(&path, "old").unwrap();
    let mut forced = ws.request(RendererKind::Plotly);
    forced.force = true;
    visualize(&forced).unwrap();
    assert!(fs::read_to_string(&path).unwrap().starts_with("<!DOCTYPE html>"));
}

#[test]
fn mapping_file_next_to_the_input_supplies_labels() {
    let ws = Workspace::new();
    let mapping = ws.input.with_file_name("alice_L1.map");
    fs::write(&mapping, "id,label\n0,Chicago\n1,Boston\n").unwrap();

    let path = visualize(&ws.request(RendererKind::Pyvis)).unwrap();
    let html = fs::read_to_string(path).unwrap();
    assert!(html.contains("Chicago"));
    assert!(html.contains("Node 2"));
}

#[test]
fn parse_errors_abort_before_rendering() {
    let ws = Workspace::new();
    fs::write(&ws.input, "alice_L1\n3\n1\n0\n1\n2\n0;1;1.0\n").unwrap();

    let err = visualize(&ws.request(RendererKind::Plotly)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ParseFailed);
    assert!(!ws.artifact("plotly_L1_Network.html").exists());
}
