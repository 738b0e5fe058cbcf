use super::*;
use crate::foundation::core::Matrix;
use crate::panel::kind::PlotKind;
use crate::source::topology::{NodeAttrs, Topology};

struct FakeLoader;

impl DataLoader for FakeLoader {
    fn read_array(&self, path: &Path) -> LpuvisResult<Matrix> {
        assert!(path.starts_with("/proj"), "unresolved path {}", path.display());
        Matrix::from_rows(vec![vec![0.0, 1.0, 0.0, 1.0]; 3])
    }

    fn read_topology(&self, path: &Path) -> LpuvisResult<Topology> {
        assert_eq!(path, Path::new("/proj/gexf/lpu.json"));
        Topology::new(vec![
            NodeAttrs::new(5, true).with_name("R1"),
            NodeAttrs::new(2, true).with_name("R1"),
            NodeAttrs::new(9, true).with_name("R2"),
        ])
    }
}

const PROJECT: &str = r#"{
    "config": { "fps": 10, "update_interval": 1, "title": "demo" },
    "sources": [
        { "name": "lpu", "data": "out/spikes.json", "topology": "gexf/lpu.json" },
        { "name": "stim", "data": "in.json", "input": true, "window": { "start": 1 } }
    ],
    "panels": [
        { "source": "lpu", "names": ["R1"], "type": "raster", "xlabel": "t", "bogus": 3 },
        { "source": "input_stim", "kind": "image", "shape": [3, 1], "trans": true }
    ]
}"#;

#[test]
fn project_json_parses_flattened_panel_options() {
    let project = ProjectFile::from_json(PROJECT).unwrap();
    assert_eq!(project.config.fps, 10);
    assert_eq!(project.config.codec, "libtheora");
    assert_eq!(project.sources.len(), 2);
    assert_eq!(project.sources[1].window.map(|w| w.start), Some(1));

    let raster = &project.panels[0];
    assert_eq!(raster.names, vec!["R1".to_string()]);
    assert_eq!(raster.config.kind.as_deref(), Some("raster"));
    assert_eq!(raster.config.style.xlabel.as_deref(), Some("t"));
    assert!(raster.config.extra.contains_key("bogus"));

    let image = &project.panels[1];
    assert_eq!(image.config.shape, Some([3, 1]));
    assert!(image.config.transpose);
}

#[test]
fn build_resolves_paths_against_the_project_dir() {
    let vis = ProjectFile::from_json(PROJECT)
        .unwrap()
        .build(Path::new("/proj"), &FakeLoader)
        .unwrap();
    assert_eq!(vis.registry().len(), 2);
    assert_eq!(vis.registry().maxt(), Some(3));

    let specs = vis.panel_specs();
    assert_eq!(specs.len(), 2);
    assert_eq!(specs[0].kind, PlotKind::Raster);
    assert_eq!(specs[0].groups, vec![vec![2, 5]]);
    assert_eq!(specs[1].source, "input_stim");
}

#[test]
fn font_path_is_resolved_against_the_project_dir() {
    let text = PROJECT.replace(r#""title": "demo""#, r#""title": "demo", "font": "fonts/a.ttf""#);
    let vis = ProjectFile::from_json(&text)
        .unwrap()
        .build(Path::new("/proj"), &FakeLoader)
        .unwrap();
    assert_eq!(vis.config().font.as_deref(), Some(Path::new("/proj/fonts/a.ttf")));
}

#[test]
fn malformed_project_is_a_configuration_error() {
    let err = ProjectFile::from_json(r#"{ "sources": 3 }"#).unwrap_err();
    assert!(matches!(err, LpuvisError::Configuration(_)));
}

#[test]
fn missing_project_file_is_a_data_error() {
    let err = ProjectFile::read(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, LpuvisError::Data(_)));
}
