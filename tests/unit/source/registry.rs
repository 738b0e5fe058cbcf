use super::*;
use crate::source::io::JsonLoader;
use crate::source::topology::NodeAttrs;

fn matrix(channels: usize, timesteps: usize) -> Matrix {
    Matrix::from_vec(channels, timesteps, vec![0.0; channels * timesteps]).unwrap()
}

fn topology() -> Topology {
    Topology::new(vec![NodeAttrs::new(0, true), NodeAttrs::new(1, true)]).unwrap()
}

#[test]
fn maxt_is_minimum_over_sources() {
    let mut r = SourceRegistry::new();
    r.register(SourceDesc::input("a", matrix(1, 120)), &JsonLoader)
        .unwrap();
    r.register(SourceDesc::input("b", matrix(1, 95)), &JsonLoader)
        .unwrap();
    r.register(SourceDesc::input("c", matrix(1, 200)), &JsonLoader)
        .unwrap();
    assert_eq!(r.maxt(), Some(95));
}

#[test]
fn window_is_applied_before_maxt() {
    let mut r = SourceRegistry::new();
    let desc = SourceDesc::input("a", matrix(2, 100)).with_window(TimeWindow::range(10, 40));
    let id = r.register(desc, &JsonLoader).unwrap();
    assert_eq!(r.source(&id).unwrap().data().timesteps(), 30);
    assert_eq!(r.maxt(), Some(30));
}

#[test]
fn conflicting_topology_inputs_are_rejected() {
    let mut r = SourceRegistry::new();
    let desc = SourceDesc::measured("lam", matrix(2, 4), topology()).with_topology_path("x.json");
    let err = r.register(desc, &JsonLoader).unwrap_err();
    assert!(matches!(err, LpuvisError::Configuration(_)));
    assert!(r.is_empty());
}

#[test]
fn source_naming_and_kinds() {
    let mut r = SourceRegistry::new();
    let measured = r
        .register(SourceDesc::measured("lamina", matrix(2, 4), topology()), &JsonLoader)
        .unwrap();
    let input = r
        .register(SourceDesc::input("vision", matrix(2, 4)), &JsonLoader)
        .unwrap();
    let mut unnamed = SourceDesc::input("x", matrix(1, 4));
    unnamed.name = None;
    let unnamed = r.register(unnamed, &JsonLoader).unwrap();

    assert_eq!(measured, "lamina");
    assert_eq!(input, "input_vision");
    assert_eq!(unnamed, "input_2");
    assert_eq!(r.source("lamina").unwrap().kind(), SourceKind::Measured);
    assert!(r.source("lamina").unwrap().index_map().is_some());
    assert!(r.source("input_vision").unwrap().is_input());
    assert!(r.source("input_vision").unwrap().index_map().is_none());
}

#[test]
fn measured_flag_without_topology_becomes_input() {
    let mut r = SourceRegistry::new();
    let mut desc = SourceDesc::input("retina", matrix(1, 4));
    desc.input = false;
    let id = r.register(desc, &JsonLoader).unwrap();
    assert_eq!(id, "input_retina");
}

#[test]
fn duplicate_and_empty_sources_are_rejected() {
    let mut r = SourceRegistry::new();
    r.register(SourceDesc::input("a", matrix(1, 4)), &JsonLoader)
        .unwrap();
    assert!(
        r.register(SourceDesc::input("a", matrix(1, 4)), &JsonLoader)
            .is_err()
    );
    assert!(
        r.register(SourceDesc::input("b", matrix(0, 0)), &JsonLoader)
            .is_err()
    );
    assert!(r.source("missing").is_err());
}
