use super::*;

#[test]
fn array_reader_is_channel_major() {
    let m = JsonLoader::array_from_reader(&b"[[1, 2, 3], [4, 5, 6]]"[..]).unwrap();
    assert_eq!(m.channels(), 2);
    assert_eq!(m.timesteps(), 3);
    assert_eq!(m.get(1, 0), Some(4.0));
}

#[test]
fn array_reader_rejects_ragged_rows() {
    assert!(JsonLoader::array_from_reader(&b"[[1, 2], [3]]"[..]).is_err());
}

#[test]
fn malformed_json_is_a_data_error() {
    let err = JsonLoader::array_from_reader(&b"{"[..]).unwrap_err();
    assert!(matches!(err, LpuvisError::Data(_)));
}

#[test]
fn missing_file_is_a_data_error() {
    let err = JsonLoader
        .read_topology(Path::new("target/definitely/missing.json"))
        .unwrap_err();
    assert!(err.to_string().contains("open topology"));
}
