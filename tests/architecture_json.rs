use cnn_geometry::{ArchitectureSpec, GeometryError, InputShape, LayerDescriptor, LayerKind};

const EXPORTED: &str = r#"{
  "input": { "H": 224, "W": 160, "C": 3 },
  "layers": [
    { "type": "conv", "k": 7, "s": 2, "p": 3, "d": 1, "outC": 64 },
    { "type": "maxpool", "k": 3, "s": 2, "p": 1, "d": 1, "outC": null },
    { "type": "avgpool", "k": 2, "s": 2, "p": 0, "d": 1, "outC": null },
    { "type": "fc", "k": 1, "s": 1, "p": 0, "d": 1, "outC": 1000 }
  ]
}"#;

#[test]
fn test_parses_exported_document() {
    let spec = ArchitectureSpec::from_json_str(EXPORTED).unwrap();

    assert_eq!(spec.input, InputShape::new(224, 160, 3).unwrap());
    assert_eq!(spec.layers.len(), 4);
    assert_eq!(spec.layers[0], LayerDescriptor::conv(7, 2, 3, 1, 64).unwrap());
    assert_eq!(spec.layers[1].kind(), LayerKind::MaxPool);
    assert_eq!(spec.layers[2].kind(), LayerKind::AvgPool);
    assert_eq!(spec.layers[3], LayerDescriptor::fully_connected(1000).unwrap());
}

#[test]
fn test_reserialized_document_is_unchanged() {
    let spec = ArchitectureSpec::from_json_str(EXPORTED).unwrap();
    let json = spec.to_json_pretty().unwrap();

    let original: serde_json::Value = serde_json::from_str(EXPORTED).unwrap();
    let written: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(original, written);
    assert!(json.contains(r#""outC": null"#));
}

#[test]
fn test_save_load_round_trip_gives_identical_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cnn_architecture.json");

    let spec = ArchitectureSpec::from_json_str(EXPORTED).unwrap();
    spec.save_json(&path).unwrap();
    let loaded = ArchitectureSpec::load_json(&path).unwrap();

    assert_eq!(loaded, spec);
    let before = serde_json::to_string(&spec.compute()).unwrap();
    let after = serde_json::to_string(&loaded.compute()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_row_json_shape() {
    let spec = ArchitectureSpec::new(
        InputShape::new(3, 3, 1).unwrap(),
        vec![LayerDescriptor::conv(5, 1, 0, 1, 8).unwrap()],
    );
    let value = serde_json::to_value(spec.compute()).unwrap();
    let row = &value[0];

    assert_eq!(row["index"], 1);
    assert_eq!(row["layer"]["type"], "conv");
    assert_eq!(row["output"]["height"], -1);
    assert_eq!(row["output"]["channels"], 8);
    assert_eq!(row["receptive_field"]["width"], 5);
    assert_eq!(row["warning"], "output <= 0 (check k/p/s/d)");
}

#[test]
fn test_rejects_invalid_layer_values() {
    let zero_stride = r#"{"input":{"H":8,"W":8,"C":1},"layers":[{"type":"conv","k":3,"s":0,"p":0,"d":1,"outC":4}]}"#;
    let negative_pad = r#"{"input":{"H":8,"W":8,"C":1},"layers":[{"type":"maxpool","k":2,"s":2,"p":-1,"d":1,"outC":null}]}"#;
    let fc_without_units = r#"{"input":{"H":8,"W":8,"C":1},"layers":[{"type":"fc","outC":null}]}"#;

    for doc in [zero_stride, negative_pad, fc_without_units] {
        let err = ArchitectureSpec::from_json_str(doc).unwrap_err();
        assert!(matches!(err, GeometryError::Json(_)), "unexpected error for {doc}: {err}");
    }
}

#[test]
fn test_rejects_non_positive_input() {
    let doc = r#"{"input":{"H":0,"W":8,"C":1},"layers":[]}"#;
    let err = ArchitectureSpec::from_json_str(doc).unwrap_err();
    assert!(err.to_string().contains("input H must be at least 1"));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArchitectureSpec::load_json(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, GeometryError::Io(_)));
}

#[test]
fn test_editing_returns_new_snapshots() {
    let base = ArchitectureSpec::example(InputShape::default());
    let extra = LayerDescriptor::fully_connected(2).unwrap();

    let grown = base.with_layer(extra);
    assert_eq!(grown.layers.len(), base.layers.len() + 1);
    assert_eq!(grown.layers.last(), Some(&extra));

    let shrunk = base.without_layer(0);
    assert_eq!(shrunk.layers.len(), base.layers.len() - 1);
    assert_eq!(shrunk.layers[..], base.layers[1..]);

    assert_eq!(base.without_layer(99), base);
    assert!(base.cleared().layers.is_empty());
    assert_eq!(base.cleared().input, base.input);

    let resized = base.with_input(InputShape::new(64, 64, 3).unwrap());
    assert_eq!(resized.compute()[0].output.height, 64);
    assert_eq!(base.layers.len(), 8);
}

#[test]
fn test_import_replaces_only_present_sections() {
    let current = ArchitectureSpec::example(InputShape::new(64, 64, 3).unwrap());

    let layers_only = r#"{"layers":[{"type":"fc","k":1,"s":1,"p":0,"d":1,"outC":5}]}"#;
    let patched = current.with_import(layers_only).unwrap();
    assert_eq!(patched.input, current.input);
    assert_eq!(patched.layers, vec![LayerDescriptor::fully_connected(5).unwrap()]);

    let input_only = r#"{"input":{"H":8,"W":4,"C":1}}"#;
    let patched = current.with_import(input_only).unwrap();
    assert_eq!(patched.input, InputShape::new(8, 4, 1).unwrap());
    assert_eq!(patched.layers, current.layers);

    assert!(current.with_import("not json").is_err());
}
