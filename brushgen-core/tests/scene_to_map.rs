use std::fs;

use brushgen_core::{parse_map, Error, FaceSide, OutputConfig, Scene};
use tempfile::TempDir;

const ROOM: &str = r#"{
    "brushes": [
        { "size": [256, 256, 16], "texture": "concrete_floor", "position": [0, 0, -8] },
        { "size": [256, 256, 16], "texture": "plaster_ceiling", "position": [0, 0, 136] },
        { "size": [16, 256, 128], "texture": ["trim", "trim", "brick", "brick", "brick", "brick"],
          "position": [-136, 0, 64] },
        { "size": [16, 256, 128], "texture": "brick", "position": [136, 0, 64], "rotation": [0, 0, 180] },
        { "size": [32, 64, 8], "texture": "berlin_roof_wood_dirty", "rotation": [90, 0, 0] }
    ]
}"#;

#[test]
fn test_scene_writes_parseable_map() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let scene_path = temp_dir.path().join("room.json");
    fs::write(&scene_path, ROOM).expect("write scene");

    let mut scene = Scene::load(&scene_path).expect("load scene");
    scene.output = OutputConfig::new(temp_dir.path(), "room.map");

    let document = scene.build_document().expect("build document");
    let path = document.write(&scene.output).expect("write map");

    let text = fs::read_to_string(&path).expect("read map");
    let map = parse_map(&text).expect("parse map");
    assert_eq!(map.brushes.len(), 5);

    for (i, brush) in map.brushes.iter().enumerate() {
        assert_eq!(brush.faces.len(), FaceSide::ALL.len());
        assert!(text.contains(&format!("// brush {i}\n{{\n")));
    }

    let (min, max) = map.brushes[0].bounds().expect("floor has points");
    assert_eq!((min.z, max.z), (-16.0, 0.0));
    assert_eq!((min.x, max.x), (-128.0, 128.0));

    assert_eq!(map.brushes[2].textures(), vec!["trim", "brick"]);
}

#[test]
fn test_generation_is_idempotent() {
    let scene = Scene::from_json_str(ROOM).expect("valid scene");
    let first = scene.build_document().expect("build").render();
    let second = scene.build_document().expect("build").render();
    assert_eq!(first, second);
}

#[test]
fn test_invalid_brush_writes_nothing() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let mut scene = Scene::from_json_str(
        r#"{ "brushes": [ { "size": [8, 8, 8], "texture": ["a", "b", "c"] } ] }"#,
    )
    .expect("valid json");
    scene.output = OutputConfig::new(temp_dir.path(), "broken.map");

    let result = scene.build_document().and_then(|document| document.write(&scene.output));
    assert!(matches!(result, Err(Error::InvalidTextureCount { count: 3 })));
    assert!(!scene.output.path().exists());
}
