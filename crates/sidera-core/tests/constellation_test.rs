use sidera_core::{ConstellationRequest, Error, ErrorClass, SideraConfig};

#[test]
fn request_json_uses_camel_case_and_optional_depth() {
    let text = r#"{
        "projectId": "p-1",
        "constellationName": "Orion",
        "nodes": [
            {"id": "a", "position": {"x": 0, "y": 0}},
            {"id": "b", "position": {"x": 10, "y": 10, "z": 3.5}}
        ],
        "edges": [{"source": "a", "target": "b"}]
    }"#;
    let req: ConstellationRequest = serde_json::from_str(text).expect("request parses");

    assert_eq!(req.project_id, "p-1");
    assert_eq!(req.constellation_name, "Orion");
    assert_eq!(req.prompt, None);
    assert_eq!(req.constellation.nodes.len(), 2);
    assert_eq!(req.constellation.nodes[0].position.z, 0.0);
    assert_eq!(req.constellation.nodes[1].position.z, 3.5);
    assert_eq!(req.constellation.edges[0].target, "b");
    assert!(req.constellation.validate().is_ok());
}

#[test]
fn request_without_edges_is_accepted() {
    let text = r#"{"projectId": "p", "constellationName": "n", "nodes": []}"#;
    let req: ConstellationRequest = serde_json::from_str(text).expect("request parses");
    assert!(req.constellation.is_empty());
    assert!(req.constellation.edges.is_empty());
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("sidera.json");
    std::fs::write(
        &path,
        r#"{"render": {"width": 640, "height": 480, "paddingRatio": 0.1},
            "output": {"root": "out/stars"}}"#,
    )
    .expect("write config");

    let cfg = SideraConfig::from_path(&path).expect("config loads");
    assert_eq!(cfg.render.width, 640);
    assert_eq!(cfg.render.pad_px(), 64);
    assert_eq!(cfg.output.root, std::path::PathBuf::from("out/stars"));
}

#[test]
fn missing_config_file_reports_the_path() {
    let err = SideraConfig::from_path(std::path::Path::new("/nonexistent/sidera.json"))
        .expect_err("missing file");
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert_eq!(err.class(), ErrorClass::Configuration);
    assert!(err.to_string().contains("sidera.json"));
}
