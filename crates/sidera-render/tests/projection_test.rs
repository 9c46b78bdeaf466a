use sidera_core::{ErrorClass, Node, RenderOptions};
use sidera_render::{Error, PixelPosition, project};

fn pos(x: u32, y: u32) -> PixelPosition {
    PixelPosition { x, y }
}

#[test]
fn two_node_diagonal_lands_on_opposite_padded_corners() {
    let nodes = [Node::new("A", 0.0, 0.0, 0.0), Node::new("B", 10.0, 10.0, 0.0)];
    let map = project(&nodes, &RenderOptions::default()).expect("projection");

    assert_eq!(map["A"], pos(153, 871));
    assert_eq!(map["B"], pos(871, 153));
}

#[test]
fn depth_is_ignored() {
    let flat = [Node::new("A", 0.0, 0.0, 0.0), Node::new("B", 10.0, 10.0, 0.0)];
    let deep = [Node::new("A", 0.0, 0.0, -50.0), Node::new("B", 10.0, 10.0, 1e6)];
    let options = RenderOptions::default();
    assert_eq!(project(&flat, &options).unwrap(), project(&deep, &options).unwrap());
}

#[test]
fn collinear_nodes_share_a_row_and_keep_relative_spacing() {
    let nodes = [
        Node::new("a", 0.0, 3.0, 0.0),
        Node::new("b", 5.0, 3.0, 0.0),
        Node::new("c", 10.0, 3.0, 0.0),
        Node::new("d", 2.5, 3.0, 0.0),
    ];
    let map = project(&nodes, &RenderOptions::default()).unwrap();

    let ys: Vec<u32> = map.values().map(|p| p.y).collect();
    assert!(ys.iter().all(|&y| y == ys[0]));
    // A degenerate y axis normalizes to 0 and flips to the bottom of the drawable area.
    assert_eq!(ys[0], 871);

    assert_eq!(map["a"].x, 153);
    assert_eq!(map["b"].x, 153 + 359);
    assert_eq!(map["c"].x, 871);
    // 0.25 * 718 = 179.5 truncates to 179.
    assert_eq!(map["d"].x, 153 + 179);
}

#[test]
fn equal_x_coordinates_collapse_to_the_left_padding_column() {
    let nodes = [
        Node::new("a", 7.0, -4.0, 0.0),
        Node::new("b", 7.0, 0.0, 0.0),
        Node::new("c", 7.0, 12.0, 0.0),
    ];
    let options = RenderOptions::new(800, 600, 0.1);
    let map = project(&nodes, &options).unwrap();
    for p in map.values() {
        assert_eq!(p.x, options.pad_px() as u32);
    }
    assert_eq!(map["c"].y, 80);
    assert_eq!(map["a"].y, 80 + 440);
}

#[test]
fn projected_points_stay_inside_the_padded_rectangle() {
    // Small deterministic LCG so the sweep is reproducible without extra dependencies.
    let mut state: u64 = 0x5eed;
    let mut next = || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 11) as f64 / (1u64 << 53) as f64) * 2000.0 - 1000.0
    };

    for (width, height, padding) in [
        (1024, 1024, 0.15),
        (640, 480, 0.0),
        (333, 777, 0.2),
        (1920, 1080, 0.05),
        (64, 64, 0.49),
    ] {
        let options = RenderOptions::new(width, height, padding);
        let nodes: Vec<Node> = (0..50)
            .map(|i| Node::new(format!("n{i}"), next(), next(), next()))
            .collect();
        let map = project(&nodes, &options).unwrap();
        let pad = options.pad_px() as u32;
        for (id, p) in &map {
            assert!(p.x >= pad && p.x <= width - pad && p.x < width, "{id} x={}", p.x);
            assert!(p.y >= pad && p.y <= height - pad && p.y < height, "{id} y={}", p.y);
        }
    }
}

#[test]
fn empty_node_list_projects_to_an_empty_map() {
    let map = project(&[], &RenderOptions::default()).unwrap();
    assert!(map.is_empty());
}

#[test]
fn half_padding_is_rejected_as_configuration() {
    let nodes = [Node::new("a", 0.0, 0.0, 0.0)];
    let err = project(&nodes, &RenderOptions::new(1024, 1024, 0.5)).unwrap_err();
    assert_eq!(err.input_class(), Some(ErrorClass::Configuration));
}

#[test]
fn configuration_is_checked_before_coordinates() {
    let nodes = [Node::new("a", f64::NAN, 0.0, 0.0)];
    let err = project(&nodes, &RenderOptions::new(0, 1024, 0.1)).unwrap_err();
    assert_eq!(err.input_class(), Some(ErrorClass::Configuration));
}

#[test]
fn non_finite_coordinates_are_rejected_as_validation() {
    let nodes = [Node::new("a", 0.0, 0.0, 0.0), Node::new("b", f64::INFINITY, 1.0, 0.0)];
    let err = project(&nodes, &RenderOptions::default()).unwrap_err();
    assert_eq!(err.input_class(), Some(ErrorClass::Validation));
    assert!(matches!(err, Error::Input(_)));
}

#[test]
fn projection_preserves_node_order() {
    let nodes = [
        Node::new("z", 1.0, 1.0, 0.0),
        Node::new("a", 2.0, 2.0, 0.0),
        Node::new("m", 3.0, 3.0, 0.0),
    ];
    let map = project(&nodes, &RenderOptions::default()).unwrap();
    let ids: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(ids, ["z", "a", "m"]);
}

#[test]
fn pixel_map_serializes_as_json_object() {
    let nodes = [Node::new("A", 0.0, 0.0, 0.0), Node::new("B", 10.0, 10.0, 0.0)];
    let map = project(&nodes, &RenderOptions::default()).unwrap();
    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"A":{"x":153,"y":871},"B":{"x":871,"y":153}}"#);
}
