//! Integration tests for cgraph-graphs.
//!
//! These tests drive a [`Graph`] through its public lifecycle against a
//! static host, the way an embedding application would.

use cgraph_common::test_utils::{
    assert_approx_eq, config_fixtures, data_fixtures, init_test_logging,
};
use cgraph_common::{ContentKey, GraphError};
use cgraph_config::{ConfigLoader, ContentInput, Domain, GraphInput, PointInput};
use cgraph_graphs::{
    ComputedStyle, Content, Graph, GraphData, GraphState, Layer, Line, Scatter, StaticHost,
};
use std::sync::Arc;

const CONTAINER: &str = "#testGraph_carbon";

fn host(width: f64) -> Arc<StaticHost> {
    Arc::new(StaticHost::new().with_container(CONTAINER, ComputedStyle::with_width(width)))
}

fn linear_input() -> GraphInput {
    ConfigLoader::from_json_str(config_fixtures::linear_axis_json()).unwrap()
}

fn line_input(key: &str, values: Vec<PointInput>) -> ContentInput {
    ContentInput {
        key: Some(key.to_string()),
        values: Some(values),
        ..ContentInput::default()
    }
}

fn fixture_values(json: &str) -> Vec<PointInput> {
    serde_json::from_str(json).unwrap()
}

fn line(key: &str, values: Vec<PointInput>) -> Box<dyn Content> {
    Box::new(Line::new(&line_input(key, values)).unwrap())
}

#[test]
fn test_end_to_end_line() {
    init_test_logging();
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    assert!(graph.has_no_data_view());
    let initial = graph.config().axis.y.domain;

    let values = fixture_values(data_fixtures::line_values_json());
    graph.load_content(line("uid_1", values)).unwrap();

    let domain = graph.config().axis.y.domain;
    assert!(domain.lower_limit <= 4.0);
    assert!(domain.upper_limit >= 35.0);
    assert!(graph.config().axis.y.is_range_modified);
    assert_eq!(graph.legend_item_count(), 1);
    assert_eq!(graph.config().shown_targets, vec![ContentKey::from("uid_1")]);
    assert!(!graph.has_no_data_view());

    let unloaded = graph.unload_content(&ContentKey::from("uid_1")).unwrap();
    assert_eq!(unloaded.key().as_str(), "uid_1");
    assert!(graph.has_no_data_view());
    assert_eq!(graph.legend_item_count(), 0);
    assert!(graph.config().shown_targets.is_empty());
    assert_eq!(graph.config().axis.y.domain, initial);
}

#[test]
fn test_duplicate_key_is_rejected() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line("uid_1", vec![PointInput::new(10.0, Some(1.0))]))
        .unwrap();
    let markup = graph.render_markup();

    let duplicate = Scatter::new(&line_input("uid_1", vec![])).unwrap();
    let err = graph.load_content(Box::new(duplicate)).unwrap_err();
    assert_eq!(err, GraphError::NonUniqueKey("uid_1".to_string()));
    assert_eq!(graph.content_count(), 1);
    assert_eq!(graph.render_markup(), markup);
}

#[test]
fn test_calibration_pads_data_union() {
    let input = ConfigLoader::from_json_str(
        r##"{
  "bindTo": "#testGraph_carbon",
  "axis": {
    "x": { "label": "X", "lowerLimit": 0, "upperLimit": 100 },
    "y": { "label": "Y", "lowerLimit": 30, "upperLimit": 100 }
  }
}"##,
    )
    .unwrap();
    let mut graph = Graph::new(&input, host(1024.0)).unwrap();
    graph
        .load_content(line(
            "uid_1",
            vec![
                PointInput::new(10.0, Some(20.0)),
                PointInput::new(90.0, Some(200.0)),
            ],
        ))
        .unwrap();

    let y = graph.config().axis.y.domain;
    assert_approx_eq(y.lower_limit, 11.0, 1e-9);
    assert_approx_eq(y.upper_limit, 209.0, 1e-9);
    assert_eq!(graph.config().axis.x.domain, Domain::new(0.0, 100.0));
    assert_eq!(graph.scales().y.domain(), (y.lower_limit, y.upper_limit));
}

#[test]
fn test_unload_shrinks_calibrated_domain() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line(
            "a",
            vec![PointInput::new(10.0, Some(4.0)), PointInput::new(20.0, Some(35.0))],
        ))
        .unwrap();
    graph
        .load_content(line(
            "b",
            vec![PointInput::new(30.0, Some(10.0)), PointInput::new(40.0, Some(50.0))],
        ))
        .unwrap();

    let both = graph.config().axis.y.domain;
    assert_approx_eq(both.lower_limit, -2.5, 1e-9);
    assert_approx_eq(both.upper_limit, 52.5, 1e-9);

    graph.unload_content(&ContentKey::from("b")).unwrap();
    let remaining = graph.config().axis.y.domain;
    assert_approx_eq(remaining.lower_limit, -1.75, 1e-9);
    assert_approx_eq(remaining.upper_limit, 36.75, 1e-9);
    assert!(graph.config().axis.y.is_range_modified);
    assert_eq!(graph.scales().y.domain(), (remaining.lower_limit, remaining.upper_limit));
}

#[test]
fn test_pad_domain_disabled() {
    let input = ConfigLoader::from_json_str(
        r##"{
  "bindTo": "#testGraph_carbon",
  "axis": {
    "x": { "label": "X", "lowerLimit": 0, "upperLimit": 100 },
    "y": { "label": "Y", "lowerLimit": 0, "upperLimit": 20, "padDomain": false }
  }
}"##,
    )
    .unwrap();
    let mut graph = Graph::new(&input, host(1024.0)).unwrap();
    graph
        .load_content(line("uid_1", vec![PointInput::new(10.0, Some(50.0))]))
        .unwrap();
    assert_eq!(graph.config().axis.y.domain, Domain::new(0.0, 50.0));
}

#[test]
fn test_calibration_disabled_keeps_configured_domain() {
    let mut input = linear_input();
    input.allow_calibration = Some(false);
    let mut graph = Graph::new(&input, host(1024.0)).unwrap();
    let before = graph.config().axis.y.domain;
    graph
        .load_content(line("uid_1", vec![PointInput::new(10.0, Some(500.0))]))
        .unwrap();
    assert_eq!(graph.config().axis.y.domain, before);
    assert!(!graph.config().axis.y.is_range_modified);
}

#[test]
fn test_resize_is_idempotent() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line(
            "uid_1",
            fixture_values(data_fixtures::gapped_values_json()),
        ))
        .unwrap();
    graph.resize().unwrap();
    let markup = graph.render_markup();
    let config = graph.config().clone();
    graph.resize().unwrap();
    assert_eq!(graph.render_markup(), markup);
    assert_eq!(graph.config(), &config);
}

#[test]
fn test_repeated_resizes_keep_document_bounded() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line(
            "uid_1",
            fixture_values(data_fixtures::line_values_json()),
        ))
        .unwrap();
    graph.resize().unwrap();
    let live = graph.document().len();
    let capacity = graph.document().capacity();

    for _ in 0..500 {
        graph.resize().unwrap();
    }
    assert_eq!(graph.document().len(), live);
    assert_eq!(graph.document().capacity(), capacity);
}

#[test]
fn test_resize_follows_container_width() {
    let host = host(1024.0);
    let mut graph = Graph::new(&linear_input(), host.clone()).unwrap();
    let wide = graph.config().canvas_width;

    assert!(host.set_width(CONTAINER, 600.0));
    graph.resize().unwrap();
    let narrow = graph.config().canvas_width;
    assert_approx_eq(wide - narrow, 424.0, 1e-9);
    assert_eq!(graph.scales().x.range().1, graph.config().plot_width());

    host.remove(CONTAINER);
    graph.resize().unwrap();
    assert_eq!(graph.config().canvas_width, narrow);
}

#[test]
fn test_unload_restores_markup() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    let markup = graph.render_markup();
    graph
        .load_content(line(
            "uid_1",
            fixture_values(data_fixtures::line_values_json()),
        ))
        .unwrap();
    assert_ne!(graph.render_markup(), markup);
    graph.unload_content(&ContentKey::from("uid_1")).unwrap();
    assert_eq!(graph.render_markup(), markup);
}

#[test]
fn test_unload_unknown_key() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    let err = graph.unload_content(&ContentKey::from("missing")).unwrap_err();
    assert_eq!(err, GraphError::InvalidObject);
    assert_eq!(err.to_string(), "Invalid object");
}

#[test]
fn test_no_data_view_ignores_null_values() {
    let mut input = linear_input();
    let mut graph = Graph::new(&input, host(1024.0)).unwrap();
    graph
        .load_content(line("empty", vec![PointInput::new(10.0, None)]))
        .unwrap();
    assert!(graph.has_no_data_view());

    input.show_no_data_text = Some(false);
    let graph = Graph::new(&input, host(1024.0)).unwrap();
    assert!(!graph.has_no_data_view());
}

#[test]
fn test_pan_disables_clamping() {
    let mut input = linear_input();
    let graph = Graph::new(&input, host(1024.0)).unwrap();
    assert!(graph.scales().x.clamp());
    assert!(graph.scales().y.clamp());

    input.pan.enabled = true;
    let graph = Graph::new(&input, host(1024.0)).unwrap();
    assert!(!graph.scales().x.clamp());
    assert!(!graph.scales().y2.clamp());
}

#[test]
fn test_layer_order() {
    let graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    assert_eq!(
        graph.layers(),
        vec![
            Layer::Container,
            Layer::Canvas,
            Layer::Defs,
            Layer::Regions,
            Layer::Grid,
            Layer::XAxis,
            Layer::YAxis,
            Layer::Y2Axis,
            Layer::Content,
            Layer::AxisInfoRow,
            Layer::AxisLabels,
            Layer::AxisReferenceLine,
            Layer::Legend,
            Layer::NoData,
        ]
    );
}

#[test]
fn test_reflow_replaces_values_and_x_domain() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line("uid_1", vec![PointInput::new(10.0, Some(5.0))]))
        .unwrap();

    let data: GraphData = serde_json::from_str(
        r#"{
  "key": "uid_1",
  "values": [{"x": 150, "y": 80}, {"x": 160, "y": 90}],
  "xDomain": [100, 200]
}"#,
    )
    .unwrap();
    graph.reflow(&data).unwrap();

    assert_eq!(graph.config().axis.x.domain, Domain::new(100.0, 200.0));
    assert!(graph.config().axis.y.domain.upper_limit >= 90.0);
    let content = graph.content(&ContentKey::from("uid_1")).unwrap();
    assert_eq!(content.config().values.len(), 2);
}

#[test]
fn test_reflow_unknown_key_still_updates_x_axis() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    let data = GraphData {
        key: ContentKey::from("missing"),
        x_domain: Some([10.0.into(), 50.0.into()]),
        ..GraphData::default()
    };
    graph.reflow(&data).unwrap();
    assert_eq!(graph.config().axis.x.domain, Domain::new(10.0, 50.0));
}

#[test]
fn test_reflow_rejects_inverted_x_domain() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    let before = graph.config().clone();
    let data = GraphData {
        key: ContentKey::from("missing"),
        x_domain: Some([50.0.into(), 10.0.into()]),
        ..GraphData::default()
    };
    assert!(graph.reflow(&data).is_err());
    assert_eq!(graph.config(), &before);
}

#[test]
fn test_legend_toggle_hides_content() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line(
            "uid_1",
            vec![PointInput::new(10.0, Some(5.0)), PointInput::new(20.0, Some(6.0))],
        ))
        .unwrap();
    let key = ContentKey::from("uid_1");

    graph.click_legend_item(&key).unwrap();
    assert!(!graph.config().is_shown(&key));
    let root = graph.document().root();
    assert_eq!(
        graph
            .document()
            .find_by_class(root, "cgraph-legend-item-inactive")
            .len(),
        1
    );

    graph.click_legend_item(&key).unwrap();
    assert!(graph.config().is_shown(&key));
    assert!(graph
        .document()
        .find_by_class(root, "cgraph-legend-item-inactive")
        .is_empty());
}

#[test]
fn test_timeseries_markers() {
    let input = ConfigLoader::from_json_str(config_fixtures::timeseries_axis_json()).unwrap();
    let mut graph = Graph::new(&input, host(1024.0)).unwrap();
    let layers = graph.layers();
    assert!(layers.contains(&Layer::Dateline));
    assert!(layers.contains(&Layer::Eventline));

    let root = graph.document().root();
    assert_eq!(graph.document().find_by_class(root, "cgraph-dateline").len(), 1);
    assert_eq!(graph.document().find_by_class(root, "cgraph-eventline").len(), 1);

    graph
        .load_content(line(
            "uid_1",
            fixture_values(data_fixtures::timeseries_values_json()),
        ))
        .unwrap();
    let err = graph
        .load_content(line("uid_2", vec![PointInput::new(1.0, Some(1.0))]))
        .unwrap_err();
    assert_eq!(err, GraphError::AxisTypeMismatch);

    let clicked = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let sink = Arc::clone(&clicked);
    graph.set_dateline_handler(Box::new(move |dateline| {
        sink.lock().push(dateline.label.clone());
    }));
    assert!(graph.click_dateline(0).unwrap());
    assert_eq!(clicked.lock().as_slice(), &[Some("Release".to_string())]);
    assert_eq!(graph.click_dateline(3).unwrap_err(), GraphError::InvalidObject);
}

#[test]
fn test_destroyed_graph_rejects_operations() {
    let mut graph = Graph::new(&linear_input(), host(1024.0)).unwrap();
    graph
        .load_content(line("uid_1", vec![PointInput::new(10.0, Some(5.0))]))
        .unwrap();
    graph.destroy();

    assert_eq!(graph.state(), GraphState::Destroyed);
    assert_eq!(graph.content_count(), 0);
    assert_eq!(graph.config().canvas_width, 0.0);
    assert!(matches!(
        graph.load_content(line("uid_2", vec![])),
        Err(GraphError::InvalidState { .. })
    ));
    assert!(matches!(
        graph.unload_content(&ContentKey::from("uid_1")),
        Err(GraphError::InvalidState { .. })
    ));
    assert!(matches!(
        graph.reflow(&GraphData::default()),
        Err(GraphError::InvalidState { .. })
    ));
}
