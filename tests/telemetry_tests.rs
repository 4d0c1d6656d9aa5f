use chart_layout::core::{Record, Viewport};
use chart_layout::telemetry::{DEFAULT_FILTER, init_default_tracing, init_tracing};
use chart_layout::{ChartKind, ChartLayoutEngine, ChartSpec, Encoding};

#[test]
fn second_initialization_is_refused() {
    let first = init_default_tracing();
    assert_eq!(first, cfg!(feature = "telemetry"));
    assert!(!init_tracing("trace"));
    assert!(DEFAULT_FILTER.contains("chart_layout"));

    // Layout passes must run the same with a subscriber installed.
    let rows = vec![
        Record::new().with("x", 0.0).with("y", 1.0),
        Record::new().with("x", 1.0).with("y", 3.0),
    ];
    let engine = ChartLayoutEngine::new(ChartSpec::new(ChartKind::Line, Encoding::new("x", "y")))
        .expect("valid spec");
    let layout = engine.layout(&rows, Viewport::new(40, 40)).expect("layout");
    assert!(layout.plot.is_empty());
}
