use approx::assert_relative_eq;
use chart_layout::core::{
    BandScale, ContinuousScale, Margin, PixelPoint, PlotArea, Record, ScaleKind, Viewport,
    pie_slices,
};
use chart_layout::interaction::{
    BandIndex, EdgeDistances, HitStrategy, HitTester, NearestXIndex, PieIndex, SeriesColumn,
    TooltipState, VoronoiIndex, VoronoiSeed, on_pointer_leave,
};

const MARGIN: Margin = Margin::new(20.0, 20.0, 60.0, 60.0);

fn viewport() -> Viewport {
    Viewport::new(580, 380)
}

fn stacked_index() -> NearestXIndex {
    let x = ContinuousScale::new(ScaleKind::Linear, (0.0, 10.0), (0.0, 500.0)).expect("x scale");
    let y = ContinuousScale::new(ScaleKind::Linear, (0.0, 40.0), (300.0, 0.0)).expect("y scale");
    NearestXIndex::new(
        x,
        y,
        vec![Some(0.0), Some(5.0), Some(10.0)],
        vec![
            SeriesColumn::new(Some("A".into()), vec![Some(10.0), Some(20.0), Some(30.0)]),
            SeriesColumn::new(Some("B".into()), vec![Some(15.0), Some(25.0), Some(35.0)]),
        ],
    )
}

fn rows() -> Vec<Record> {
    vec![
        Record::new().with("x", 0.0),
        Record::new().with("x", 5.0),
        Record::new().with("x", 10.0),
    ]
}

#[test]
fn nearest_x_snaps_to_row_and_closest_series() {
    let tester = HitTester::new(
        HitStrategy::NearestX(stacked_index()),
        rows(),
        viewport(),
        MARGIN,
    );

    let state = tester.hit_test(PixelPoint::new(240.0, 105.0));
    let hit = state.hit().expect("visible tooltip");
    assert_eq!(hit.row, 1);
    assert_eq!(hit.record, rows()[1]);
    assert_eq!(hit.series_key.as_deref(), Some("B"));
    assert_relative_eq!(hit.anchor.x, 250.0);
    assert_relative_eq!(hit.anchor.y, 112.5);
    assert_eq!(
        hit.edges,
        EdgeDistances {
            left: 310.0,
            right: 270.0,
            top: 132.5,
            bottom: 247.5,
        }
    );
}

#[test]
fn nearest_x_uses_lower_series_when_cursor_is_low() {
    let target = stacked_index()
        .locate(PixelPoint::new(480.0, 290.0))
        .expect("target");
    assert_eq!(target.row, 2);
    assert_eq!(target.series_key.as_deref(), Some("A"));
}

#[test]
fn band_strategy_selects_row_behind_the_band() {
    let band = BandScale::new(["a", "b", "c"], (0.0, 310.0));
    let y = ContinuousScale::new(ScaleKind::Linear, (0.0, 10.0), (300.0, 0.0)).expect("y scale");
    let index = BandIndex::new(
        band.clone(),
        vec![2, 0, 1],
        y,
        vec![SeriesColumn::new(None, vec![Some(5.0), Some(7.0), Some(9.0)])],
    );

    let target = index.locate(PixelPoint::new(150.0, 10.0)).expect("target");
    assert_eq!(target.row, 0);
    assert_eq!(target.series_key, None);
    assert_relative_eq!(target.anchor.x, band.center(1), epsilon = 1e-9);
    assert_relative_eq!(target.anchor.y, 150.0);

    assert!(index.locate(PixelPoint::new(900.0, 10.0)).is_none());
}

fn scatter_seeds() -> Vec<VoronoiSeed> {
    let seed = |row, x, y| VoronoiSeed {
        row,
        series_key: Some(format!("s{row}")),
        position: PixelPoint::new(x, y),
    };
    vec![
        seed(0, 100.0, 100.0),
        seed(1, 300.0, 100.0),
        seed(2, 200.0, 250.0),
        seed(3, 100.0, 100.0),
        seed(4, f64::NAN, 10.0),
    ]
}

#[test]
fn voronoi_assigns_cursor_to_closest_seed() {
    let plot = PlotArea {
        width: 400.0,
        height: 300.0,
    };
    let index = VoronoiIndex::build(scatter_seeds(), plot);
    assert_eq!(index.cells().len(), 3);

    let owner = |x, y| index.locate(PixelPoint::new(x, y)).map(|target| target.row);
    assert_eq!(owner(110.0, 120.0), Some(0));
    assert_eq!(owner(390.0, 10.0), Some(1));
    assert_eq!(owner(200.0, 290.0), Some(2));
    assert_eq!(owner(0.0, 299.0), Some(2));
    assert_eq!(owner(0.0, 0.0), Some(0));
    assert_eq!(owner(500.0, 10.0), None);

    let target = index.locate(PixelPoint::new(310.0, 90.0)).expect("target");
    assert_eq!(target.anchor, PixelPoint::new(300.0, 100.0));
    assert_eq!(target.series_key.as_deref(), Some("s1"));
}

#[test]
fn voronoi_cells_tile_the_plot() {
    let plot = PlotArea {
        width: 400.0,
        height: 300.0,
    };
    let index = VoronoiIndex::build(scatter_seeds(), plot);
    let area: f64 = index
        .cells()
        .iter()
        .map(|cell| {
            let n = cell.polygon.len();
            (0..n)
                .map(|i| {
                    let a = cell.polygon[i];
                    let b = cell.polygon[(i + 1) % n];
                    a.x * b.y - b.x * a.y
                })
                .sum::<f64>()
                .abs()
                / 2.0
        })
        .sum();
    assert_relative_eq!(area, 400.0 * 300.0, max_relative = 1e-9);
}

#[test]
fn single_seed_owns_the_whole_plot() {
    let plot = PlotArea {
        width: 50.0,
        height: 50.0,
    };
    let index = VoronoiIndex::build(
        vec![VoronoiSeed {
            row: 7,
            series_key: None,
            position: PixelPoint::new(10.0, 10.0),
        }],
        plot,
    );
    assert_eq!(index.cells()[0].polygon.len(), 4);
    let target = index.locate(PixelPoint::new(49.0, 49.0)).expect("target");
    assert_eq!(target.row, 7);
}

#[test]
fn pie_lookup_uses_angle_and_radius() {
    let center = PixelPoint::new(100.0, 100.0);
    let slices = pie_slices(&[
        ("a".to_owned(), 1.0),
        ("b".to_owned(), 1.0),
        ("c".to_owned(), 2.0),
    ]);
    let index = PieIndex::new(center, 50.0, slices);

    let target = index.locate(PixelPoint::new(130.0, 90.0)).expect("slice a");
    assert_eq!(target.row, 0);
    assert_eq!(target.series_key.as_deref(), Some("a"));
    let half = 25.0 * std::f64::consts::FRAC_1_SQRT_2;
    assert_relative_eq!(target.anchor.x, 100.0 + half, epsilon = 1e-9);
    assert_relative_eq!(target.anchor.y, 100.0 - half, epsilon = 1e-9);

    let below = index.locate(PixelPoint::new(100.0, 130.0)).expect("slice c");
    assert_eq!(below.row, 2);

    assert!(index.locate(PixelPoint::new(100.0, 160.0)).is_none());

    let donut = index.with_inner_radius(20.0);
    assert!(donut.locate(PixelPoint::new(105.0, 100.0)).is_none());
    assert_eq!(
        donut.locate(PixelPoint::new(70.0, 100.0)).map(|t| t.row),
        Some(2)
    );
}

#[test]
fn pointer_leave_and_invalid_cursors_hide_the_tooltip() {
    let tester = HitTester::new(
        HitStrategy::NearestX(stacked_index()),
        rows(),
        viewport(),
        MARGIN,
    );
    assert!(tester.hit_test(PixelPoint::new(10.0, 10.0)).is_visible());
    assert_eq!(tester.hit_test(PixelPoint::new(f64::NAN, 10.0)), TooltipState::Hidden);
    assert_eq!(tester.on_pointer_leave(), TooltipState::Hidden);
    assert_eq!(on_pointer_leave(), TooltipState::default());
}

#[test]
fn tooltip_state_serializes_the_hit_record() {
    let tester = HitTester::new(
        HitStrategy::NearestX(stacked_index()),
        rows(),
        viewport(),
        MARGIN,
    );
    let state = tester.hit_test(PixelPoint::new(500.0, 0.0));
    let json = serde_json::to_value(&state).expect("serialize");
    assert_eq!(json["Visible"]["row"], 2);
    assert_eq!(json["Visible"]["record"]["x"], 10.0);
    assert_eq!(json["Visible"]["series_key"], "B");
}
