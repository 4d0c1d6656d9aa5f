use approx::assert_relative_eq;
use chart_layout::core::{
    BandScale, ContinuousScale, DataType, Margin, PixelPoint, PlotArea, ScaleKind, Viewport,
};
use chart_layout::layout::{
    AxisLabelLocale, ContinuousAxisOptions, Side, TextAnchor, TextBaseline, XAxisPosition,
    YAxisPosition, axis_line, axis_title, band_axis, continuous_axis, horizontal_tick_count,
    tick_label_anchor, vertical_tick_count, x_axis_anchor, y_axis_anchor,
};

const PLOT: PlotArea = PlotArea {
    width: 500.0,
    height: 300.0,
};

fn options(side: Side) -> ContinuousAxisOptions {
    ContinuousAxisOptions {
        side,
        data_type: DataType::Number,
        locale: AxisLabelLocale::EnUs,
        tick_count: 5,
        include_extrema: false,
        grid: false,
    }
}

#[test]
fn anchors_follow_axis_positions() {
    let viewport = Viewport::new(580, 380);
    let margin = Margin::new(20.0, 20.0, 60.0, 60.0);

    assert_eq!(
        x_axis_anchor(XAxisPosition::Bottom, viewport, margin),
        PixelPoint::new(0.0, 300.0)
    );
    assert_eq!(
        x_axis_anchor(XAxisPosition::Top, viewport, margin),
        PixelPoint::new(0.0, 0.0)
    );
    assert_eq!(
        y_axis_anchor(YAxisPosition::Right, viewport, margin),
        PixelPoint::new(500.0, 0.0)
    );

    let line = axis_line(Side::Right, PixelPoint::new(500.0, 0.0), PLOT);
    assert_eq!(line.start, PixelPoint::new(500.0, 0.0));
    assert_eq!(line.end, PixelPoint::new(500.0, 300.0));
}

#[test]
fn tick_counts_are_bucketed_on_container_size() {
    assert_eq!(horizontal_tick_count(479.0), 4);
    assert_eq!(horizontal_tick_count(480.0), 4);
    assert_eq!(horizontal_tick_count(768.0), 6);
    assert_eq!(horizontal_tick_count(800.0), 5);
    assert_eq!(horizontal_tick_count(1600.0), 10);
    assert_eq!(vertical_tick_count(400.0), 4);
    assert_eq!(vertical_tick_count(99.0), 1);
}

#[test]
fn tick_labels_sit_outside_the_plot() {
    let anchor = PixelPoint::new(0.0, 300.0);
    let (point, text_anchor, baseline) = tick_label_anchor(Side::Bottom, anchor, 42.0);
    assert_eq!(point, PixelPoint::new(42.0, 318.0));
    assert_eq!(text_anchor, TextAnchor::Middle);
    assert_eq!(baseline, TextBaseline::Auto);

    let (point, _, _) = tick_label_anchor(Side::Top, PixelPoint::new(0.0, 0.0), 42.0);
    assert_eq!(point, PixelPoint::new(42.0, -8.0));

    let (point, text_anchor, baseline) =
        tick_label_anchor(Side::Left, PixelPoint::new(0.0, 0.0), 42.0);
    assert_eq!(point, PixelPoint::new(-12.0, 42.0));
    assert_eq!(text_anchor, TextAnchor::End);
    assert_eq!(baseline, TextBaseline::Middle);

    let (point, text_anchor, _) =
        tick_label_anchor(Side::Right, PixelPoint::new(500.0, 0.0), 42.0);
    assert_eq!(point, PixelPoint::new(512.0, 42.0));
    assert_eq!(text_anchor, TextAnchor::Start);
}

#[test]
fn continuous_bottom_axis_places_ticks_and_grid() {
    let scale = ContinuousScale::new(ScaleKind::Linear, (0.0, 100.0), (0.0, 500.0))
        .expect("valid scale");
    let axis = continuous_axis(
        &scale,
        ContinuousAxisOptions {
            grid: true,
            ..options(Side::Bottom)
        },
        PixelPoint::new(0.0, 300.0),
        PLOT,
    );

    let labels: Vec<&str> = axis.ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "20", "40", "60", "80", "100"]);
    assert_relative_eq!(axis.ticks[1].offset, 100.0);
    assert_eq!(axis.ticks[1].label_anchor, PixelPoint::new(100.0, 318.0));
    assert_eq!(axis.grid_lines.len(), 6);
    assert_eq!(axis.grid_lines[1].start.y, 0.0);
    assert_eq!(axis.grid_lines[1].end.y, 300.0);
    assert_eq!(axis.tick_margin, 0.0);
}

#[test]
fn extrema_bracket_generated_ticks() {
    let scale =
        ContinuousScale::new(ScaleKind::Linear, (0.0, 33.0), (300.0, 0.0)).expect("valid scale");
    let axis = continuous_axis(
        &scale,
        ContinuousAxisOptions {
            include_extrema: true,
            ..options(Side::Left)
        },
        PixelPoint::new(0.0, 0.0),
        PLOT,
    );

    let values: Vec<f64> = axis.ticks.iter().filter_map(|tick| tick.value).collect();
    assert_eq!(values.first(), Some(&0.0));
    assert_eq!(values.last(), Some(&33.0));
    assert_eq!(values.iter().filter(|value| **value == 0.0).count(), 1);
    assert!(axis.grid_lines.is_empty());
    assert_eq!(axis.ticks.last().map(|tick| tick.offset), Some(0.0));
}

#[test]
fn date_axis_formats_labels_by_locale() {
    let start = 1_609_459_200_000.0; // 2021-01-01T00:00:00Z
    let day = 86_400_000.0;
    let scale = ContinuousScale::new(
        ScaleKind::Time,
        (start + 3_600_000.0, start + 4.0 * day),
        (0.0, 500.0),
    )
    .expect("valid scale");

    let build = |locale| {
        continuous_axis(
            &scale,
            ContinuousAxisOptions {
                data_type: DataType::Date,
                locale,
                tick_count: 4,
                ..options(Side::Bottom)
            },
            PixelPoint::new(0.0, 300.0),
            PLOT,
        )
    };

    assert_eq!(build(AxisLabelLocale::EnUs).ticks[0].label, "01/02/2021");
    assert_eq!(build(AxisLabelLocale::EsEs).ticks[0].label, "02/01/2021");
}

#[test]
fn roomy_band_axis_keeps_labels_upright() {
    let band = BandScale::new(["a", "b"], (0.0, 500.0));
    let axis = band_axis(
        &band,
        Side::Bottom,
        AxisLabelLocale::EnUs,
        PixelPoint::new(0.0, 300.0),
        PLOT,
    );

    assert_eq!(axis.tick_margin, 0.0);
    assert_eq!(axis.ticks.len(), 2);
    let tick = &axis.ticks[0];
    assert_eq!(tick.value, None);
    assert_eq!(tick.rotate, 0.0);
    assert_relative_eq!(tick.offset, band.center(0));
    assert_eq!(tick.label_anchor.y, 314.0);
}

#[test]
fn crowded_band_axis_rotates_and_requests_tick_margin() {
    let band = BandScale::new(["January", "February", "March"], (0.0, 120.0));
    let axis = band_axis(
        &band,
        Side::Bottom,
        AxisLabelLocale::EnUs,
        PixelPoint::new(0.0, 300.0),
        PLOT,
    );

    assert_eq!(axis.tick_margin, 8.0 * 7.0 / 2.0);
    let february = &axis.ticks[1];
    assert_eq!(february.label, "February");
    assert_eq!(february.rotate, -90.0);
    assert_relative_eq!(february.label_anchor.x, band.center(1) + 3.5);
    assert_relative_eq!(february.label_anchor.y, 300.0 + 4.0 * 7.0);
}

#[test]
fn long_band_labels_truncate_and_cap_the_margin() {
    let band = BandScale::new(["Administration", "Engineering"], (0.0, 100.0));
    let axis = band_axis(
        &band,
        Side::Bottom,
        AxisLabelLocale::EnUs,
        PixelPoint::new(0.0, 300.0),
        PLOT,
    );

    assert_eq!(axis.tick_margin, 40.0);
    assert_eq!(axis.ticks[0].label, "Administra");
    assert_eq!(axis.ticks[1].label, "Engineerin");
}

#[test]
fn vertical_band_axis_never_rotates() {
    let band = BandScale::new(["Administration", "Engineering"], (0.0, 40.0));
    let axis = band_axis(
        &band,
        Side::Left,
        AxisLabelLocale::EnUs,
        PixelPoint::new(0.0, 0.0),
        PLOT,
    );

    assert_eq!(axis.tick_margin, 0.0);
    assert!(axis.ticks.iter().all(|tick| tick.rotate == 0.0));
    assert_eq!(axis.ticks[0].label, "Administration");
    assert_eq!(axis.ticks[0].text_anchor, TextAnchor::End);
}

#[test]
fn titles_sit_beyond_tick_labels() {
    let bottom = axis_title("Month", Side::Bottom, true, PixelPoint::new(0.0, 300.0), PLOT);
    assert_eq!(bottom.position, PixelPoint::new(250.0, 350.0));
    assert_eq!(bottom.rotate, 0.0);

    let bare = axis_title("Month", Side::Bottom, false, PixelPoint::new(0.0, 300.0), PLOT);
    assert_eq!(bare.position, PixelPoint::new(250.0, 320.0));

    let left = axis_title("Revenue", Side::Left, true, PixelPoint::new(0.0, 0.0), PLOT);
    assert_eq!(left.position, PixelPoint::new(-50.0, 150.0));
    assert_eq!(left.rotate, -90.0);

    let right = axis_title("Revenue", Side::Right, true, PixelPoint::new(500.0, 0.0), PLOT);
    assert_eq!(right.position, PixelPoint::new(550.0, 150.0));
    assert_eq!(right.rotate, 90.0);

    let top = axis_title("Month", Side::Top, true, PixelPoint::new(0.0, 0.0), PLOT);
    assert_eq!(top.position.y, -50.0);
}
