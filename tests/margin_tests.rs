use chart_layout::core::{ColorScale, Margin, PixelPoint, Viewport};
use chart_layout::layout::{
    LEGEND_CLEARANCE, LegendFootprint, LegendLayout, LegendMeasure, LegendPosition,
    LegendRequest, XAxisPosition, YAxisPosition, compute_base_margin, compute_margin_with_legend,
    resolve_margin,
};

fn legend(position: LegendPosition, labels: &[&str]) -> LegendLayout {
    let keys: Vec<String> = labels.iter().map(|label| (*label).to_owned()).collect();
    LegendLayout::from_keys(position, &keys, &mut ColorScale::default())
}

#[test]
fn base_margin_adds_axis_and_label_insets() {
    let plain = compute_base_margin(None, None, false, false);
    assert_eq!(plain, Margin::uniform(20.0));

    let axes = compute_base_margin(
        Some(XAxisPosition::Bottom),
        Some(YAxisPosition::Left),
        false,
        false,
    );
    assert_eq!(axes, Margin::new(20.0, 20.0, 60.0, 60.0));

    let labelled = compute_base_margin(
        Some(XAxisPosition::Top),
        Some(YAxisPosition::Right),
        true,
        true,
    );
    assert_eq!(labelled, Margin::new(80.0, 80.0, 20.0, 20.0));
}

#[test]
fn labels_on_hidden_axes_use_default_sides() {
    let margin = compute_base_margin(None, None, true, true);
    assert_eq!(margin, Margin::new(20.0, 20.0, 40.0, 40.0));
}

#[test]
fn legend_grows_the_side_named_by_the_last_word() {
    let base = Margin::uniform(20.0);
    let footprint = LegendFootprint {
        width: 100.0,
        height: 50.0,
    };

    let grown = |position| compute_margin_with_legend(base, position, footprint);
    assert_eq!(grown(LegendPosition::Right).right, 126.0);
    assert_eq!(grown(LegendPosition::TopRight).right, 126.0);
    assert_eq!(grown(LegendPosition::BottomLeft).left, 126.0);
    assert_eq!(grown(LegendPosition::LeftTop).top, 76.0);
    assert_eq!(grown(LegendPosition::RightBottom).bottom, 76.0);
    assert_eq!(grown(LegendPosition::Bottom).bottom, 76.0);

    let only_top = grown(LegendPosition::RightTop);
    assert_eq!(only_top.left, 20.0);
    assert_eq!(only_top.right, 20.0);
    assert_eq!(only_top.bottom, 20.0);
}

#[test]
fn footprint_depends_on_count_and_longest_label() {
    let layout = legend(LegendPosition::Right, &["abcd", "abcdefghijkl", "abcdef"]);
    let footprint = layout.footprint();
    assert_eq!(footprint.width, 10.0 + 12.0 + 12.0 * 7.0);
    assert_eq!(footprint.height, 3.0 * 22.0);

    let shuffled = legend(LegendPosition::Right, &["abcdef", "abcd", "abcdefghijkl"]);
    assert_eq!(shuffled.footprint(), footprint);
}

#[test]
fn two_pass_margin_commits_measured_legend() {
    let base = compute_base_margin(
        Some(XAxisPosition::Bottom),
        Some(YAxisPosition::Left),
        false,
        false,
    );
    let layout = legend(LegendPosition::Right, &["abcd", "abcdefghijkl", "abcdef"]);
    let resolution = resolve_margin(base, LegendRequest::Shown(LegendPosition::Right), &layout);

    assert_eq!(resolution.estimate.right, base.right + LEGEND_CLEARANCE);
    assert_eq!(
        resolution.margin.right,
        base.right + (10.0 + 12.0 + 12.0 * 7.0) + 6.0
    );
    assert_eq!(resolution.margin.top, base.top);
    assert_eq!(resolution.margin.left, base.left);
    assert!(resolution.is_fixed_point(&layout));
}

#[test]
fn resolving_again_under_the_final_margin_is_stable() {
    let base = Margin::new(20.0, 20.0, 60.0, 60.0);
    for position in [
        LegendPosition::Top,
        LegendPosition::LeftBottom,
        LegendPosition::TopLeft,
        LegendPosition::BottomRight,
    ] {
        let layout = legend(position, &["north", "south-east"]);
        let first = resolve_margin(base, position.into(), &layout);
        let second = resolve_margin(base, position.into(), &layout);
        assert_eq!(first, second);
        assert_eq!(layout.measure(first.margin), first.footprint);
    }
}

#[test]
fn hidden_legend_keeps_the_base_margin() {
    let base = Margin::new(20.0, 20.0, 60.0, 60.0);
    let layout = legend(LegendPosition::Right, &["a", "b"]);
    let resolution = resolve_margin(base, LegendRequest::Hidden, &layout);
    assert_eq!(resolution.margin, base);
    assert_eq!(resolution.footprint, LegendFootprint::ZERO);

    let absent: Option<LegendLayout> = None;
    assert_eq!(resolve_margin(base, true.into(), &absent).margin.right, 26.0);
}

struct MarginEcho;

impl LegendMeasure for MarginEcho {
    fn measure(&self, margin: Margin) -> LegendFootprint {
        LegendFootprint {
            width: margin.right,
            height: margin.top,
        }
    }
}

#[test]
fn margin_dependent_measurers_are_reported_unstable() {
    let base = Margin::uniform(20.0);
    let resolution = resolve_margin(base, LegendPosition::Right.into(), &MarginEcho);
    assert_eq!(resolution.footprint.width, 26.0);
    assert_eq!(resolution.margin.right, 52.0);
    assert!(!resolution.is_fixed_point(&MarginEcho));
}

#[test]
fn legend_sits_against_the_outer_edge_of_its_side() {
    let viewport = Viewport::new(800, 400);
    let base = Margin::new(20.0, 20.0, 60.0, 60.0);
    let layout = legend(LegendPosition::Right, &["abcd", "abcdefghijkl", "abcdef"]);
    let margin = resolve_margin(base, LegendPosition::Right.into(), &layout).margin;

    // plot is 608 x 320; the legend box is 106 x 66.
    assert_eq!(layout.origin(viewport, margin), PixelPoint::new(634.0, 127.0));

    let top_left = legend(LegendPosition::LeftTop, &["abcd"]);
    let margin = resolve_margin(base, LegendPosition::LeftTop.into(), &top_left).margin;
    assert_eq!(top_left.origin(viewport, margin), PixelPoint::new(0.0, -margin.top));
}

#[test]
fn legend_request_accepts_flags_and_positions() {
    let shown: LegendRequest = serde_json::from_str("true").expect("flag");
    assert_eq!(shown, LegendRequest::Shown(LegendPosition::Right));
    let hidden: LegendRequest = serde_json::from_str("false").expect("flag");
    assert_eq!(hidden, LegendRequest::Hidden);
    let corner: LegendRequest = serde_json::from_str("\"left-bottom\"").expect("position");
    assert_eq!(corner, LegendRequest::Shown(LegendPosition::LeftBottom));

    assert_eq!(
        serde_json::to_string(&LegendRequest::Hidden).expect("serialize"),
        "false"
    );
    assert_eq!(
        serde_json::to_string(&LegendRequest::Shown(LegendPosition::TopRight)).expect("serialize"),
        "\"top-right\""
    );
    assert!(serde_json::from_str::<LegendRequest>("\"middle\"").is_err());
}

#[test]
fn oversized_margin_clamps_plot_to_zero() {
    let margin = Margin::new(300.0, 20.0, 300.0, 20.0);
    let viewport = Viewport::new(200, 400);
    let plot = margin.plot_area(viewport);
    assert_eq!(plot.width, 160.0);
    assert_eq!(plot.height, 0.0);
    assert!(plot.is_empty());
    assert!(!margin.is_usable(viewport));
}
