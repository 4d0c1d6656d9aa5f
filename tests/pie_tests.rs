use std::f64::consts::{FRAC_PI_2, PI, TAU};

use approx::assert_relative_eq;
use chart_layout::core::{
    Margin, PixelPoint, RadiusSpec, Viewport, angle_from_center, outer_radius, pie_slices,
    resolve_radius,
};

#[test]
fn radius_strings_parse_as_pixels_or_percent() {
    assert_eq!("40%".parse::<RadiusSpec>().expect("percent"), RadiusSpec::Percent(40.0));
    assert_eq!(" 120 ".parse::<RadiusSpec>().expect("pixels"), RadiusSpec::Pixels(120.0));
    assert!("forty".parse::<RadiusSpec>().is_err());
    assert!("%".parse::<RadiusSpec>().is_err());
}

#[test]
fn radius_serializes_in_its_original_shape() {
    let percent = serde_json::to_string(&RadiusSpec::Percent(25.0)).expect("serialize");
    assert_eq!(percent, "\"25%\"");
    let pixels = serde_json::to_string(&RadiusSpec::Pixels(80.0)).expect("serialize");
    assert_eq!(pixels, "80.0");
    assert!(serde_json::from_str::<RadiusSpec>("\"25 px\"").is_err());
}

#[test]
fn percent_radius_scales_the_margin_reduced_half_extent() {
    let viewport = Viewport::new(400, 300);
    let margin = Margin::uniform(20.0);
    // min((300 - 20) / 2, (400 - 20) / 2) = 140
    assert_relative_eq!(resolve_radius(viewport, RadiusSpec::Percent(50.0), margin), 70.0);
    assert_relative_eq!(resolve_radius(viewport, RadiusSpec::Percent(100.0), margin), 140.0);
}

#[test]
fn oversized_pixel_radius_shrinks_below_the_top_margin() {
    let viewport = Viewport::new(400, 300);
    let margin = Margin::uniform(20.0);
    assert_eq!(resolve_radius(viewport, RadiusSpec::Pixels(90.0), margin), 90.0);
    assert_eq!(resolve_radius(viewport, RadiusSpec::Pixels(500.0), margin), 130.0);
}

#[test]
fn default_radius_fits_the_plot() {
    let margin = Margin::new(20.0, 20.0, 20.0, 20.0);
    assert_eq!(outer_radius(Viewport::new(400, 300), margin), 130.0);
    assert_eq!(outer_radius(Viewport::new(10, 10), margin), 0.0);
}

#[test]
fn slices_split_the_circle_in_input_order() {
    let slices = pie_slices(&[
        ("a".to_owned(), 1.0),
        ("b".to_owned(), 3.0),
        ("c".to_owned(), -2.0),
        ("d".to_owned(), f64::NAN),
    ]);

    assert_eq!(slices.len(), 4);
    assert_eq!(slices[0].start_angle, 0.0);
    assert_relative_eq!(slices[0].end_angle, FRAC_PI_2);
    assert_relative_eq!(slices[1].end_angle, TAU);
    assert_eq!(slices[2].start_angle, slices[2].end_angle);
    assert_eq!(slices[3].value, 0.0);
    assert_eq!(slices[1].label, "b");
}

#[test]
fn all_empty_values_produce_empty_wedges() {
    let slices = pie_slices(&[("a".to_owned(), 0.0), ("b".to_owned(), 0.0)]);
    assert!(slices.iter().all(|slice| slice.start_angle == slice.end_angle));
}

#[test]
fn angles_run_clockwise_from_twelve_o_clock() {
    let center = PixelPoint::new(50.0, 50.0);
    assert_relative_eq!(angle_from_center(center, PixelPoint::new(50.0, 0.0)), 0.0);
    assert_relative_eq!(angle_from_center(center, PixelPoint::new(100.0, 50.0)), FRAC_PI_2);
    assert_relative_eq!(angle_from_center(center, PixelPoint::new(50.0, 100.0)), PI);
    assert_relative_eq!(
        angle_from_center(center, PixelPoint::new(0.0, 50.0)),
        3.0 * FRAC_PI_2
    );
}

#[test]
fn centroid_sits_mid_wedge() {
    let slices = pie_slices(&[("a".to_owned(), 1.0), ("b".to_owned(), 1.0)]);
    let centroid = slices[1].centroid(PixelPoint::new(0.0, 0.0), 10.0);
    assert_relative_eq!(centroid.x, -10.0, epsilon = 1e-9);
    assert_relative_eq!(centroid.y, 0.0, epsilon = 1e-9);
    assert!(slices[0].contains_angle(0.0));
    assert!(!slices[0].contains_angle(PI));
}
