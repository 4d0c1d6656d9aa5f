use chart_layout::core::{BandScale, ContinuousScale, ScaleKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;
        let scale = ContinuousScale::new(
            ScaleKind::Linear,
            (domain_start, domain_end),
            (0.0, 2048.0),
        )
        .expect("valid scale");

        let px = scale.map(value);
        let recovered = scale.invert(px);

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
        prop_assert!((-1e-6..=2048.0 + 1e-6).contains(&px));
    }

    #[test]
    fn nice_domain_contains_the_original_domain(
        start in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        count in 1usize..12
    ) {
        let scale = ContinuousScale::new(ScaleKind::Linear, (start, start + span), (0.0, 1.0))
            .expect("valid scale");
        let (lo, hi) = scale.nice(count).domain();

        prop_assert!(lo <= start);
        prop_assert!(hi >= start + span);
    }

    #[test]
    fn ticks_stay_inside_the_domain(
        start in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
        count in 1usize..12
    ) {
        let scale = ContinuousScale::new(ScaleKind::Linear, (start, start + span), (0.0, 1.0))
            .expect("valid scale");
        let ticks = scale.ticks(count);
        let slack = span * 1e-9;

        for pair in ticks.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for tick in ticks {
            prop_assert!(tick >= start - slack && tick <= start + span + slack);
        }
    }

    #[test]
    fn band_lookup_finds_each_band_center(
        categories in 1usize..40,
        width in 10.0f64..4000.0
    ) {
        let names: Vec<String> = (0..categories).map(|i| format!("c{i}")).collect();
        let band = BandScale::new(names.iter().cloned(), (0.0, width));

        for index in 0..categories {
            prop_assert_eq!(band.index_at(band.center(index)), Some(index));
        }
    }
}
