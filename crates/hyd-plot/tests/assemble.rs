use hyd_core::{Domain, ParameterValues, ReferenceLine, ShadeBound, ShadeRule};
use hyd_curve::{compute_curve, sweep_parameter, CurvePoint, QueryPoint, SampledCurve};
use hyd_plot::{
    assemble, default_y_bounds, shade_region, sweep_plot, to_plot_spec, AxisOverrides,
    PresentationOptions,
};
use proptest::prelude::*;

fn curve(ys: &[f64]) -> SampledCurve {
    SampledCurve {
        model_id: "test".into(),
        title: "test".into(),
        x_label: "x".into(),
        y_label: "y".into(),
        domain: Domain::new(0.0, ys.len() as f64).unwrap(),
        transposed: false,
        points: ys
            .iter()
            .enumerate()
            .map(|(i, &y)| CurvePoint { x: i as f64, y })
            .collect(),
    }
}

fn query() -> QueryPoint {
    QueryPoint {
        x: 0.0,
        y: 0.0,
        requested_x: 0.0,
        clamped: false,
    }
}

#[test]
fn default_bounds_follow_domain_and_data() {
    let plot = assemble(&curve(&[1.0, 4.0, 2.0]), &query(), &[], &[], AxisOverrides::default())
        .unwrap();
    assert_eq!((plot.axes.x_min, plot.axes.x_max), (0.0, 3.0));
    assert_eq!(plot.axes.y_min, 0.0);
    assert!((plot.axes.y_max - 4.4).abs() < 1e-12);
}

#[test]
fn reference_lines_and_negative_values_extend_bounds() {
    let line = ReferenceLine {
        label: "threshold".into(),
        y: 10.0,
    };
    let plot = assemble(&curve(&[-2.0, 4.0]), &query(), &[line], &[], AxisOverrides::default())
        .unwrap();
    assert!((plot.axes.y_min + 2.2).abs() < 1e-12);
    assert!((plot.axes.y_max - 11.0).abs() < 1e-12);
    assert_eq!(default_y_bounds([0.0, 0.0]), (0.0, 1.0));
}

#[test]
fn overrides_replace_defaults_and_are_validated() {
    let overrides = AxisOverrides {
        x: Some((1.0, 2.0)),
        y: Some((-1.0, 1.0)),
    };
    let plot = assemble(&curve(&[1.0, 2.0]), &query(), &[], &[], overrides).unwrap();
    assert_eq!(plot.axes.x_min, 1.0);
    assert_eq!(plot.axes.y_max, 1.0);

    let bad = AxisOverrides {
        x: None,
        y: Some((1.0, 1.0)),
    };
    let err = assemble(&curve(&[1.0]), &query(), &[], &[], bad).unwrap_err();
    assert_eq!(err.info().code, "hyd_plot.axis_bounds");
}

#[test]
fn exceedance_shading_is_pointwise_and_split_into_spans() {
    let points = curve(&[5.0, 2.0, 2.0, 5.0, 1.0]).points;
    let rule = ShadeRule::level_exceeds_curve("rain", 3.0);
    let region = shade_region(&points, &rule);
    assert_eq!(region.spans.len(), 2);
    let xs: Vec<f64> = region.spans[0].points.iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![1.0, 2.0]);
    assert_eq!(region.spans[1].points[0].x, 4.0);
    for span in &region.spans {
        for p in &span.points {
            assert_eq!(p.upper, 3.0);
            assert!(p.upper > p.lower);
        }
    }

    let under = shade_region(&points, &ShadeRule::under_curve("all"));
    assert_eq!(under.spans.len(), 1);
    assert_eq!(under.spans[0].points.len(), 5);
    assert_eq!(under.spans[0].points[4].lower, 0.0);
}

#[test]
fn infiltration_plot_carries_model_guides() {
    let params: ParameterValues = [("f0", 7.0), ("fc", 2.0), ("k", 1e-3), ("precipitation", 4.0)]
        .into_iter()
        .collect();
    let result = compute_curve("infiltration_capacity", &params, 600.0).unwrap();
    let plot = to_plot_spec(
        &result.curve,
        &result.query,
        &PresentationOptions::for_result(&result),
    )
    .unwrap();
    assert_eq!(plot.lines.len(), 1);
    assert_eq!(plot.shades.len(), 2);
    let exceed = &plot.shades[1];
    let first = exceed.spans[0].points[0].x;
    let ponding = result.readouts[0].value;
    assert!(first >= ponding);
    assert!(first - ponding <= 86_400.0 / 200.0);
    assert_eq!(plot.query.x, 600.0);
    assert!((plot.axes.y_max - 7.7).abs() < 1e-9);
    assert!(matches!(
        result.guides.shades[1].upper,
        ShadeBound::Constant(level) if level == 4.0
    ));
}

#[test]
fn presentation_options_override_title_and_add_overlays() {
    let result = compute_curve(
        "baseflow_recession",
        &[("q0", 100.0), ("a", 0.1)].into_iter().collect(),
        0.0,
    )
    .unwrap();
    let options = PresentationOptions {
        title: Some("Recession".into()),
        overlays: vec![hyd_plot::PlotSeries {
            label: "observed".into(),
            points: vec![CurvePoint { x: 1.0, y: 300.0 }],
        }],
        ..PresentationOptions::default()
    };
    let plot = to_plot_spec(&result.curve, &result.query, &options).unwrap();
    assert_eq!(plot.title, "Recession");
    assert_eq!(plot.series.len(), 2);
    assert!((plot.axes.y_max - 330.0).abs() < 1e-9);
}

#[test]
fn sweep_plot_spans_every_domain() {
    let base: ParameterValues = [("distance", 10.0), ("velocity", 1e-4), ("dispersivity", 0.1)]
        .into_iter()
        .collect();
    let values = [10.0, 20.0];
    let results = sweep_parameter("transport_1d", &base, "distance", &values, 0.0).unwrap();
    let plot = sweep_plot(&results, "distance", &values).unwrap();
    assert_eq!(plot.series.len(), 2);
    assert_eq!(plot.series[1].label, "distance = 20");
    assert!((plot.axes.x_max - 600_000.0).abs() < 1e-6);
    assert!(sweep_plot(&[], "distance", &values).is_err());
}

proptest! {
    #[test]
    fn shading_never_includes_points_below_the_curve(
        ys in proptest::collection::vec(0.0f64..10.0, 2..64),
        level in 0.0f64..10.0,
    ) {
        let points = curve(&ys).points;
        let region = shade_region(&points, &ShadeRule::level_exceeds_curve("rain", level));
        let shaded: usize = region.spans.iter().map(|s| s.points.len()).sum();
        let expected = ys.iter().filter(|&&y| level > y).count();
        prop_assert_eq!(shaded, expected);
    }
}
