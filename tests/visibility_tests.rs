use datalens_charts::core::{YAxisRanges, resolve_visibility, yaxis_range_values};
use datalens_charts::core::ranges::{AxisRange, RangeMap};
use datalens_charts::{Aggregation, ChartOptions, ChartType};

fn options(chart_type: ChartType) -> ChartOptions {
    let mut options = ChartOptions::new(chart_type);
    options.x = Some("a".to_owned());
    options.y = vec!["b".to_owned()];
    options
}

#[test]
fn weighted_charts_swap_y_input_for_single_plus_z() {
    for chart_type in [
        ChartType::Heatmap,
        ChartType::ThreeDScatter,
        ChartType::Surface,
    ] {
        let visibility = resolve_visibility(&options(chart_type));
        assert!(!visibility["y-input"].is_shown(), "{chart_type}");
        assert!(visibility["y-single-input"].is_shown(), "{chart_type}");
        assert!(visibility["z-input"].is_shown(), "{chart_type}");
        assert!(!visibility["group-input"].is_shown(), "{chart_type}");
    }

    let visibility = resolve_visibility(&options(ChartType::Line));
    assert!(visibility["y-input"].is_shown());
    assert!(!visibility["z-input"].is_shown());
    assert!(visibility["group-input"].is_shown());
}

#[test]
fn rolling_inputs_follow_the_aggregation() {
    let mut opts = options(ChartType::Line);
    assert!(!resolve_visibility(&opts)["rolling-inputs"].is_shown());

    opts.agg = Some(Aggregation::Rolling);
    assert!(resolve_visibility(&opts)["rolling-inputs"].is_shown());

    opts.agg = Some(Aggregation::Mean);
    assert!(!resolve_visibility(&opts)["rolling-inputs"].is_shown());
}

#[test]
fn cpg_requires_grouping_on_a_groupable_chart() {
    let mut opts = options(ChartType::Line);
    assert!(!resolve_visibility(&opts)["cpg-input"].is_shown());

    opts.group = Some(vec!["c".to_owned()]);
    assert!(resolve_visibility(&opts)["cpg-input"].is_shown());

    opts.chart_type = ChartType::Pie;
    assert!(!resolve_visibility(&opts)["cpg-input"].is_shown());
}

#[test]
fn bar_controls_carry_sortable_columns() {
    let mut opts = options(ChartType::Bar);
    opts.y = vec!["b".to_owned(), "c".to_owned()];
    let visibility = resolve_visibility(&opts);

    assert!(visibility["barmode-input"].is_shown());
    let barsort = &visibility["barsort-input"];
    assert!(barsort.is_shown());
    assert_eq!(
        barsort.options.as_deref(),
        Some(&["a".to_owned(), "b".to_owned(), "c".to_owned()][..])
    );

    let line = resolve_visibility(&options(ChartType::Line));
    assert!(!line["barmode-input"].is_shown());
    assert!(!line["barsort-input"].is_shown());
}

#[test]
fn yaxis_editor_needs_exactly_one_series_outside_heatmap() {
    let single = resolve_visibility(&options(ChartType::Line));
    assert!(single["yaxis-input"].is_shown());
    assert_eq!(
        single["yaxis-input"].options.as_deref(),
        Some(&["b".to_owned()][..])
    );

    let mut multi = options(ChartType::Line);
    multi.y.push("c".to_owned());
    assert!(!resolve_visibility(&multi)["yaxis-input"].is_shown());

    assert!(!resolve_visibility(&options(ChartType::Heatmap))["yaxis-input"].is_shown());
}

#[test]
fn yaxis_editor_values_prefer_the_override() {
    let opts = options(ChartType::Line);
    let mut overrides = YAxisRanges::new();
    let mut ranges = RangeMap::new();
    ranges.insert("b".to_owned(), AxisRange::new(2.0, 4.0));

    assert_eq!(
        yaxis_range_values(&opts, Some("b"), &overrides, &ranges),
        (Some(2.0), Some(4.0))
    );

    overrides.insert("b", AxisRange::new(1.0, 9.0));
    assert_eq!(
        yaxis_range_values(&opts, Some("b"), &overrides, &ranges),
        (Some(1.0), Some(9.0))
    );

    assert_eq!(
        yaxis_range_values(&opts, None, &overrides, &ranges),
        (None, None)
    );
    assert_eq!(
        yaxis_range_values(&opts, Some("z"), &overrides, &ranges),
        (None, None)
    );
}
