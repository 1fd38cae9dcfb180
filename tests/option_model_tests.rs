use datalens_charts::core::{OptionChange, resolve_change};
use datalens_charts::{Aggregation, ChartError, ChartOptions, ChartType};

fn line_options() -> ChartOptions {
    let mut options = ChartOptions::new(ChartType::Line);
    options.x = Some("a".to_owned());
    options.y = vec!["b".to_owned()];
    options
}

#[test]
fn chart_type_change_revalidates_and_recomputes_visibility() {
    let prev = line_options();
    let (next, visibility) =
        resolve_change(&prev, &[OptionChange::ChartType("heatmap".to_owned())])
            .expect("valid change");

    assert_eq!(next.chart_type, ChartType::Heatmap);
    assert!(visibility["z-input"].is_shown());
    assert!(!visibility["y-input"].is_shown());
}

#[test]
fn unknown_chart_type_is_rejected() {
    let prev = line_options();
    let err = resolve_change(&prev, &[OptionChange::ChartType("treemap".to_owned())])
        .expect_err("unknown type");
    assert_eq!(
        err,
        ChartError::UnsupportedChartType {
            chart_type: "treemap".to_owned()
        }
    );
}

#[test]
fn rolling_fields_survive_only_under_rolling_aggregation() {
    let prev = line_options();
    let (rolling, _) = resolve_change(
        &prev,
        &[
            OptionChange::Agg(Some("rolling".to_owned())),
            OptionChange::Window(Some(10)),
            OptionChange::RollingComp(Some("corr".to_owned())),
        ],
    )
    .expect("valid change");
    assert_eq!(rolling.agg, Some(Aggregation::Rolling));
    assert_eq!(rolling.window, Some(10));
    assert_eq!(rolling.rolling_comp.as_deref(), Some("corr"));

    let (plain, _) = resolve_change(&rolling, &[OptionChange::Agg(Some("mean".to_owned()))])
        .expect("valid change");
    assert_eq!(plain.agg, Some(Aggregation::Mean));
    assert_eq!(plain.window, None);
    assert_eq!(plain.rolling_comp, None);
}

#[test]
fn batched_edits_fold_in_order() {
    let prev = line_options();
    let (next, _) = resolve_change(
        &prev,
        &[
            OptionChange::Y(vec!["b".to_owned(), "c".to_owned()]),
            OptionChange::Group(Some(vec!["d".to_owned()])),
            OptionChange::Query(Some("b > 1".to_owned())),
        ],
    )
    .expect("valid change");

    assert_eq!(next.y, vec!["b".to_owned(), "c".to_owned()]);
    assert!(next.grouped());
    assert_eq!(next.query.as_deref(), Some("b > 1"));
}

#[test]
fn clearing_a_field_uses_none() {
    let mut prev = line_options();
    prev.group = Some(vec!["d".to_owned()]);

    let (next, visibility) =
        resolve_change(&prev, &[OptionChange::Group(None)]).expect("valid change");
    assert!(!next.grouped());
    assert!(!visibility["cpg-input"].is_shown());
}
