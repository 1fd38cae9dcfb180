use datalens_charts::api::{apply_query, compute_data_ranges};
use datalens_charts::core::ranges::AxisRange;
use datalens_charts::{Dataset, InMemoryStore, QueryOutcome, run_query};

fn dataset() -> Dataset {
    let mut dataset = Dataset::new();
    dataset.insert("a".to_owned(), vec![1.0, 2.0, 3.0]);
    dataset.insert("b".to_owned(), vec![0.0, 5.0, 6.0]);
    dataset
}

fn store() -> InMemoryStore {
    let mut store = InMemoryStore::new();
    store.insert("1", dataset());
    store
}

#[test]
fn empty_queries_are_accepted_as_no_filter() {
    assert_eq!(
        run_query(&store(), "1", None),
        QueryOutcome::Accepted { query: None }
    );
    assert_eq!(
        run_query(&store(), "1", Some("   ")),
        QueryOutcome::Accepted { query: None }
    );
}

#[test]
fn valid_queries_echo_the_expression() {
    assert_eq!(
        run_query(&store(), "1", Some("a == 1")),
        QueryOutcome::Accepted {
            query: Some("a == 1".to_owned())
        }
    );
}

#[test]
fn undefined_names_are_rejected_with_the_exact_message() {
    assert_eq!(
        run_query(&store(), "1", Some("d")),
        QueryOutcome::Rejected {
            error: "name 'd' is not defined".to_owned()
        }
    );
}

#[test]
fn unknown_sessions_are_rejected() {
    assert_eq!(
        run_query(&store(), "missing", Some("a == 1")),
        QueryOutcome::Rejected {
            error: "no dataset loaded for 'missing'".to_owned()
        }
    );
}

#[test]
fn comparison_operators_filter_rows() {
    let filtered = apply_query(&dataset(), "a >= 2").expect("valid filter");
    assert_eq!(filtered["a"], vec![2.0, 3.0]);
    assert_eq!(filtered["b"], vec![5.0, 6.0]);

    let filtered = apply_query(&dataset(), "a != 2").expect("valid filter");
    assert_eq!(filtered["a"], vec![1.0, 3.0]);

    // `<=` must not be split into `<` and a dangling `=`.
    let filtered = apply_query(&dataset(), "a <= 2").expect("valid filter");
    assert_eq!(filtered["a"], vec![1.0, 2.0]);
}

#[test]
fn bare_column_filters_on_truthiness() {
    let filtered = apply_query(&dataset(), "b").expect("valid filter");
    assert_eq!(filtered["a"], vec![2.0, 3.0]);
}

#[test]
fn bad_literals_are_query_errors() {
    let err = apply_query(&dataset(), "a == one").expect_err("bad literal");
    assert!(err.to_string().contains("invalid literal"));
}

#[test]
fn data_ranges_span_finite_values_only() {
    let mut data = dataset();
    data.insert("c".to_owned(), vec![f64::NAN, 2.5, 9.5]);
    data.insert("d".to_owned(), vec![f64::NAN, f64::INFINITY]);

    let columns: Vec<String> = ["b", "c", "d", "zzz"]
        .iter()
        .map(|c| (*c).to_owned())
        .collect();
    let ranges = compute_data_ranges(&data, &columns);

    assert_eq!(ranges.get("b"), Some(&AxisRange::new(0.0, 6.0)));
    assert_eq!(ranges.get("c"), Some(&AxisRange::new(2.5, 9.5)));
    assert_eq!(ranges.get("d"), None);
    assert_eq!(ranges.get("zzz"), None);
}
