//! Chart dispatch: from a validated option bundle plus queried data to
//! concrete figures.
//!
//! `build_figure_data` is the single entry point the rendering layer calls.
//! Missing required fields yield `None` (nothing to draw yet); any failure
//! while querying or building is contained into a structured error payload.
//! Only contract violations (a chart type with no registered builder) panic.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::api::figure::{BuildFailure, Figure, FigureResult, Layout, Trace};
use crate::api::store::{Dataset, DatasetStore, apply_query, compute_data_ranges};
use crate::core::axes::{AxisLayout, build_axes};
use crate::core::options::{ChartInputs, ChartOptions, ChartType};
use crate::core::ranges::{RangeMap, YAxisRanges};
use crate::core::ticks::{build_spaced_ticks, format_tick_label};
use crate::error::{ChartError, ChartResult};

/// Builds the figure payload for the current configuration.
///
/// Returns `None` when required fields for the chart type are missing
/// (no `x`, no `y`, or a weighted chart without `z`); otherwise a
/// [`FigureResult`] that is either the built figures or a contained failure.
pub fn build_figure_data(
    store: &dyn DatasetStore,
    data_id: &str,
    options: &ChartOptions,
    inputs: &ChartInputs,
    yaxis: &YAxisRanges,
) -> Option<FigureResult> {
    let x = options.x.as_deref()?;
    if options.y.is_empty() {
        return None;
    }
    if options.chart_type.uses_z() && options.z.is_none() {
        return None;
    }

    debug!(chart_type = %options.chart_type, data_id, x, "building figure data");
    Some(
        match try_build(store, data_id, x, options, inputs, yaxis) {
            Ok(figures) => FigureResult::Figures(figures),
            Err(err) => {
                warn!(chart_type = %options.chart_type, data_id, error = %err, "chart build contained");
                FigureResult::Error(BuildFailure::from_error(data_id, options.chart_type, &err))
            }
        },
    )
}

fn try_build(
    store: &dyn DatasetStore,
    data_id: &str,
    x: &str,
    options: &ChartOptions,
    inputs: &ChartInputs,
    yaxis: &YAxisRanges,
) -> ChartResult<Vec<Figure>> {
    let dataset = store
        .dataset(data_id)
        .ok_or_else(|| ChartError::Build(format!("no dataset loaded for '{data_id}'")))?;
    let dataset = match options.query.as_deref() {
        Some(expr) => apply_query(dataset, expr)?,
        None => dataset.clone(),
    };

    let row_count = dataset.get(x).map(Vec::len);
    for column in required_columns(x, options) {
        let Some(values) = dataset.get(column) else {
            return Err(ChartError::Build(format!(
                "column '{column}' is not present in the dataset"
            )));
        };
        if Some(values.len()) != row_count {
            return Err(ChartError::Build(format!(
                "column '{column}' length does not match '{x}'"
            )));
        }
    }

    let ranges = compute_data_ranges(&dataset, &options.y);
    let axes = build_axes(x, &options.y, yaxis, &ranges, options.z.as_deref());
    let ctx = BuildContext {
        dataset: &dataset,
        x,
        options,
        inputs,
        overrides: yaxis,
        ranges,
        axes,
    };
    build_chart(options.chart_type, &ctx)
}

fn required_columns<'a>(x: &'a str, options: &'a ChartOptions) -> impl Iterator<Item = &'a str> {
    std::iter::once(x)
        .chain(options.y.iter().map(String::as_str))
        .chain(options.z.as_deref())
        .chain(options.group.iter().flatten().map(String::as_str))
}

/// Inputs shared by every type-specific builder.
pub struct BuildContext<'a> {
    pub dataset: &'a Dataset,
    pub x: &'a str,
    pub options: &'a ChartOptions,
    pub inputs: &'a ChartInputs,
    pub overrides: &'a YAxisRanges,
    pub ranges: RangeMap,
    pub axes: AxisLayout,
}

/// Low-level type-keyed dispatch.
///
/// Panics on a chart type with no registered builder: by the time a request
/// reaches this table it has passed validation, so an unhandled type means
/// the table itself is incomplete.
pub fn build_chart(kind: ChartType, ctx: &BuildContext<'_>) -> ChartResult<Vec<Figure>> {
    match kind {
        ChartType::Line | ChartType::Bar | ChartType::Scatter => xy_charts(kind, ctx),
        ChartType::Pie => label_chart(kind, ctx),
        ChartType::Wordcloud => label_chart(kind, ctx),
        ChartType::Heatmap | ChartType::ThreeDScatter | ChartType::Surface => {
            weighted_chart(kind, ctx)
        }
        ChartType::Maps | ChartType::Candlestick => panic!(
            "no figure builder registered for chart type '{}'",
            kind.wire_name()
        ),
    }
}

fn xy_charts(kind: ChartType, ctx: &BuildContext<'_>) -> ChartResult<Vec<Figure>> {
    if !ctx.options.grouped() {
        return Ok(vec![xy_figure(kind, ctx, None, None)?]);
    }

    let combos = group_rows(ctx)?;
    if ctx.inputs.cpg {
        ctx.options
            .y
            .iter()
            .map(|column| cpg_figure(kind, ctx, column, &combos))
            .collect()
    } else {
        combos
            .iter()
            .map(|(label, rows)| xy_figure(kind, ctx, Some(label), Some(rows)))
            .collect()
    }
}

fn xy_figure(
    kind: ChartType,
    ctx: &BuildContext<'_>,
    label: Option<&str>,
    rows: Option<&[usize]>,
) -> ChartResult<Figure> {
    let x_values = column_subset(column(ctx.dataset, ctx.x)?, rows);
    let mut traces = Vec::with_capacity(ctx.options.y.len());
    for (index, y_column) in ctx.options.y.iter().enumerate() {
        let mut trace = Trace::new(
            y_column,
            x_values.clone(),
            column_subset(column(ctx.dataset, y_column)?, rows),
        );
        if index >= 1 {
            trace.yaxis = Some(format!("y{}", index + 1));
        }
        traces.push(trace);
    }

    let mut layout = Layout {
        title: xy_title(ctx.x, &ctx.options.y, label),
        barmode: (kind == ChartType::Bar).then_some(ctx.inputs.barmode),
        xaxis: ctx.axes.x_axis.clone(),
        yaxes: ctx.axes.y_axes.clone(),
    };
    if kind == ChartType::Bar {
        apply_barsort(ctx, rows, &x_values, &mut traces, &mut layout)?;
    }

    Ok(Figure {
        id: figure_id(kind, label, &ctx.options.y),
        chart_type: kind,
        layout,
        traces,
    })
}

fn cpg_figure(
    kind: ChartType,
    ctx: &BuildContext<'_>,
    y_column: &String,
    combos: &IndexMap<String, Vec<usize>>,
) -> ChartResult<Figure> {
    let x_values = column(ctx.dataset, ctx.x)?;
    let y_values = column(ctx.dataset, y_column)?;
    let traces = combos
        .iter()
        .map(|(label, rows)| {
            Trace::new(
                label,
                column_subset(x_values, Some(rows)),
                column_subset(y_values, Some(rows)),
            )
        })
        .collect();

    let y = std::slice::from_ref(y_column);
    let axes = build_axes(ctx.x, y, ctx.overrides, &ctx.ranges, None);
    Ok(Figure {
        id: format!("{}-cpg-{y_column}", kind.wire_name()),
        chart_type: kind,
        layout: Layout {
            title: xy_title(ctx.x, y, None),
            barmode: (kind == ChartType::Bar).then_some(ctx.inputs.barmode),
            xaxis: axes.x_axis,
            yaxes: axes.y_axes,
        },
        traces,
    })
}

fn label_chart(kind: ChartType, ctx: &BuildContext<'_>) -> ChartResult<Vec<Figure>> {
    let labels: Vec<String> = column(ctx.dataset, ctx.x)?
        .iter()
        .map(|v| format_tick_label(*v))
        .collect();
    let traces = ctx
        .options
        .y
        .iter()
        .map(|y_column| {
            let mut trace = Trace::new(y_column, Vec::new(), column(ctx.dataset, y_column)?.clone());
            trace.labels = Some(labels.clone());
            Ok(trace)
        })
        .collect::<ChartResult<Vec<_>>>()?;

    Ok(vec![Figure {
        id: figure_id(kind, None, &ctx.options.y),
        chart_type: kind,
        layout: Layout {
            title: xy_title(ctx.x, &ctx.options.y, None),
            barmode: None,
            xaxis: ctx.axes.x_axis.clone(),
            yaxes: IndexMap::new(),
        },
        traces,
    }])
}

fn weighted_chart(kind: ChartType, ctx: &BuildContext<'_>) -> ChartResult<Vec<Figure>> {
    let y_column = ctx
        .options
        .y
        .first()
        .ok_or_else(|| ChartError::Build("a y column is required".to_owned()))?;
    let z_column = ctx
        .options
        .z
        .as_deref()
        .ok_or_else(|| ChartError::Build("a z column is required".to_owned()))?;

    let mut trace = Trace::new(
        z_column,
        column(ctx.dataset, ctx.x)?.clone(),
        column(ctx.dataset, y_column)?.clone(),
    );
    trace.z = Some(column(ctx.dataset, z_column)?.clone());

    Ok(vec![Figure {
        id: format!("{}-{}-{y_column}", kind.wire_name(), ctx.x),
        chart_type: kind,
        layout: Layout {
            title: format!("{} vs {y_column} weighted by {z_column}", ctx.x),
            barmode: None,
            xaxis: ctx.axes.x_axis.clone(),
            yaxes: ctx.axes.y_axes.clone(),
        },
        traces: vec![trace],
    }])
}

/// Reorders bar categories by the sort column and switches the x axis to
/// explicit category ticks. An invalid `barsort` (not the current `x` or a
/// plotted y column) keeps natural order and plain numeric formatting.
fn apply_barsort(
    ctx: &BuildContext<'_>,
    rows: Option<&[usize]>,
    x_values: &[f64],
    traces: &mut [Trace],
    layout: &mut Layout,
) -> ChartResult<()> {
    let Some(barsort) = ctx.inputs.barsort.as_deref() else {
        return Ok(());
    };
    if barsort != ctx.x && !ctx.options.y.iter().any(|c| c == barsort) {
        return Ok(());
    }

    let sort_values = column_subset(column(ctx.dataset, barsort)?, rows);
    let mut order: Vec<usize> = (0..sort_values.len()).collect();
    order.sort_by(|&a, &b| sort_values[a].total_cmp(&sort_values[b]));

    let positions: Vec<f64> = (0..order.len()).map(|i| i as f64).collect();
    let ticktext: Vec<String> = order
        .iter()
        .map(|&i| format_tick_label(x_values[i]))
        .collect();
    for trace in traces {
        trace.y = order.iter().map(|&i| trace.y[i]).collect();
        trace.x = positions.clone();
    }
    layout.xaxis.ticks = Some(build_spaced_ticks(&ticktext, &positions));
    Ok(())
}

fn group_rows(ctx: &BuildContext<'_>) -> ChartResult<IndexMap<String, Vec<usize>>> {
    let group_columns: Vec<&String> = ctx.options.group.iter().flatten().collect();
    let series = group_columns
        .iter()
        .map(|name| column(ctx.dataset, name.as_str()))
        .collect::<ChartResult<Vec<_>>>()?;
    let row_count = column(ctx.dataset, ctx.x)?.len();

    let mut combos: IndexMap<String, Vec<usize>> = IndexMap::new();
    for row in 0..row_count {
        let label = group_columns
            .iter()
            .zip(&series)
            .map(|(name, values)| format!("{name}: {}", format_tick_label(values[row])))
            .collect::<Vec<_>>()
            .join(", ");
        combos.entry(label).or_default().push(row);
    }
    Ok(combos)
}

fn xy_title(x: &str, y: &[String], label: Option<&str>) -> String {
    let base = format!("{} by {x}", y.join(", "));
    match label {
        Some(label) => format!("{base} ({label})"),
        None => base,
    }
}

fn figure_id(kind: ChartType, label: Option<&str>, y: &[String]) -> String {
    let group = match label {
        Some(label) => label.replace([':', ','], "").replace(' ', "_"),
        None => "all".to_owned(),
    };
    format!("{}-{group}-{}", kind.wire_name(), y.join("-"))
}

fn column<'a>(dataset: &'a Dataset, name: &str) -> ChartResult<&'a Vec<f64>> {
    dataset
        .get(name)
        .ok_or_else(|| ChartError::Build(format!("column '{name}' is not present in the dataset")))
}

fn column_subset(values: &[f64], rows: Option<&[usize]>) -> Vec<f64> {
    match rows {
        None => values.to_vec(),
        Some(rows) => rows.iter().map(|&row| values[row]).collect(),
    }
}
