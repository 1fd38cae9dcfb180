pub mod axes;
pub mod options;
pub mod ranges;
pub mod ticks;
pub mod visibility;

pub use axes::{AxisAnchor, AxisLayout, AxisSide, AxisSpec, XAxisSpec, build_axes};
pub use options::{
    Aggregation, Barmode, ChartInputs, ChartOptions, ChartType, OptionChange, resolve_change,
};
pub use ranges::{AxisRange, RangeMap, YAxisRanges};
pub use ticks::{SpacedTicks, build_spaced_ticks};
pub use visibility::{
    ControlDisplay, ControlState, VisibilityMap, resolve_visibility, yaxis_range_values,
};
