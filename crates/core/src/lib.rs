pub mod catalog;
pub mod debounce;
pub mod easing;
pub mod error;
pub mod format;
pub mod interpolate;
pub mod lookup;
pub mod query;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use catalog::{build_table, default_breakpoints, merge_breakpoints, BreakpointCatalog};
pub use debounce::Debouncer;
pub use easing::ease;
pub use error::{CatalogError, ValidationError, ValidationErrors};
pub use format::format_number;
pub use interpolate::{compute_value, sample_curve, CurveOptions, CurveSample, FluidScale};
pub use query::{parse_query_string, to_query_string};
pub use types::{
    Breakpoint, BreakpointInput, BreakpointResult, BreakpointStatus, CubicBezier, DeviceCategory,
    DeviceIcon, OutputUnit, ScalingConfig, ScalingFunction, ScalingInput,
};
