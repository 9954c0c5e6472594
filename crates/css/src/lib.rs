//! fluid `clamp()` 的 CSS 代码生成

pub mod calculate;
pub mod emit;

// Re-export main functions
pub use calculate::{calculate, calculate_config, calculate_with, Calculation, FieldError};
pub use emit::{
    clamp_expression, custom_properties_block, emit, emit_with, fallback_block,
    sanitize_property_name, scss_usage, EmitOptions, FluidCss,
};
