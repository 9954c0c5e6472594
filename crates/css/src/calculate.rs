use fluidclamp_core::{
    build_table, Breakpoint, BreakpointResult, FluidScale, ScalingConfig, ScalingInput,
    ValidationErrors,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::emit::{emit_with, scss_usage, EmitOptions};

/// 单个字段的错误信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    /// 每个校验错误对应一条，顺序不变
    pub fn from_errors(errors: &ValidationErrors) -> Vec<FieldError> {
        errors
            .iter()
            .map(|e| FieldError {
                field: e.field().to_string(),
                message: e.to_string(),
            })
            .collect()
    }
}

/// 一次完整计算的结果
///
/// 校验失败时所有输出为空，错误放在 `errors` 里
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calculation {
    pub css_clamp: String,
    pub css_fallback: String,
    pub css_custom_properties: String,
    pub scss_function: String,
    pub breakpoint_table: Vec<BreakpointResult>,
    pub errors: Vec<FieldError>,
}

impl Calculation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn from_errors(errors: &ValidationErrors) -> Self {
        Self {
            errors: FieldError::from_errors(errors),
            ..Default::default()
        }
    }
}

/// 校验输入并生成全部输出
pub fn calculate(input: &ScalingInput, custom: &[Breakpoint]) -> Calculation {
    calculate_with(input, custom, &EmitOptions::default())
}

pub fn calculate_with(
    input: &ScalingInput,
    custom: &[Breakpoint],
    options: &EmitOptions,
) -> Calculation {
    match input.validate() {
        Ok(config) => calculate_config(&config, custom, options),
        Err(errors) => {
            debug!(count = errors.len(), "skipping calculation for invalid input");
            Calculation::from_errors(&errors)
        }
    }
}

/// 已校验配置的输出
pub fn calculate_config(
    config: &ScalingConfig,
    custom: &[Breakpoint],
    options: &EmitOptions,
) -> Calculation {
    let scale = FluidScale::new(config);
    let css = emit_with(config, &scale, options);

    Calculation {
        css_clamp: css.css_clamp,
        css_fallback: css.css_fallback,
        css_custom_properties: css.css_custom_properties,
        scss_function: scss_usage(config),
        breakpoint_table: build_table(config, custom),
        errors: Vec::new(),
    }
}
