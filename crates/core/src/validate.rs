use tracing::{debug, warn};

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{BreakpointInput, CubicBezier, ScalingConfig, ScalingFunction, ScalingInput};

/// 断点宽度范围（px）
pub const BREAKPOINT_WIDTH_RANGE: (f64, f64) = (200.0, 4000.0);

const NAME_MAX_LEN: usize = 30;
const DEVICE_MAX_LEN: usize = 50;
const PROPERTY_NAME_MAX_LEN: usize = 50;

/// 校验通过的断点字段（已 trim）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointFields {
    pub name: String,
    pub width: u32,
    pub device: String,
}

impl ScalingInput {
    /// 校验并生成 [`ScalingConfig`]
    ///
    /// 收集所有字段错误后一起返回，而不是遇到第一个就停止
    pub fn validate(&self) -> Result<ScalingConfig, ValidationErrors> {
        let mut errors = Vec::new();

        check_number(&mut errors, "rootFontSize", self.root_font_size, 8.0, 32.0, true);
        check_number(&mut errors, "minSize", self.min_size, 0.1, 1000.0, false);
        check_number(&mut errors, "maxSize", self.max_size, 0.1, 1000.0, false);
        check_greater(&mut errors, "maxSize", self.max_size, "minSize", self.min_size);

        check_number(
            &mut errors,
            "minScreenWidth",
            self.min_screen_width,
            200.0,
            2000.0,
            true,
        );
        check_number(
            &mut errors,
            "maxScreenWidth",
            self.max_screen_width,
            400.0,
            4000.0,
            true,
        );
        check_greater(
            &mut errors,
            "maxScreenWidth",
            self.max_screen_width,
            "minScreenWidth",
            self.min_screen_width,
        );

        let custom_bezier = self.parse_bezier();
        if self.scaling_function == ScalingFunction::Custom {
            if let Some(bezier) = custom_bezier {
                check_bezier(&mut errors, bezier);
            }
        }

        let custom_property_name = self.custom_property_name.trim().to_string();
        if self.generate_custom_properties {
            check_property_name(&mut errors, &custom_property_name);
        }

        if !errors.is_empty() {
            debug!(count = errors.len(), "scaling input rejected");
            return Err(ValidationErrors(errors));
        }

        Ok(ScalingConfig {
            output_unit: self.output_unit,
            root_font_size: self.root_font_size,
            min_size: self.min_size,
            max_size: self.max_size,
            min_screen_width: self.min_screen_width as u32,
            max_screen_width: self.max_screen_width as u32,
            scaling_function: self.scaling_function,
            custom_bezier,
            use_container_queries: self.use_container_queries,
            include_fallback: self.include_fallback,
            generate_custom_properties: self.generate_custom_properties,
            custom_property_name,
        })
    }

    /// 解析失败的 bezier 文本按未设置处理（曲线退化为线性）
    fn parse_bezier(&self) -> Option<CubicBezier> {
        let raw = self.custom_bezier.as_deref()?;
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = CubicBezier::parse(raw);
        if parsed.is_none() {
            warn!(bezier = raw, "malformed bezier, falling back to linear");
        }
        parsed
    }
}

impl BreakpointInput {
    pub fn validate(&self) -> Result<BreakpointFields, ValidationErrors> {
        let mut errors = Vec::new();

        let name = self.name.trim();
        check_text(
            &mut errors,
            "name",
            name,
            NAME_MAX_LEN,
            is_name_char,
            "can only contain letters, numbers, spaces, hyphens, and underscores",
        );

        let (min_width, max_width) = BREAKPOINT_WIDTH_RANGE;
        check_number(&mut errors, "width", self.width, min_width, max_width, true);

        let device = self.device.trim();
        check_text(
            &mut errors,
            "device",
            device,
            DEVICE_MAX_LEN,
            is_device_char,
            "can only contain letters, numbers, spaces, hyphens, underscores, and parentheses",
        );

        if !errors.is_empty() {
            debug!(count = errors.len(), "breakpoint input rejected");
            return Err(ValidationErrors(errors));
        }

        Ok(BreakpointFields {
            name: name.to_string(),
            width: self.width as u32,
            device: device.to_string(),
        })
    }
}

fn check_number(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
    integer: bool,
) {
    if !value.is_finite() {
        errors.push(ValidationError::Required { field });
    } else if integer && value.fract() != 0.0 {
        errors.push(ValidationError::NotInteger { field });
    } else if value < min || value > max {
        errors.push(ValidationError::OutOfRange { field, min, max });
    }
}

/// 两个值都有效时才检查大小关系
fn check_greater(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: f64,
    other: &'static str,
    other_value: f64,
) {
    if value.is_finite() && other_value.is_finite() && value <= other_value {
        errors.push(ValidationError::NotGreaterThan { field, other });
    }
}

/// 四个控制值都要落在 [0, 1]
///
/// x1 / x2 是 CSS `cubic-bezier()` 本身的要求；y1 / y2 限制在 [0, 1] 时曲线单调不减，
/// 插值结果不会越出 [min, max]
fn check_bezier(errors: &mut Vec<ValidationError>, bezier: CubicBezier) {
    let in_unit = |v: f64| (0.0..=1.0).contains(&v);
    if ![bezier.x1, bezier.y1, bezier.x2, bezier.y2]
        .into_iter()
        .all(in_unit)
    {
        errors.push(ValidationError::OutOfRange {
            field: "customBezier",
            min: 0.0,
            max: 1.0,
        });
    }
}

fn check_property_name(errors: &mut Vec<ValidationError>, name: &str) {
    let field = "customPropertyName";
    let mut chars = name.chars();

    match chars.next() {
        None => errors.push(ValidationError::Required { field }),
        Some(_) if name.chars().count() > PROPERTY_NAME_MAX_LEN => {
            errors.push(ValidationError::TooLong {
                field,
                max: PROPERTY_NAME_MAX_LEN,
            })
        }
        Some(first) => {
            if !first.is_ascii_alphabetic()
                || !chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
            {
                errors.push(ValidationError::InvalidFormat {
                    field,
                    expected: "must start with a letter and contain only letters, numbers, and hyphens",
                });
            }
        }
    }
}

fn check_text(
    errors: &mut Vec<ValidationError>,
    field: &'static str,
    value: &str,
    max_len: usize,
    allowed: fn(char) -> bool,
    expected: &'static str,
) {
    if value.is_empty() {
        errors.push(ValidationError::Required { field });
    } else if value.chars().count() > max_len {
        errors.push(ValidationError::TooLong {
            field,
            max: max_len,
        });
    } else if !value.chars().all(allowed) {
        errors.push(ValidationError::InvalidFormat { field, expected });
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_'
}

fn is_device_char(c: char) -> bool {
    is_name_char(c) || c == '(' || c == ')'
}
