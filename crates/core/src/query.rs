//! URL 查询参数的读写
//!
//! 参数名与表单字段一一对应：
//!
//! | key | 字段 |
//! |-----|------|
//! | `unit` | outputUnit |
//! | `root` | rootFontSize |
//! | `min` / `max` | minSize / maxSize |
//! | `minScreen` / `maxScreen` | minScreenWidth / maxScreenWidth |
//! | `scaling` | scalingFunction |
//! | `bezier` | customBezier |
//! | `container` | useContainerQueries |
//! | `fallback` | includeFallback |
//! | `customProps` | generateCustomProperties |
//! | `propName` | customPropertyName |
//!
//! 解析是宽松的：缺失或无法解析的值回落到默认值，未知参数忽略。
//! 编码规则为 `application/x-www-form-urlencoded`（空格写作 `+`）。

use tracing::trace;
use url::form_urlencoded;

use crate::lookup::BOOL_VALUES;
use crate::types::{CubicBezier, OutputUnit, ScalingConfig, ScalingFunction, ScalingInput};

/// 生成查询字符串（不含前导 `?`）
pub fn to_query_string(config: &ScalingConfig) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("unit", config.output_unit.as_str().to_string()),
        ("root", config.root_font_size.to_string()),
        ("min", config.min_size.to_string()),
        ("max", config.max_size.to_string()),
        ("minScreen", config.min_screen_width.to_string()),
        ("maxScreen", config.max_screen_width.to_string()),
        ("scaling", config.scaling_function.as_str().to_string()),
        // 未设置时写空值，解析时得到 None
        (
            "bezier",
            config
                .custom_bezier
                .map(|b| b.to_string())
                .unwrap_or_default(),
        ),
    ];

    pairs.push(("container", config.use_container_queries.to_string()));
    pairs.push(("fallback", config.include_fallback.to_string()));
    pairs.push(("customProps", config.generate_custom_properties.to_string()));
    pairs.push(("propName", config.custom_property_name.clone()));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// 解析查询字符串为表单输入
///
/// 结果仍需 [`ScalingInput::validate`]
pub fn parse_query_string(query: &str) -> ScalingInput {
    let mut input = ScalingInput::default();
    let defaults = ScalingInput::default();
    let query = query.trim().trim_start_matches('?');

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match &*key {
            "unit" => {
                input.output_unit = OutputUnit::from_name(&value).unwrap_or(defaults.output_unit)
            }
            "root" => input.root_font_size = positive(&value).unwrap_or(defaults.root_font_size),
            "min" => input.min_size = positive(&value).unwrap_or(defaults.min_size),
            "max" => input.max_size = positive(&value).unwrap_or(defaults.max_size),
            "minScreen" => {
                input.min_screen_width = positive(&value).unwrap_or(defaults.min_screen_width)
            }
            "maxScreen" => {
                input.max_screen_width = positive(&value).unwrap_or(defaults.max_screen_width)
            }
            "scaling" => {
                input.scaling_function =
                    ScalingFunction::from_name(&value).unwrap_or(defaults.scaling_function)
            }
            "bezier" => {
                // 格式错误时保持未设置，曲线按线性处理
                input.custom_bezier = CubicBezier::parse(&value).map(|b| b.to_string())
            }
            "container" => input.use_container_queries = flag(&value),
            "fallback" => input.include_fallback = flag(&value),
            "customProps" => input.generate_custom_properties = flag(&value),
            "propName" => input.custom_property_name = value.into_owned(),
            _ => trace!(key = %key, "ignoring unknown query parameter"),
        }
    }

    input
}

/// 与 `parseFloat(x) || default` 一致：0、负数、NaN 都视为缺失
fn positive(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    if parsed.is_finite() && parsed > 0.0 {
        Some(parsed)
    } else {
        trace!(value, "falling back to default");
        None
    }
}

fn flag(value: &str) -> bool {
    BOOL_VALUES.get(value.trim()).copied().unwrap_or(false)
}
