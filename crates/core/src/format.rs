/// 数值格式化
///
/// 规则（生成的 CSS 和断点表共用，必须保持一致）：
/// - 绝对值小于 0.001 时输出 `"0"`
/// - 否则四舍五入（远离零）到 3 位小数
/// - 去掉末尾的 0 和多余的小数点
///
/// ```
/// use fluidclamp_core::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(1.81818), "1.818");
/// assert_eq!(format_number(0.0625), "0.063");
/// assert_eq!(format_number(-0.0004), "0");
/// ```
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value.abs() < 0.001 {
        return "0".to_string();
    }

    let rounded = (value * 1000.0).round() / 1000.0;
    let fixed = format!("{:.3}", rounded);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
