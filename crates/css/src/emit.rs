use fluidclamp_core::{format_number, FluidScale, OutputUnit, ScalingConfig};
use serde::{Deserialize, Serialize};

const INDENT: &str = "  ";

/// 生成代码时使用的选择器和属性
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmitOptions {
    /// fallback 规则使用的选择器
    pub selector: String,
    /// 被赋值的 CSS 属性
    pub property: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            selector: ".fluid-element".to_string(),
            property: "font-size".to_string(),
        }
    }
}

/// 生成的 CSS 文本
///
/// 未开启的可选输出为空字符串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FluidCss {
    pub css_clamp: String,
    pub css_fallback: String,
    pub css_custom_properties: String,
}

/// 格式化后的各个数值（统一走 `format_number`）
struct Formatted {
    min: String,
    max: String,
    slope_percent: String,
    intercept: String,
    unit: &'static str,
    fluid_unit: &'static str,
}

impl Formatted {
    fn new(scale: &FluidScale<'_>) -> Self {
        let config = scale.config();
        Self {
            min: format_number(scale.min_in_unit()),
            max: format_number(scale.max_in_unit()),
            slope_percent: format_number(scale.slope_percent()),
            intercept: format_number(scale.intercept_in_unit()),
            unit: config.output_unit.as_str(),
            fluid_unit: config.fluid_unit(),
        }
    }
}

pub fn emit(config: &ScalingConfig, scale: &FluidScale<'_>) -> FluidCss {
    emit_with(config, scale, &EmitOptions::default())
}

pub fn emit_with(config: &ScalingConfig, scale: &FluidScale<'_>, options: &EmitOptions) -> FluidCss {
    let formatted = Formatted::new(scale);
    let css_clamp = clamp_of(&formatted);

    let css_fallback = if config.include_fallback {
        fallback_of(config, &formatted, options)
    } else {
        String::new()
    };

    let css_custom_properties = if config.generate_custom_properties {
        custom_properties_of(config, &formatted, &css_clamp, options)
    } else {
        String::new()
    };

    FluidCss {
        css_clamp,
        css_fallback,
        css_custom_properties,
    }
}

/// `clamp(<min>, calc(<slope>vw + <intercept>), <max>)`
pub fn clamp_expression(scale: &FluidScale<'_>) -> String {
    clamp_of(&Formatted::new(scale))
}

/// `@supports not (...)` 包裹的 media query 降级方案
pub fn fallback_block(scale: &FluidScale<'_>, options: &EmitOptions) -> String {
    fallback_of(scale.config(), &Formatted::new(scale), options)
}

/// `:root { --name: clamp(...) }` 以及用法注释
pub fn custom_properties_block(scale: &FluidScale<'_>, options: &EmitOptions) -> String {
    let formatted = Formatted::new(scale);
    let clamp = clamp_of(&formatted);
    custom_properties_of(scale.config(), &formatted, &clamp, options)
}

fn clamp_of(f: &Formatted) -> String {
    format!(
        "clamp({min}{unit}, calc({slope}{fluid} + {intercept}{unit}), {max}{unit})",
        min = f.min,
        max = f.max,
        slope = f.slope_percent,
        intercept = f.intercept,
        unit = f.unit,
        fluid = f.fluid_unit,
    )
}

fn fallback_of(config: &ScalingConfig, f: &Formatted, options: &EmitOptions) -> String {
    let mut css = String::new();

    css.push_str("/* Fallback for browsers without clamp() support */\n");
    css.push_str(&format!(
        "@supports not ({}: clamp(1px, 1{}, 2px)) {{\n",
        options.property, f.fluid_unit
    ));

    // 两个断点：最小屏宽取最小值，最大屏宽取最大值
    let steps = [
        (config.min_screen_width, &f.min),
        (config.max_screen_width, &f.max),
    ];
    for (i, (width, value)) in steps.iter().enumerate() {
        if i > 0 {
            css.push('\n');
        }
        css.push_str(&format!("{}@media (min-width: {}px) {{\n", INDENT, width));
        css.push_str(&format!("{}{} {{\n", INDENT.repeat(2), options.selector));
        css.push_str(&format!(
            "{}{}: {}{};\n",
            INDENT.repeat(3),
            options.property,
            value,
            f.unit
        ));
        css.push_str(&format!("{}}}\n", INDENT.repeat(2)));
        css.push_str(&format!("{}}}\n", INDENT));
    }

    css.push_str("}\n");
    css
}

fn custom_properties_of(
    config: &ScalingConfig,
    f: &Formatted,
    clamp: &str,
    options: &EmitOptions,
) -> String {
    let name = sanitize_property_name(&config.custom_property_name);
    let mut css = String::new();

    css.push_str(":root {\n");
    css.push_str(&format!("{}--{}: {};\n", INDENT, name, clamp));
    css.push_str(&format!("{}--{}-min: {}{};\n", INDENT, name, f.min, f.unit));
    css.push_str(&format!("{}--{}-max: {}{};\n", INDENT, name, f.max, f.unit));
    css.push_str("}\n\n");
    css.push_str(&format!(
        "/* Usage: {}: var(--{}); */\n",
        options.property, name
    ));
    css
}

/// 只保留 `[A-Za-z0-9-]`，并去掉前导的 `-`
///
/// 清理后为空时使用 `fluid-size`
pub fn sanitize_property_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let cleaned = cleaned.trim_start_matches('-');

    if cleaned.is_empty() {
        "fluid-size".to_string()
    } else {
        cleaned.to_string()
    }
}

/// SCSS `fluid-clamp()` 调用示例
pub fn scss_usage(config: &ScalingConfig) -> String {
    let root = match config.output_unit {
        OutputUnit::Rem => format!(", {}", format_number(config.root_font_size)),
        OutputUnit::Px => String::new(),
    };

    format!(
        "// SCSS Function Usage\n.element {{\n{}font-size: fluid-clamp({}, {}, {}, {}, '{}'{});\n}}",
        INDENT,
        format_number(config.min_size),
        format_number(config.max_size),
        config.min_screen_width,
        config.max_screen_width,
        config.output_unit,
        root
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluidclamp_core::ScalingInput;
    use pretty_assertions::assert_eq;

    fn config(input: ScalingInput) -> ScalingConfig {
        input.validate().unwrap()
    }

    #[test]
    fn test_clamp_px() {
        let config = config(ScalingInput::default());
        let scale = FluidScale::new(&config);
        assert_eq!(
            clamp_expression(&scale),
            "clamp(16px, calc(1.818vw + 10.182px), 32px)"
        );
    }

    #[test]
    fn test_clamp_rem() {
        let config = config(ScalingInput::default()).with_output_unit(OutputUnit::Rem);
        let scale = FluidScale::new(&config);
        // 10.1818px / 16 = 0.63636rem
        assert_eq!(
            clamp_expression(&scale),
            "clamp(1rem, calc(1.818vw + 0.636rem), 2rem)"
        );
    }

    #[test]
    fn test_clamp_quarter_rem_intercept() {
        // 480px → 16px，1120px → 32px：slope 2.5vw，intercept 4px = 0.25rem
        let config = config(ScalingInput {
            output_unit: OutputUnit::Rem,
            min_size: 1.0,
            max_size: 2.0,
            min_screen_width: 480.0,
            max_screen_width: 1120.0,
            ..Default::default()
        });
        let scale = FluidScale::new(&config);
        assert_eq!(
            clamp_expression(&scale),
            "clamp(1rem, calc(2.5vw + 0.25rem), 2rem)"
        );
    }

    #[test]
    fn test_container_queries_use_cqi() {
        let config = config(ScalingInput {
            use_container_queries: true,
            ..Default::default()
        });
        let scale = FluidScale::new(&config);
        assert_eq!(
            clamp_expression(&scale),
            "clamp(16px, calc(1.818cqi + 10.182px), 32px)"
        );
    }

    #[test]
    fn test_negative_intercept() {
        let config = config(ScalingInput {
            min_size: 10.0,
            max_size: 100.0,
            min_screen_width: 400.0,
            max_screen_width: 1000.0,
            ..Default::default()
        });
        let scale = FluidScale::new(&config);
        // slope 0.15 → 15vw，intercept 10 − 60 = −50px
        assert_eq!(
            clamp_expression(&scale),
            "clamp(10px, calc(15vw + -50px), 100px)"
        );
    }

    #[test]
    fn test_optional_outputs_empty_by_default() {
        let config = config(ScalingInput::default());
        let css = emit(&config, &FluidScale::new(&config));
        assert!(!css.css_clamp.is_empty());
        assert_eq!(css.css_fallback, "");
        assert_eq!(css.css_custom_properties, "");
    }

    #[test]
    fn test_fallback_block() {
        let config = config(ScalingInput {
            include_fallback: true,
            ..Default::default()
        });
        let css = emit(&config, &FluidScale::new(&config));
        let expected = "\
/* Fallback for browsers without clamp() support */
@supports not (font-size: clamp(1px, 1vw, 2px)) {
  @media (min-width: 320px) {
    .fluid-element {
      font-size: 16px;
    }
  }

  @media (min-width: 1200px) {
    .fluid-element {
      font-size: 32px;
    }
  }
}
";
        assert_eq!(css.css_fallback, expected);
    }

    #[test]
    fn test_fallback_custom_selector() {
        let config = config(ScalingInput {
            include_fallback: true,
            ..Default::default()
        });
        let options = EmitOptions {
            selector: "h1".to_string(),
            property: "margin-block".to_string(),
        };
        let css = fallback_block(&FluidScale::new(&config), &options);
        assert!(css.contains("@supports not (margin-block: clamp(1px, 1vw, 2px))"));
        assert!(css.contains("    h1 {\n      margin-block: 32px;\n"));
    }

    #[test]
    fn test_custom_properties_block() {
        let config = config(ScalingInput {
            output_unit: OutputUnit::Rem,
            min_size: 1.0,
            max_size: 2.0,
            generate_custom_properties: true,
            custom_property_name: "heading-size".to_string(),
            ..Default::default()
        });
        let css = emit(&config, &FluidScale::new(&config));
        let expected = "\
:root {
  --heading-size: clamp(1rem, calc(1.818vw + 0.636rem), 2rem);
  --heading-size-min: 1rem;
  --heading-size-max: 2rem;
}

/* Usage: font-size: var(--heading-size); */
";
        assert_eq!(css.css_custom_properties, expected);
    }

    #[test]
    fn test_sanitize_property_name() {
        assert_eq!(sanitize_property_name("font size!"), "fontsize");
        assert_eq!(sanitize_property_name("--spacing-lg"), "spacing-lg");
        assert_eq!(sanitize_property_name("$$$"), "fluid-size");
    }

    #[test]
    fn test_scss_usage() {
        let px = config(ScalingInput::default());
        assert_eq!(
            scss_usage(&px),
            "// SCSS Function Usage\n.element {\n  font-size: fluid-clamp(16, 32, 320, 1200, 'px');\n}"
        );

        let rem = px.with_output_unit(OutputUnit::Rem);
        assert!(scss_usage(&rem).contains("fluid-clamp(1, 2, 320, 1200, 'rem', 16);"));
    }
}
