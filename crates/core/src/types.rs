use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lookup::SCALING_FUNCTIONS;

/// 输出单位
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnit {
    #[default]
    Px,
    Rem,
}

impl OutputUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputUnit::Px => "px",
            OutputUnit::Rem => "rem",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "px" => Some(OutputUnit::Px),
            "rem" => Some(OutputUnit::Rem),
            _ => None,
        }
    }
}

impl fmt::Display for OutputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 插值曲线
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalingFunction {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// 使用 `ScalingConfig::custom_bezier`
    Custom,
}

impl ScalingFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalingFunction::Linear => "linear",
            ScalingFunction::EaseIn => "ease-in",
            ScalingFunction::EaseOut => "ease-out",
            ScalingFunction::EaseInOut => "ease-in-out",
            ScalingFunction::Custom => "custom",
        }
    }

    /// 按名称查找（兼容 `easeIn` / `ease_in` 等写法）
    pub fn from_name(name: &str) -> Option<Self> {
        SCALING_FUNCTIONS.get(name.trim()).copied()
    }
}

impl fmt::Display for ScalingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `cubic-bezier(x1, y1, x2, y2)` 的四个控制值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// CSS `ease`
    pub const EASE: CubicBezier = CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// 解析表单/URL 中的 bezier 文本
    ///
    /// 支持：
    /// - `"0.25,0.1,0.25,1"`
    /// - `"0.25 0.1 0.25 1"`
    /// - `"cubic-bezier(0.25, 0.1, 0.25, 1)"`
    ///
    /// 格式不对时返回 `None`，调用方按线性处理
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        let inner = trimmed
            .strip_prefix("cubic-bezier(")
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(trimmed);

        let values: Vec<f64> = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>())
            .collect::<Result<_, _>>()
            .ok()?;

        match values.as_slice() {
            &[x1, y1, x2, y2] if values.iter().all(|v| v.is_finite()) => {
                Some(Self::new(x1, y1, x2, y2))
            }
            _ => None,
        }
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::EASE
    }
}

impl From<[f64; 4]> for CubicBezier {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<CubicBezier> for [f64; 4] {
    fn from(b: CubicBezier) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

impl fmt::Display for CubicBezier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// 表单/URL 输入（未校验）
///
/// 所有字段都有默认值，缺失字段回落到默认配置。
/// 通过 [`ScalingInput::validate`] 得到 [`ScalingConfig`]。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScalingInput {
    pub output_unit: OutputUnit,
    pub root_font_size: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_screen_width: f64,
    pub max_screen_width: f64,
    pub scaling_function: ScalingFunction,
    /// bezier 原始文本，解析失败时视为未设置
    pub custom_bezier: Option<String>,
    pub use_container_queries: bool,
    pub include_fallback: bool,
    pub generate_custom_properties: bool,
    pub custom_property_name: String,
}

impl Default for ScalingInput {
    fn default() -> Self {
        Self {
            output_unit: OutputUnit::Px,
            root_font_size: 16.0,
            min_size: 16.0,
            max_size: 32.0,
            min_screen_width: 320.0,
            max_screen_width: 1200.0,
            scaling_function: ScalingFunction::Linear,
            custom_bezier: Some(CubicBezier::EASE.to_string()),
            use_container_queries: false,
            include_fallback: false,
            generate_custom_properties: false,
            custom_property_name: "fluid-size".to_string(),
        }
    }
}

/// 校验后的配置（不可变值对象）
///
/// 不变量：`max_size > min_size`，`max_screen_width > min_screen_width`。
/// `min_size` / `max_size` 的单位是 `output_unit`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingConfig {
    pub output_unit: OutputUnit,
    pub root_font_size: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_screen_width: u32,
    pub max_screen_width: u32,
    pub scaling_function: ScalingFunction,
    pub custom_bezier: Option<CubicBezier>,
    pub use_container_queries: bool,
    pub include_fallback: bool,
    pub generate_custom_properties: bool,
    pub custom_property_name: String,
}

impl ScalingConfig {
    /// 流体单位：`cqi`（容器查询）或 `vw`
    pub fn fluid_unit(&self) -> &'static str {
        if self.use_container_queries {
            "cqi"
        } else {
            "vw"
        }
    }

    /// 将 `output_unit` 下的数值换算为像素
    pub fn to_px(&self, value: f64) -> f64 {
        match self.output_unit {
            OutputUnit::Px => value,
            OutputUnit::Rem => value * self.root_font_size,
        }
    }

    /// 将像素换算为 `output_unit` 下的数值
    pub fn from_px(&self, px: f64) -> f64 {
        match self.output_unit {
            OutputUnit::Px => px,
            OutputUnit::Rem => px / self.root_font_size,
        }
    }

    /// 切换输出单位，同时换算 min/max（保留 3 位小数）
    ///
    /// 例如 root = 16 时 `16px / 32px` → `1rem / 2rem`
    pub fn with_output_unit(&self, unit: OutputUnit) -> ScalingConfig {
        if unit == self.output_unit {
            return self.clone();
        }

        let convert = |value: f64| -> f64 {
            let converted = match unit {
                OutputUnit::Rem => value / self.root_font_size,
                OutputUnit::Px => value * self.root_font_size,
            };
            (converted * 1000.0).round() / 1000.0
        };

        ScalingConfig {
            output_unit: unit,
            min_size: convert(self.min_size),
            max_size: convert(self.max_size),
            ..self.clone()
        }
    }

    /// 转回可编辑的表单输入
    pub fn to_input(&self) -> ScalingInput {
        ScalingInput {
            output_unit: self.output_unit,
            root_font_size: self.root_font_size,
            min_size: self.min_size,
            max_size: self.max_size,
            min_screen_width: f64::from(self.min_screen_width),
            max_screen_width: f64::from(self.max_screen_width),
            scaling_function: self.scaling_function,
            custom_bezier: self.custom_bezier.map(|b| b.to_string()),
            use_container_queries: self.use_container_queries,
            include_fallback: self.include_fallback,
            generate_custom_properties: self.generate_custom_properties,
            custom_property_name: self.custom_property_name.clone(),
        }
    }
}

/// 设备分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Mobile,
    Tablet,
    Desktop,
}

/// 表格/图表中使用的设备图标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceIcon {
    DevicePhoneMobile,
    DeviceTablet,
    ComputerDesktop,
}

impl DeviceIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceIcon::DevicePhoneMobile => "device-phone-mobile",
            DeviceIcon::DeviceTablet => "device-tablet",
            DeviceIcon::ComputerDesktop => "computer-desktop",
        }
    }
}

impl DeviceCategory {
    /// 宽度 < 768 为 mobile，< 1024 为 tablet，其余为 desktop
    pub fn from_width(width: u32) -> Self {
        if width < 768 {
            DeviceCategory::Mobile
        } else if width < 1024 {
            DeviceCategory::Tablet
        } else {
            DeviceCategory::Desktop
        }
    }

    pub fn icon(&self) -> DeviceIcon {
        match self {
            DeviceCategory::Mobile => DeviceIcon::DevicePhoneMobile,
            DeviceCategory::Tablet => DeviceIcon::DeviceTablet,
            DeviceCategory::Desktop => DeviceIcon::ComputerDesktop,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Mobile => "mobile",
            DeviceCategory::Tablet => "tablet",
            DeviceCategory::Desktop => "desktop",
        }
    }
}

/// 断点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakpoint {
    pub id: String,
    pub name: String,
    /// 屏幕宽度（px）
    pub width: u32,
    pub device: String,
    pub category: DeviceCategory,
    pub is_default: bool,
    /// 被覆盖的默认断点 id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
}

/// 断点表单输入（未校验）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreakpointInput {
    pub name: String,
    pub width: f64,
    pub device: String,
}

impl BreakpointInput {
    pub fn new(name: impl Into<String>, width: f64, device: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            width,
            device: device.into(),
        }
    }
}

/// 某个宽度下的取值状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakpointStatus {
    /// 宽度 ≤ 最小屏幕宽度，取最小值
    Min,
    /// 宽度 ≥ 最大屏幕宽度，取最大值
    Max,
    /// 两者之间，插值
    Fluid,
}

/// 断点表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointResult {
    #[serde(flatten)]
    pub breakpoint: Breakpoint,
    /// 已格式化的值（不含单位）
    pub computed_value: String,
    pub status: BreakpointStatus,
    pub unit: OutputUnit,
    /// 由 `breakpoint.category` 决定
    pub icon: DeviceIcon,
}
