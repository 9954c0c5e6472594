//! 静态名称映射
//!
//! 使用 phf 在编译期生成完美哈希表，表单值和 URL 参数都走这里。

use phf::phf_map;

use crate::types::ScalingFunction;

/// 曲线名称 → ScalingFunction
///
/// 除了标准的 kebab-case，也接受 camelCase / snake_case 写法
pub static SCALING_FUNCTIONS: phf::Map<&'static str, ScalingFunction> = phf_map! {
    "linear" => ScalingFunction::Linear,

    "ease-in" => ScalingFunction::EaseIn,
    "easeIn" => ScalingFunction::EaseIn,
    "ease_in" => ScalingFunction::EaseIn,

    "ease-out" => ScalingFunction::EaseOut,
    "easeOut" => ScalingFunction::EaseOut,
    "ease_out" => ScalingFunction::EaseOut,

    "ease-in-out" => ScalingFunction::EaseInOut,
    "easeInOut" => ScalingFunction::EaseInOut,
    "ease_in_out" => ScalingFunction::EaseInOut,

    "custom" => ScalingFunction::Custom,
    "cubic-bezier" => ScalingFunction::Custom,
};

/// URL 布尔参数
pub static BOOL_VALUES: phf::Map<&'static str, bool> = phf_map! {
    "true" => true,
    "1" => true,
    "yes" => true,
    "on" => true,
    "false" => false,
    "0" => false,
    "no" => false,
    "off" => false,
};
