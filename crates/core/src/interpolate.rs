use serde::{Deserialize, Serialize};

use crate::easing::ease;
use crate::types::{BreakpointStatus, ScalingConfig};

/// 插值引擎
///
/// 内部统一使用像素：`min_size` / `max_size` 先换算为 px，
/// 只有在输出时才按 `output_unit` 换回 rem。
///
/// `slope` / `intercept` 描述的是 px 空间的直线 `size = slope × width + intercept`，
/// 这条直线也是生成 `clamp()` 的依据。
#[derive(Debug, Clone)]
pub struct FluidScale<'a> {
    config: &'a ScalingConfig,
    min_px: f64,
    max_px: f64,
    min_width: f64,
    max_width: f64,
    slope: f64,
    intercept: f64,
}

impl<'a> FluidScale<'a> {
    /// # Panics
    ///
    /// `max_screen_width <= min_screen_width` 时直接 panic。
    /// 校验阶段已经拒绝了这类配置，走到这里说明调用方绕过了校验。
    pub fn new(config: &'a ScalingConfig) -> Self {
        assert!(
            config.max_screen_width > config.min_screen_width,
            "max screen width ({}) must be greater than min screen width ({})",
            config.max_screen_width,
            config.min_screen_width
        );

        let min_px = config.to_px(config.min_size);
        let max_px = config.to_px(config.max_size);
        let min_width = f64::from(config.min_screen_width);
        let max_width = f64::from(config.max_screen_width);

        let slope = (max_px - min_px) / (max_width - min_width);
        let intercept = min_px - slope * min_width;

        Self {
            config,
            min_px,
            max_px,
            min_width,
            max_width,
            slope,
            intercept,
        }
    }

    pub fn config(&self) -> &ScalingConfig {
        self.config
    }

    /// px / px
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// px
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// `vw` / `cqi` 系数（slope × 100）
    pub fn slope_percent(&self) -> f64 {
        self.slope * 100.0
    }

    /// 输出单位下的截距
    pub fn intercept_in_unit(&self) -> f64 {
        self.config.from_px(self.intercept)
    }

    /// 输出单位下每 px 屏宽的增量
    pub fn slope_in_unit(&self) -> f64 {
        self.config.from_px(self.slope)
    }

    pub fn min_in_unit(&self) -> f64 {
        self.config.min_size
    }

    pub fn max_in_unit(&self) -> f64 {
        self.config.max_size
    }

    /// 计算某个屏幕宽度下的值（输出单位）和状态
    ///
    /// 边界宽度直接返回配置里的 min / max，不经过任何浮点运算
    pub fn evaluate(&self, screen_width: f64) -> (f64, BreakpointStatus) {
        if screen_width <= self.min_width {
            return (self.config.min_size, BreakpointStatus::Min);
        }
        if screen_width >= self.max_width {
            return (self.config.max_size, BreakpointStatus::Max);
        }

        let progress = (screen_width - self.min_width) / (self.max_width - self.min_width);
        let eased = ease(
            progress.clamp(0.0, 1.0),
            self.config.scaling_function,
            self.config.custom_bezier,
        );
        let px = self.min_px + (self.max_px - self.min_px) * eased;

        (self.config.from_px(px), BreakpointStatus::Fluid)
    }

    pub fn value_at(&self, screen_width: f64) -> f64 {
        self.evaluate(screen_width).0
    }
}

/// 计算某个屏幕宽度下的值（输出单位）
///
/// # Panics
///
/// 见 [`FluidScale::new`]
pub fn compute_value(config: &ScalingConfig, screen_width: f64) -> f64 {
    FluidScale::new(config).value_at(screen_width)
}

/// 曲线采样参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CurveOptions {
    /// 在 [min, max] 屏宽两侧额外延伸的宽度（px）
    pub padding: u32,
    /// 采样点数，小于 [`CurveOptions::MIN_SAMPLES`] 时按最小值处理
    pub samples: usize,
}

impl CurveOptions {
    pub const MIN_SAMPLES: usize = 100;
}

impl Default for CurveOptions {
    fn default() -> Self {
        Self {
            padding: 200,
            samples: 120,
        }
    }
}

/// 图表采样点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurveSample {
    pub screen_width: f64,
    pub value: f64,
    pub status: BreakpointStatus,
}

/// 曲线采样迭代器
///
/// 有限、可重复（`Clone` 后从头开始），不保存任何状态到配置里
#[derive(Debug, Clone)]
pub struct CurveSamples<'a> {
    scale: FluidScale<'a>,
    start: f64,
    end: f64,
    step: f64,
    index: usize,
    count: usize,
}

impl<'a> CurveSamples<'a> {
    /// 采样区间 `(start, end)`
    pub fn range(&self) -> (f64, f64) {
        (self.start, self.end)
    }
}

impl Iterator for CurveSamples<'_> {
    type Item = CurveSample;

    fn next(&mut self) -> Option<CurveSample> {
        if self.index >= self.count {
            return None;
        }

        // 最后一个点直接取区间终点，避免累积误差
        let screen_width = if self.index + 1 == self.count {
            self.end
        } else {
            self.start + self.step * self.index as f64
        };
        self.index += 1;

        let (value, status) = self.scale.evaluate(screen_width);
        Some(CurveSample {
            screen_width,
            value,
            status,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CurveSamples<'_> {}

/// 为图表生成等距采样点
///
/// 区间为 `[max(0, min_screen - padding), max_screen + padding]`，两端都包含
///
/// # Panics
///
/// 见 [`FluidScale::new`]
pub fn sample_curve(config: &ScalingConfig, options: CurveOptions) -> CurveSamples<'_> {
    let scale = FluidScale::new(config);
    let count = options.samples.max(CurveOptions::MIN_SAMPLES);

    let start = f64::from(config.min_screen_width.saturating_sub(options.padding));
    let end = f64::from(config.max_screen_width) + f64::from(options.padding);
    let step = (end - start) / (count - 1) as f64;

    CurveSamples {
        scale,
        start,
        end,
        step,
        index: 0,
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CubicBezier, OutputUnit, ScalingFunction, ScalingInput};

    const FUNCTIONS: [ScalingFunction; 5] = [
        ScalingFunction::Linear,
        ScalingFunction::EaseIn,
        ScalingFunction::EaseOut,
        ScalingFunction::EaseInOut,
        ScalingFunction::Custom,
    ];

    fn config(function: ScalingFunction) -> ScalingConfig {
        ScalingInput {
            scaling_function: function,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_linear_scenario() {
        let config = config(ScalingFunction::Linear);
        assert_eq!(compute_value(&config, 320.0), 16.0);
        assert_eq!(compute_value(&config, 1200.0), 32.0);
        assert!((compute_value(&config, 760.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundaries_exact_for_every_function() {
        for function in FUNCTIONS {
            for unit in [OutputUnit::Px, OutputUnit::Rem] {
                let mut config = config(function).with_output_unit(unit);
                config.min_size = 0.7;
                config.max_size = 2.3;
                let scale = FluidScale::new(&config);
                assert_eq!(scale.evaluate(320.0), (0.7, BreakpointStatus::Min));
                assert_eq!(scale.evaluate(1200.0), (2.3, BreakpointStatus::Max));
                assert_eq!(scale.evaluate(100.0), (0.7, BreakpointStatus::Min));
                assert_eq!(scale.evaluate(4000.0), (2.3, BreakpointStatus::Max));
            }
        }
    }

    #[test]
    fn test_linear_matches_slope_intercept() {
        for unit in [OutputUnit::Px, OutputUnit::Rem] {
            let config = config(ScalingFunction::Linear).with_output_unit(unit);
            let scale = FluidScale::new(&config);
            for width in (321..1200).step_by(37) {
                let w = f64::from(width);
                let expected = scale.slope_in_unit() * w + scale.intercept_in_unit();
                let (value, status) = scale.evaluate(w);
                assert_eq!(status, BreakpointStatus::Fluid);
                assert!((value - expected).abs() < 1e-9, "{unit} at {width}");
            }
        }
    }

    #[test]
    fn test_slope_and_intercept() {
        let config = config(ScalingFunction::Linear);
        let scale = FluidScale::new(&config);
        // (32 - 16) / (1200 - 320)
        assert!((scale.slope() - 16.0 / 880.0).abs() < 1e-12);
        assert!((scale.intercept() - (16.0 - 16.0 / 880.0 * 320.0)).abs() < 1e-12);
        assert!((scale.slope_percent() - 1.818181818).abs() < 1e-6);

        let rem = config.with_output_unit(OutputUnit::Rem);
        let rem_scale = FluidScale::new(&rem);
        // px 空间的斜率与输出单位无关
        assert!((rem_scale.slope() - scale.slope()).abs() < 1e-12);
        assert!((rem_scale.intercept_in_unit() - scale.intercept() / 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_rem_values_are_px_divided_by_root() {
        let px = config(ScalingFunction::EaseOut);
        let rem = px.with_output_unit(OutputUnit::Rem);
        for width in [400.0, 760.0, 1000.0] {
            let a = compute_value(&px, width) / 16.0;
            let b = compute_value(&rem, width);
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_monotonic_for_every_function() {
        for function in FUNCTIONS {
            let config = config(function);
            let scale = FluidScale::new(&config);
            let mut prev = f64::MIN;
            for width in 0..=1500 {
                let value = scale.value_at(f64::from(width));
                assert!(value >= prev - 1e-9, "{function} decreased at {width}");
                prev = value;
            }
        }
    }

    #[test]
    fn test_eased_is_not_linear() {
        let eased = compute_value(&config(ScalingFunction::EaseOut), 760.0);
        // ease-out 在中点处超过线性值 24
        assert!((eased - (16.0 + 16.0 * 0.875)).abs() < 1e-9);
    }

    #[test]
    fn test_custom_bezier_used() {
        let mut config = config(ScalingFunction::Custom);
        config.custom_bezier = Some(CubicBezier::new(0.0, 0.0, 1.0, 1.0));
        assert!((compute_value(&config, 760.0) - 24.0).abs() < 1e-6);

        config.custom_bezier = None;
        assert!((compute_value(&config, 760.0) - 24.0).abs() < 1e-9);
    }

    #[test]
    #[should_panic(expected = "must be greater than")]
    fn test_inverted_screens_panic() {
        let mut config = config(ScalingFunction::Linear);
        config.max_screen_width = config.min_screen_width;
        FluidScale::new(&config);
    }

    #[test]
    fn test_sample_curve_range_and_count() {
        let config = config(ScalingFunction::Linear);
        let samples = sample_curve(&config, CurveOptions::default());
        assert_eq!(samples.len(), 120);
        assert_eq!(samples.range(), (120.0, 1400.0));

        let points: Vec<CurveSample> = samples.clone().collect();
        assert_eq!(points.first().unwrap().screen_width, 120.0);
        assert_eq!(points.last().unwrap().screen_width, 1400.0);
        assert_eq!(points.first().unwrap().status, BreakpointStatus::Min);
        assert_eq!(points.last().unwrap().status, BreakpointStatus::Max);
        assert!(points
            .iter()
            .any(|p| p.status == BreakpointStatus::Fluid));

        // 可重复
        let again: Vec<CurveSample> = samples.collect();
        assert_eq!(points, again);
    }

    #[test]
    fn test_sample_curve_minimum_samples_and_zero_floor() {
        let config = config(ScalingFunction::Linear);
        let samples = sample_curve(
            &config,
            CurveOptions {
                padding: 500,
                samples: 10,
            },
        );
        assert_eq!(samples.len(), CurveOptions::MIN_SAMPLES);
        assert_eq!(samples.range().0, 0.0);
    }
}
