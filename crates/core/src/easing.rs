//! 缓动曲线
//!
//! 把归一化进度 `t ∈ [0, 1]` 映射为缓动后的进度，同样落在 [0, 1]。
//! 调用方负责先把 `t` 限制在 [0, 1]；边界宽度不经过这里。

use crate::types::{CubicBezier, ScalingFunction};

/// 计算缓动后的进度
///
/// - `linear`：恒等
/// - `ease-in`：smoothstep 近似 `t² (3 − 2t)`
/// - `ease-out`：`1 − (1 − t)³`
/// - `ease-in-out`：分段三次，`t < 0.5` 时 `2t²`，否则 `1 − (−2t + 2)³ / 2`
/// - `custom`：按 CSS `cubic-bezier()` 求值；没有 bezier 时按线性处理
pub fn ease(t: f64, function: ScalingFunction, bezier: Option<CubicBezier>) -> f64 {
    match function {
        ScalingFunction::Linear => t,
        ScalingFunction::EaseIn => t * t * (3.0 - 2.0 * t),
        ScalingFunction::EaseOut => 1.0 - (1.0 - t).powi(3),
        ScalingFunction::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
            }
        }
        ScalingFunction::Custom => match bezier {
            Some(b) => cubic_bezier(t, b),
            None => t,
        },
    }
}

const NEWTON_ITERATIONS: usize = 8;
const BISECTION_ITERATIONS: usize = 64;
const EPSILON: f64 = 1e-12;

/// 与浏览器一致的 `cubic-bezier()` 求值
///
/// 先用 Newton-Raphson 求解 `x(p) = t`，斜率过小时退回二分法，最后返回 `y(p)`
pub fn cubic_bezier(t: f64, b: CubicBezier) -> f64 {
    // 端点精确返回
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut p = t;
    for _ in 0..NEWTON_ITERATIONS {
        let err = sample(p, b.x1, b.x2) - t;
        if err.abs() < EPSILON {
            return sample(p, b.y1, b.y2);
        }
        let slope = slope(p, b.x1, b.x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p = (p - err / slope).clamp(0.0, 1.0);
    }

    // 二分法兜底（x1, x2 ∈ [0, 1] 时 x(p) 单调，一定收敛）
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = t;
    for _ in 0..BISECTION_ITERATIONS {
        let x = sample(p, b.x1, b.x2);
        if (x - t).abs() < EPSILON {
            break;
        }
        if x < t {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    sample(p, b.y1, b.y2)
}

/// B(p) = 3(1−p)²p·p1 + 3(1−p)p²·p2 + p³
#[inline]
fn sample(p: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * p + b) * p + c) * p
}

#[inline]
fn slope(p: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * p + 2.0 * b) * p + c
}
