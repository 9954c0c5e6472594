use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use fluidclamp_core::{
    compute_value as rs_compute_value, default_breakpoints as rs_default_breakpoints,
    parse_query_string as rs_parse_query_string, sample_curve as rs_sample_curve,
    to_query_string as rs_to_query_string, Breakpoint, BreakpointInput, CurveOptions,
    CurveSample, ScalingConfig, ScalingInput,
};
use fluidclamp_css::{calculate as rs_calculate, EmitOptions, FieldError};

pub mod session;

pub use session::Session;

// ── JS 侧 serde 镜像类型 ──────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsBreakpointValidation {
    valid: bool,
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsCurve {
    range: [f64; 2],
    samples: Vec<CurveSample>,
}

// ── 参数解析 ──────────────────────────────────────────────────

/// 缺省（undefined / null）时使用 `T::default()`
fn parse_or_default<T>(value: JsValue, what: &str) -> Result<T, JsError>
where
    T: Default + for<'de> Deserialize<'de>,
{
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsError::new(&format!("Invalid {}: {}", what, e)))
    }
}

fn parse_config(config: JsValue) -> Result<ScalingConfig, JsError> {
    let input: ScalingInput = parse_or_default(config, "config")?;
    input
        .validate()
        .map_err(|e| JsError::new(&e.to_string()))
}

fn serialize<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsError::new(&format!("Serialization error: {}", e)))
}

// ── WASM 导出函数 ─────────────────────────────────────────────

/// 初始化 panic hook（自动调用）
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 计算全部输出
///
/// @param config            - 表单输入，可选
/// @param customBreakpoints - 自定义断点数组，可选
/// @returns `{ cssClamp, cssFallback, cssCustomProperties, scssFunction, breakpointTable, errors }`
#[wasm_bindgen(js_name = "calculate")]
pub fn calculate(config: JsValue, custom_breakpoints: JsValue) -> Result<JsValue, JsError> {
    let input: ScalingInput = parse_or_default(config, "config")?;
    let custom: Vec<Breakpoint> = parse_or_default(custom_breakpoints, "breakpoints")?;
    serialize(&rs_calculate(&input, &custom))
}

/// 某个屏宽下的值（输出单位）
#[wasm_bindgen(js_name = "computeValue")]
pub fn compute_value(config: JsValue, width: f64) -> Result<f64, JsError> {
    let config = parse_config(config)?;
    Ok(rs_compute_value(&config, width))
}

/// 图表采样
///
/// @param options - `{ padding, samples }`，可选
/// @returns `{ range: [start, end], samples: [{ screenWidth, value, status }] }`
#[wasm_bindgen(js_name = "sampleCurve")]
pub fn sample_curve(config: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let config = parse_config(config)?;
    let options: CurveOptions = parse_or_default(options, "curve options")?;

    let samples = rs_sample_curve(&config, options);
    let (start, end) = samples.range();
    serialize(&JsCurve {
        range: [start, end],
        samples: samples.collect(),
    })
}

/// URL 查询字符串 → 表单输入（宽松解析，未校验）
#[wasm_bindgen(js_name = "parseQueryString")]
pub fn parse_query_string(query: &str) -> Result<JsValue, JsError> {
    serialize(&rs_parse_query_string(query))
}

/// 表单输入 → URL 查询字符串（不含 `?`）
#[wasm_bindgen(js_name = "toQueryString")]
pub fn to_query_string(config: JsValue) -> Result<String, JsError> {
    let config = parse_config(config)?;
    Ok(rs_to_query_string(&config))
}

#[wasm_bindgen(js_name = "defaultBreakpoints")]
pub fn default_breakpoints() -> Result<JsValue, JsError> {
    serialize(&rs_default_breakpoints())
}

/// 校验断点表单
///
/// @returns `{ valid, errors: [{ field, message }] }`
#[wasm_bindgen(js_name = "validateBreakpoint")]
pub fn validate_breakpoint(data: JsValue) -> Result<JsValue, JsError> {
    let input: BreakpointInput = parse_or_default(data, "breakpoint")?;
    serialize(&breakpoint_validation(&input))
}

fn breakpoint_validation(input: &BreakpointInput) -> JsBreakpointValidation {
    match input.validate() {
        Ok(_) => JsBreakpointValidation {
            valid: true,
            errors: Vec::new(),
        },
        Err(errors) => JsBreakpointValidation {
            valid: false,
            errors: FieldError::from_errors(&errors),
        },
    }
}

// ── 会话 ──────────────────────────────────────────────────────

/// 编辑器会话
///
/// JS 侧负责计时：每次输入后用当前时间调用 `setConfig`，
/// 定时调用 `takeQueryUpdate(Date.now())`，拿到字符串就写入 URL
#[wasm_bindgen]
pub struct FluidSession {
    inner: Session,
}

#[wasm_bindgen]
impl FluidSession {
    /// @param query - 初始 URL 查询字符串，可选
    #[wasm_bindgen(constructor)]
    pub fn new(query: Option<String>) -> FluidSession {
        let inner = match query {
            Some(query) => Session::from_query(&query),
            None => Session::new(),
        };
        FluidSession { inner }
    }

    /// 当前表单输入
    #[wasm_bindgen(js_name = "config")]
    pub fn config(&self) -> Result<JsValue, JsError> {
        serialize(self.inner.input())
    }

    #[wasm_bindgen(js_name = "setEmitOptions")]
    pub fn set_emit_options(&mut self, options: JsValue) -> Result<(), JsError> {
        let options: EmitOptions = parse_or_default(options, "emit options")?;
        self.inner.set_options(options);
        Ok(())
    }

    /// 更新表单输入，返回新的输出
    #[wasm_bindgen(js_name = "setConfig")]
    pub fn set_config(&mut self, config: JsValue, now_ms: f64) -> Result<JsValue, JsError> {
        let input: ScalingInput = parse_or_default(config, "config")?;
        serialize(&self.inner.set_input(input, now_ms))
    }

    #[wasm_bindgen(js_name = "addBreakpoint")]
    pub fn add_breakpoint(&mut self, data: JsValue) -> Result<JsValue, JsError> {
        let input: BreakpointInput = parse_or_default(data, "breakpoint")?;
        let breakpoint = self
            .inner
            .add_breakpoint(&input)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serialize(&breakpoint)
    }

    #[wasm_bindgen(js_name = "updateBreakpoint")]
    pub fn update_breakpoint(&mut self, id: &str, data: JsValue) -> Result<JsValue, JsError> {
        let input: BreakpointInput = parse_or_default(data, "breakpoint")?;
        let breakpoint = self
            .inner
            .update_breakpoint(id, &input)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serialize(&breakpoint)
    }

    /// 删除自定义断点；默认断点返回 false
    #[wasm_bindgen(js_name = "deleteBreakpoint")]
    pub fn delete_breakpoint(&mut self, id: &str) -> bool {
        self.inner.delete_breakpoint(id)
    }

    #[wasm_bindgen(js_name = "breakpoints")]
    pub fn breakpoints(&self) -> Result<JsValue, JsError> {
        serialize(&self.inner.breakpoints())
    }

    #[wasm_bindgen(js_name = "outputs")]
    pub fn outputs(&self) -> Result<JsValue, JsError> {
        serialize(&self.inner.outputs())
    }

    /// 到期时返回待写入 URL 的查询字符串，否则返回 undefined
    #[wasm_bindgen(js_name = "takeQueryUpdate")]
    pub fn take_query_update(&mut self, now_ms: f64) -> Option<String> {
        self.inner.take_query_update(now_ms)
    }

    #[wasm_bindgen(js_name = "cancelQueryUpdate")]
    pub fn cancel_query_update(&mut self) {
        self.inner.cancel_query_update();
    }
}
