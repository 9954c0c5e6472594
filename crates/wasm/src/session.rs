use fluidclamp_core::{
    parse_query_string, to_query_string, Breakpoint, BreakpointCatalog, BreakpointInput,
    CatalogError, Debouncer, ScalingInput,
};
use fluidclamp_css::{calculate_with, Calculation, EmitOptions};
use tracing::debug;

/// 编辑器会话状态
///
/// 持有当前表单输入、自定义断点和 URL 同步槽；不依赖 JS 类型，
/// 由 [`crate::FluidSession`] 包装后导出
#[derive(Debug, Clone, Default)]
pub struct Session {
    input: ScalingInput,
    catalog: BreakpointCatalog,
    query_sync: Debouncer<String>,
    options: EmitOptions,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 URL 查询字符串恢复
    pub fn from_query(query: &str) -> Self {
        Self {
            input: parse_query_string(query),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &ScalingInput {
        &self.input
    }

    pub fn set_options(&mut self, options: EmitOptions) {
        self.options = options;
    }

    /// 替换表单输入
    ///
    /// 输入合法时安排一次 URL 更新；不合法时保留上一次安排的值
    pub fn set_input(&mut self, input: ScalingInput, now_ms: f64) -> Calculation {
        self.input = input;

        match self.input.validate() {
            Ok(config) => self.query_sync.schedule(to_query_string(&config), now_ms),
            Err(errors) => debug!(%errors, "not syncing invalid input to url"),
        }

        self.outputs()
    }

    /// 当前输入对应的全部输出
    pub fn outputs(&self) -> Calculation {
        calculate_with(&self.input, &self.catalog.custom(), &self.options)
    }

    pub fn breakpoints(&self) -> Vec<Breakpoint> {
        self.catalog.breakpoints()
    }

    pub fn add_breakpoint(&mut self, input: &BreakpointInput) -> Result<Breakpoint, CatalogError> {
        self.catalog.add(input)
    }

    pub fn update_breakpoint(
        &mut self,
        id: &str,
        input: &BreakpointInput,
    ) -> Result<Breakpoint, CatalogError> {
        self.catalog.update(id, input)
    }

    pub fn delete_breakpoint(&mut self, id: &str) -> bool {
        self.catalog.delete(id)
    }

    /// 到期的查询字符串（只返回一次）
    pub fn take_query_update(&mut self, now_ms: f64) -> Option<String> {
        self.query_sync.take_due(now_ms)
    }

    pub fn cancel_query_update(&mut self) {
        self.query_sync.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluidclamp_core::{BreakpointStatus, OutputUnit};

    #[test]
    fn test_from_query() {
        let session = Session::from_query("?unit=rem&min=1&max=2");
        let outputs = session.outputs();
        assert_eq!(
            outputs.css_clamp,
            "clamp(1rem, calc(1.818vw + 0.636rem), 2rem)"
        );
    }

    #[test]
    fn test_query_update_debounced() {
        let mut session = Session::new();
        session.set_input(
            ScalingInput {
                min_size: 18.0,
                ..Default::default()
            },
            0.0,
        );
        session.set_input(
            ScalingInput {
                min_size: 20.0,
                ..Default::default()
            },
            300.0,
        );

        assert_eq!(session.take_query_update(500.0), None);
        let query = session.take_query_update(800.0).unwrap();
        assert!(query.contains("min=20&"));
        assert_eq!(session.take_query_update(2000.0), None);
    }

    #[test]
    fn test_invalid_input_not_synced() {
        let mut session = Session::new();
        let outputs = session.set_input(
            ScalingInput {
                max_size: 8.0,
                ..Default::default()
            },
            0.0,
        );
        assert!(!outputs.is_valid());
        assert_eq!(session.take_query_update(10_000.0), None);
    }

    #[test]
    fn test_cancel_query_update() {
        let mut session = Session::new();
        session.set_input(ScalingInput::default(), 0.0);
        session.cancel_query_update();
        assert_eq!(session.take_query_update(10_000.0), None);
    }

    #[test]
    fn test_breakpoints_flow_into_table() {
        let mut session = Session::new();
        let added = session
            .add_breakpoint(&BreakpointInput::new("Wide tablet", 900.0, "Surface"))
            .unwrap();

        let table = session.outputs().breakpoint_table;
        assert_eq!(table.len(), 9);
        let row = table.iter().find(|r| r.breakpoint.id == added.id).unwrap();
        assert_eq!(row.computed_value, "26.545");
        assert_eq!(row.status, BreakpointStatus::Fluid);
        assert_eq!(row.unit, OutputUnit::Px);

        assert!(session.delete_breakpoint(&added.id));
        assert_eq!(session.outputs().breakpoint_table.len(), 8);
    }

    #[test]
    fn test_override_default() {
        let mut session = Session::new();
        session
            .update_breakpoint("tablet", &BreakpointInput::new("Tablet", 800.0, "iPad Air"))
            .unwrap();
        let breakpoints = session.breakpoints();
        assert_eq!(breakpoints.len(), 8);
        assert!(breakpoints.iter().any(|b| b.id == "custom-tablet" && b.width == 800));
        assert!(!breakpoints.iter().any(|b| b.id == "tablet"));
    }
}
