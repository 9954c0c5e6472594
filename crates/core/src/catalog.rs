use indexmap::IndexMap;
use tracing::debug;

use crate::error::CatalogError;
use crate::format::format_number;
use crate::interpolate::FluidScale;
use crate::types::{Breakpoint, BreakpointInput, BreakpointResult, DeviceCategory, ScalingConfig};
use crate::validate::BreakpointFields;

/// 默认断点（按宽度升序）
///
/// (id, name, width, device)
pub const DEFAULT_BREAKPOINTS: [(&str, &str, u32, &str); 8] = [
    ("mobile-s", "Mobile S", 320, "iPhone SE"),
    ("mobile-m", "Mobile M", 375, "iPhone 12/13"),
    ("mobile-l", "Mobile L", 425, "iPhone 12 Pro Max"),
    ("tablet", "Tablet", 768, "iPad"),
    ("laptop", "Laptop", 1024, "Laptop"),
    ("laptop-l", "Laptop L", 1440, "MacBook Pro 16\""),
    ("desktop", "Desktop", 1920, "Desktop HD"),
    ("desktop-l", "Desktop L", 2560, "Desktop QHD"),
];

pub fn default_breakpoints() -> Vec<Breakpoint> {
    DEFAULT_BREAKPOINTS
        .iter()
        .map(|&(id, name, width, device)| Breakpoint {
            id: id.to_string(),
            name: name.to_string(),
            width,
            device: device.to_string(),
            category: DeviceCategory::from_width(width),
            is_default: true,
            original_id: None,
        })
        .collect()
}

fn is_default_id(id: &str) -> bool {
    DEFAULT_BREAKPOINTS.iter().any(|(default_id, ..)| *default_id == id)
}

/// 合并默认断点和自定义断点
///
/// 1. 去掉被覆盖（出现在某个 `original_id` 中）的默认断点
/// 2. 追加全部自定义断点
/// 3. 按宽度稳定排序：宽度相同时默认断点在前，自定义断点保持原有顺序
pub fn merge_breakpoints(custom: &[Breakpoint]) -> Vec<Breakpoint> {
    let mut merged: Vec<Breakpoint> = default_breakpoints()
        .into_iter()
        .filter(|d| {
            !custom
                .iter()
                .any(|c| c.original_id.as_deref() == Some(d.id.as_str()))
        })
        .collect();

    merged.extend(custom.iter().cloned());

    // sort_by_key 是稳定排序
    merged.sort_by_key(|bp| bp.width);
    merged
}

/// 生成断点表
///
/// 每一行的值由插值引擎计算，再用与 CSS 输出相同的规则格式化
///
/// # Panics
///
/// 见 [`FluidScale::new`]
pub fn build_table(config: &ScalingConfig, custom: &[Breakpoint]) -> Vec<BreakpointResult> {
    let scale = FluidScale::new(config);

    merge_breakpoints(custom)
        .into_iter()
        .map(|breakpoint| {
            let (value, status) = scale.evaluate(f64::from(breakpoint.width));
            BreakpointResult {
                icon: breakpoint.category.icon(),
                breakpoint,
                computed_value: format_number(value),
                status,
                unit: config.output_unit,
            }
        })
        .collect()
}

/// 自定义断点目录
///
/// 默认断点不可删除，只能被覆盖；删除覆盖项即恢复原默认断点
#[derive(Debug, Clone, Default)]
pub struct BreakpointCatalog {
    /// id → 自定义断点（保持插入顺序）
    custom: IndexMap<String, Breakpoint>,
    next_id: u64,
}

impl BreakpointCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从已有的自定义断点恢复
    pub fn from_custom(custom: impl IntoIterator<Item = Breakpoint>) -> Self {
        let mut catalog = Self::new();
        for bp in custom {
            catalog.custom.insert(bp.id.clone(), bp);
        }
        catalog
    }

    /// 自定义断点（插入顺序）
    pub fn custom(&self) -> Vec<Breakpoint> {
        self.custom.values().cloned().collect()
    }

    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// 合并后的全部断点（宽度升序）
    pub fn breakpoints(&self) -> Vec<Breakpoint> {
        merge_breakpoints(&self.custom())
    }

    /// 按 id 查找当前可见的断点
    pub fn get(&self, id: &str) -> Option<Breakpoint> {
        self.breakpoints().into_iter().find(|bp| bp.id == id)
    }

    pub fn table(&self, config: &ScalingConfig) -> Vec<BreakpointResult> {
        build_table(config, &self.custom())
    }

    /// 新增自定义断点
    pub fn add(&mut self, input: &BreakpointInput) -> Result<Breakpoint, CatalogError> {
        let fields = input.validate()?;
        let id = self.fresh_id();
        let breakpoint = custom_breakpoint(id, fields, None);

        debug!(id = %breakpoint.id, width = breakpoint.width, "breakpoint added");
        self.custom
            .insert(breakpoint.id.clone(), breakpoint.clone());
        Ok(breakpoint)
    }

    /// 修改断点
    ///
    /// - 自定义断点：原地修改
    /// - 默认断点：生成一个带 `original_id` 的覆盖项（已存在则原地修改）
    pub fn update(&mut self, id: &str, input: &BreakpointInput) -> Result<Breakpoint, CatalogError> {
        if let Some(existing) = self.custom.get_mut(id) {
            let fields = input.validate()?;
            let original_id = existing.original_id.take();
            *existing = custom_breakpoint(existing.id.clone(), fields, original_id);

            debug!(id, "custom breakpoint updated");
            return Ok(existing.clone());
        }

        if !is_default_id(id) {
            return Err(CatalogError::UnknownBreakpoint(id.to_string()));
        }

        let fields = input.validate()?;
        let override_id = format!("custom-{}", id);
        let breakpoint = custom_breakpoint(override_id, fields, Some(id.to_string()));

        debug!(id = %breakpoint.id, original = id, "default breakpoint overridden");
        // 同一默认断点的覆盖项只保留一个
        self.custom.insert(breakpoint.id.clone(), breakpoint.clone());
        Ok(breakpoint)
    }

    /// 删除自定义断点，返回是否删除
    ///
    /// 默认断点 id 不做任何处理
    pub fn delete(&mut self, id: &str) -> bool {
        match self.custom.shift_remove(id) {
            Some(removed) => {
                debug!(id, restored = ?removed.original_id, "breakpoint deleted");
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.custom.clear();
    }

    fn fresh_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let id = format!("custom-{}", self.next_id);
            if !self.custom.contains_key(&id) {
                return id;
            }
        }
    }
}

fn custom_breakpoint(id: String, fields: BreakpointFields, original_id: Option<String>) -> Breakpoint {
    Breakpoint {
        id,
        category: DeviceCategory::from_width(fields.width),
        name: fields.name,
        width: fields.width,
        device: fields.device,
        is_default: false,
        original_id,
    }
}
