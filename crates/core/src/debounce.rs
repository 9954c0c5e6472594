/// URL 同步的默认延迟（ms）
pub const DEFAULT_DELAY_MS: f64 = 500.0;

/// 防抖槽
///
/// 每个组件持有自己的实例，而不是共享一个全局定时器句柄。
/// 不依赖具体时钟：调用方传入当前时间（ms），到期后用 [`Debouncer::take_due`] 取出。
/// 实例被 drop 时，未触发的值随之丢弃。
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: f64,
    pending: Option<(T, f64)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> f64 {
        self.delay_ms
    }

    /// 安排一次触发，覆盖之前未触发的值并重新计时
    pub fn schedule(&mut self, payload: T, now_ms: f64) {
        self.pending = Some((payload, now_ms + self.delay_ms));
    }

    /// 到期时取出值；未到期或没有待处理值时返回 `None`
    pub fn take_due(&mut self, now_ms: f64) -> Option<T> {
        let due = self.due_at()?;
        if now_ms >= due {
            self.pending.take().map(|(payload, _)| payload)
        } else {
            None
        }
    }

    /// 到期时间
    pub fn due_at(&self) -> Option<f64> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// 取消未触发的值
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(payload, _)| payload)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut debouncer = Debouncer::new(500.0);
        debouncer.schedule("a", 1000.0);
        assert_eq!(debouncer.take_due(1499.0), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.take_due(1500.0), Some("a"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.take_due(2000.0), None);
    }

    #[test]
    fn test_reschedule_restarts_timer() {
        let mut debouncer = Debouncer::default();
        debouncer.schedule(1, 0.0);
        debouncer.schedule(2, 400.0);
        assert_eq!(debouncer.due_at(), Some(900.0));
        assert_eq!(debouncer.take_due(600.0), None);
        assert_eq!(debouncer.take_due(900.0), Some(2));
    }

    #[test]
    fn test_cancel() {
        let mut debouncer = Debouncer::new(100.0);
        debouncer.schedule("x", 0.0);
        assert_eq!(debouncer.cancel(), Some("x"));
        assert_eq!(debouncer.take_due(1000.0), None);
    }
}
