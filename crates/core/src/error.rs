use thiserror::Error;

/// 单个字段的校验错误
///
/// `field` 使用表单里的 camelCase 字段名，方便 UI 直接标在对应输入框旁边
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} must be a whole number")]
    NotInteger { field: &'static str },

    #[error("{field} should be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("{field} must be {max} characters or less")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} {expected}")]
    InvalidFormat {
        field: &'static str,
        expected: &'static str,
    },

    /// 配置不变量被破坏（如 max ≤ min）
    #[error("{field} must be greater than {other}")]
    NotGreaterThan {
        field: &'static str,
        other: &'static str,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotInteger { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotGreaterThan { field, .. } => field,
        }
    }

    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, ValidationError::NotGreaterThan { .. })
    }
}

/// 一次校验收集到的全部错误（非空）
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid input: {}", join_messages(.0))]
pub struct ValidationErrors(pub Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    /// 某个字段的第一条错误
    pub fn for_field(&self, field: &str) -> Option<&ValidationError> {
        self.0.iter().find(|e| e.field() == field)
    }

    pub fn has_invariant_violation(&self) -> bool {
        self.0.iter().any(ValidationError::is_invariant_violation)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// 断点目录操作错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("unknown breakpoint: {0}")]
    UnknownBreakpoint(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::OutOfRange {
            field: "rootFontSize",
            min: 8.0,
            max: 32.0,
        };
        assert_eq!(err.to_string(), "rootFontSize should be between 8 and 32");

        let err = ValidationError::NotGreaterThan {
            field: "maxSize",
            other: "minSize",
        };
        assert_eq!(err.to_string(), "maxSize must be greater than minSize");
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_errors_display_joins() {
        let errors = ValidationErrors(vec![
            ValidationError::Required { field: "name" },
            ValidationError::NotInteger { field: "width" },
        ]);
        assert_eq!(
            errors.to_string(),
            "invalid input: name is required; width must be a whole number"
        );
        assert_eq!(errors.for_field("width"), Some(&errors.0[1]));
        assert!(!errors.has_invariant_violation());
    }
}
