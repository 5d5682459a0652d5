//! # Error Types for the UVM instruction-set description

use thiserror::Error;

/// Which mapping table a tag was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagTable {
    ParamKind,
    NumericType,
}

impl std::fmt::Display for TagTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagTable::ParamKind => write!(f, "parameter kind"),
            TagTable::NumericType => write!(f, "numeric type"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IsaError {
    // Schema shape errors
    #[error("Malformed instruction-set description: {message}")]
    Structural { message: String },

    // Mapping errors
    #[error("Unknown {table} tag: {tag:?}")]
    UnknownTag { table: TagTable, tag: String },
}

impl IsaError {
    pub(crate) fn structural(message: impl Into<String>) -> Self {
        IsaError::Structural {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IsaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IsaError::UnknownTag {
            table: TagTable::ParamKind,
            tag: "xReg".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown parameter kind tag: \"xReg\"");

        let err = IsaError::structural("instructions[3]: missing field `paramList`");
        assert_eq!(
            err.to_string(),
            "Malformed instruction-set description: instructions[3]: missing field `paramList`"
        );
    }
}
