use serde::{Deserialize, Serialize};
use std::{fmt, ops::Bound};

/// Comparison applied by a value predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CompareOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Compare each cell value against a constant, byte-wise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueComparison {
    pub op: CompareOp,
    pub value: Vec<u8>,
}

impl ValueComparison {
    pub fn new(op: CompareOp, value: impl Into<Vec<u8>>) -> Self {
        Self {
            op,
            value: value.into(),
        }
    }
}

/// Range of column qualifiers inside a single family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub family: String,
    pub start: Bound<Vec<u8>>,
    pub end: Bound<Vec<u8>>,
}

impl ColumnRange {
    /// Qualifiers in `[start, end)`.
    pub fn half_open(
        family: impl Into<String>,
        start: impl Into<Vec<u8>>,
        end: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            family: family.into(),
            start: Bound::Included(start.into()),
            end: Bound::Excluded(end.into()),
        }
    }

    /// Every qualifier of the family.
    pub fn unbounded(family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }

    /// True when no qualifier can satisfy both bounds.
    pub fn is_inverted(&self) -> bool {
        match (&self.start, &self.end) {
            (Bound::Included(s), Bound::Included(e)) => s > e,
            (Bound::Included(s), Bound::Excluded(e))
            | (Bound::Excluded(s), Bound::Included(e))
            | (Bound::Excluded(s), Bound::Excluded(e)) => s >= e,
            _ => false,
        }
    }
}

/// Cell timestamp window in microseconds. `end_micros` is exclusive; `None`
/// leaves the window open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampRange {
    pub start_micros: i64,
    pub end_micros: Option<i64>,
}

impl TimestampRange {
    pub fn new(start_micros: i64, end_micros: i64) -> Self {
        Self {
            start_micros,
            end_micros: Some(end_micros),
        }
    }

    pub fn since(start_micros: i64) -> Self {
        Self {
            start_micros,
            end_micros: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_range_inverted() {
        assert!(!ColumnRange::half_open("cf", "a", "b").is_inverted());
        assert!(ColumnRange::half_open("cf", "b", "b").is_inverted());
        assert!(ColumnRange::half_open("cf", "c", "b").is_inverted());
        assert!(!ColumnRange::unbounded("cf").is_inverted());

        let closed = ColumnRange {
            family: "cf".to_string(),
            start: Bound::Included(b"b".to_vec()),
            end: Bound::Included(b"b".to_vec()),
        };
        assert!(!closed.is_inverted());
    }

    #[test]
    fn test_compare_op_symbol() {
        assert_eq!(CompareOp::Gte.to_string(), ">=");
        assert_eq!(CompareOp::Ne.to_string(), "!=");
    }
}
