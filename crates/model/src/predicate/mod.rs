use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod leaf;
pub mod list;

pub use leaf::{ColumnRange, CompareOp, TimestampRange, ValueComparison};
pub use list::{ListOperator, PredicateList};

/// Client-side row predicate.
///
/// A predicate is either a leaf describing one constraint on the rows, cells
/// or values of a scan, or a [`PredicateList`] combining an ordered list of
/// child predicates under ALL or ANY semantics. Lists may nest to any depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    /// Keep rows whose key matches the regular expression.
    RowKeyRegex(String),
    /// Keep rows whose key starts with the given bytes.
    RowPrefix(Vec<u8>),
    /// Keep cells whose column family matches the regular expression.
    FamilyRegex(String),
    /// Keep cells whose qualifier starts with the given bytes.
    QualifierPrefix(Vec<u8>),
    /// Keep cells whose qualifier falls inside a range of one family.
    ColumnRange(ColumnRange),
    /// Keep cells whose value compares against a constant.
    Value(ValueComparison),
    /// Keep cells written inside a timestamp window.
    TimestampRange(TimestampRange),
    /// Keep at most `n` versions of each column.
    CellsPerColumn(u32),
    /// Skip the first `offset` cells of each row, then keep at most `limit`.
    CellsPerRow { limit: Option<u32>, offset: u32 },
    /// Keep keys, drop cell values.
    KeyOnly,
    /// Keep each row with the given probability.
    RandomRow(f32),
    /// Stop the scan after `n` rows.
    RowLimit(u64),
    /// A client-only predicate the storage engine knows nothing about.
    Opaque { name: String },
    /// An ordered list of predicates combined with ALL or ANY.
    List(PredicateList),
}

/// Discriminant of a [`Predicate`], used to key adapter registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    RowKeyRegex,
    RowPrefix,
    FamilyRegex,
    QualifierPrefix,
    ColumnRange,
    Value,
    TimestampRange,
    CellsPerColumn,
    CellsPerRow,
    KeyOnly,
    RandomRow,
    RowLimit,
    Opaque,
    List,
}

impl PredicateKind {
    pub const LEAVES: [PredicateKind; 13] = [
        PredicateKind::RowKeyRegex,
        PredicateKind::RowPrefix,
        PredicateKind::FamilyRegex,
        PredicateKind::QualifierPrefix,
        PredicateKind::ColumnRange,
        PredicateKind::Value,
        PredicateKind::TimestampRange,
        PredicateKind::CellsPerColumn,
        PredicateKind::CellsPerRow,
        PredicateKind::KeyOnly,
        PredicateKind::RandomRow,
        PredicateKind::RowLimit,
        PredicateKind::Opaque,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateKind::RowKeyRegex => "row_key_regex",
            PredicateKind::RowPrefix => "row_prefix",
            PredicateKind::FamilyRegex => "family_regex",
            PredicateKind::QualifierPrefix => "qualifier_prefix",
            PredicateKind::ColumnRange => "column_range",
            PredicateKind::Value => "value",
            PredicateKind::TimestampRange => "timestamp_range",
            PredicateKind::CellsPerColumn => "cells_per_column",
            PredicateKind::CellsPerRow => "cells_per_row",
            PredicateKind::KeyOnly => "key_only",
            PredicateKind::RandomRow => "random_row",
            PredicateKind::RowLimit => "row_limit",
            PredicateKind::Opaque => "opaque",
            PredicateKind::List => "list",
        }
    }
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum PredicateError {
    #[error("Failed to parse predicate: {0}")]
    Parse(#[from] serde_json::Error),
}

impl Predicate {
    pub fn all(children: Vec<Predicate>) -> Self {
        Predicate::List(PredicateList::all(children))
    }

    pub fn any(children: Vec<Predicate>) -> Self {
        Predicate::List(PredicateList::any(children))
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Predicate::Opaque { name: name.into() }
    }

    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::RowKeyRegex(_) => PredicateKind::RowKeyRegex,
            Predicate::RowPrefix(_) => PredicateKind::RowPrefix,
            Predicate::FamilyRegex(_) => PredicateKind::FamilyRegex,
            Predicate::QualifierPrefix(_) => PredicateKind::QualifierPrefix,
            Predicate::ColumnRange(_) => PredicateKind::ColumnRange,
            Predicate::Value(_) => PredicateKind::Value,
            Predicate::TimestampRange(_) => PredicateKind::TimestampRange,
            Predicate::CellsPerColumn(_) => PredicateKind::CellsPerColumn,
            Predicate::CellsPerRow { .. } => PredicateKind::CellsPerRow,
            Predicate::KeyOnly => PredicateKind::KeyOnly,
            Predicate::RandomRow(_) => PredicateKind::RandomRow,
            Predicate::RowLimit(_) => PredicateKind::RowLimit,
            Predicate::Opaque { .. } => PredicateKind::Opaque,
            Predicate::List(_) => PredicateKind::List,
        }
    }

    pub fn as_list(&self) -> Option<&PredicateList> {
        match self {
            Predicate::List(list) => Some(list),
            _ => None,
        }
    }

    /// Parse a predicate tree from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, PredicateError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<PredicateList> for Predicate {
    fn from(list: PredicateList) -> Self {
        Predicate::List(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(Predicate::KeyOnly.kind(), PredicateKind::KeyOnly);
        assert_eq!(Predicate::RowLimit(10).kind(), PredicateKind::RowLimit);
        assert_eq!(Predicate::opaque("custom").kind(), PredicateKind::Opaque);
        assert_eq!(Predicate::all(vec![]).kind(), PredicateKind::List);
        assert!(!PredicateKind::LEAVES.contains(&PredicateKind::List));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "list": {
                "operator": "any",
                "children": [
                    { "row_key_regex": "user#.*" },
                    "key_only",
                    { "cells_per_row": { "limit": 5, "offset": 0 } }
                ]
            }
        }"#;

        let predicate = Predicate::from_json(json).unwrap();
        let list = predicate.as_list().unwrap();

        assert_eq!(list.operator(), ListOperator::Any);
        assert_eq!(
            list.children(),
            &[
                Predicate::RowKeyRegex("user#.*".to_string()),
                Predicate::KeyOnly,
                Predicate::CellsPerRow {
                    limit: Some(5),
                    offset: 0
                },
            ]
        );
    }

    #[test]
    fn test_from_json_rejects_unknown_kind() {
        let err = Predicate::from_json(r#"{ "fuzzy_row": [] }"#).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse predicate"));
    }
}
