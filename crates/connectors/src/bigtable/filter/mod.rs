//! Wire-level row filter of the storage engine.
//!
//! Only two composition operators exist on the wire: [`Chain`] (sequential
//! AND) and [`Interleave`] (parallel OR). Both carry at least two filters;
//! their constructors refuse anything smaller, so a degenerate composite can
//! never reach a scan request.

use self::bytes::base64_bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

mod bytes;
pub mod composite;
pub mod range;

pub use composite::{Chain, Interleave, MIN_COMPOSITE_FILTERS, TooFewFilters};
pub use range::{ColumnRange, RangeBound, TimestampRange, ValueRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowFilter {
    #[serde(rename = "chain")]
    Chain(Chain),
    #[serde(rename = "interleave")]
    Interleave(Interleave),
    #[serde(rename = "passAllFilter")]
    PassAll,
    #[serde(rename = "blockAllFilter")]
    BlockAll,
    #[serde(rename = "rowKeyRegexFilter")]
    RowKeyRegex(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "familyNameRegexFilter")]
    FamilyNameRegex(String),
    #[serde(rename = "columnQualifierRegexFilter")]
    ColumnQualifierRegex(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "columnRangeFilter")]
    ColumnRange(ColumnRange),
    #[serde(rename = "valueRegexFilter")]
    ValueRegex(#[serde(with = "base64_bytes")] Vec<u8>),
    #[serde(rename = "valueRangeFilter")]
    ValueRange(ValueRange),
    #[serde(rename = "timestampRangeFilter")]
    TimestampRange(TimestampRange),
    #[serde(rename = "cellsPerRowOffsetFilter")]
    CellsPerRowOffset(u32),
    #[serde(rename = "cellsPerRowLimitFilter")]
    CellsPerRowLimit(u32),
    #[serde(rename = "cellsPerColumnLimitFilter")]
    CellsPerColumnLimit(u32),
    #[serde(rename = "stripValueTransformer")]
    StripValue,
    #[serde(rename = "rowSampleFilter")]
    RowSample(f64),
}

impl RowFilter {
    pub fn chain(filters: Vec<RowFilter>) -> Result<Self, TooFewFilters> {
        Chain::new(filters).map(RowFilter::Chain)
    }

    pub fn interleave(filters: Vec<RowFilter>) -> Result<Self, TooFewFilters> {
        Interleave::new(filters).map(RowFilter::Interleave)
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, RowFilter::Chain(_) | RowFilter::Interleave(_))
    }

    /// Direct sub-filters; empty for leaves.
    pub fn children(&self) -> &[RowFilter] {
        match self {
            RowFilter::Chain(chain) => chain.filters(),
            RowFilter::Interleave(interleave) => interleave.filters(),
            _ => &[],
        }
    }

    /// Visit this filter and every descendant, parents before children.
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&RowFilter),
    {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// Number of leaf filters in the tree.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |f| {
            if !f.is_composite() {
                count += 1;
            }
        });
        count
    }
}

impl From<Chain> for RowFilter {
    fn from(chain: Chain) -> Self {
        RowFilter::Chain(chain)
    }
}

impl From<Interleave> for RowFilter {
    fn from(interleave: Interleave) -> Self {
        RowFilter::Interleave(interleave)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, filters: &[RowFilter]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, filter) in filters.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{filter}")?;
    }
    f.write_str(")")
}

impl fmt::Display for RowFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFilter::Chain(chain) => write_list(f, "chain", chain.filters()),
            RowFilter::Interleave(interleave) => {
                write_list(f, "interleave", interleave.filters())
            }
            RowFilter::PassAll => f.write_str("pass_all"),
            RowFilter::BlockAll => f.write_str("block_all"),
            RowFilter::RowKeyRegex(re) => {
                write!(f, "row_key_regex({:?})", String::from_utf8_lossy(re))
            }
            RowFilter::FamilyNameRegex(re) => write!(f, "family_regex({re:?})"),
            RowFilter::ColumnQualifierRegex(re) => {
                write!(f, "qualifier_regex({:?})", String::from_utf8_lossy(re))
            }
            RowFilter::ColumnRange(range) => write!(f, "column_range({range})"),
            RowFilter::ValueRegex(re) => {
                write!(f, "value_regex({:?})", String::from_utf8_lossy(re))
            }
            RowFilter::ValueRange(range) => write!(f, "value_range({range})"),
            RowFilter::TimestampRange(range) => write!(f, "timestamp_range({range})"),
            RowFilter::CellsPerRowOffset(n) => write!(f, "cells_per_row_offset({n})"),
            RowFilter::CellsPerRowLimit(n) => write!(f, "cells_per_row_limit({n})"),
            RowFilter::CellsPerColumnLimit(n) => write!(f, "cells_per_column_limit({n})"),
            RowFilter::StripValue => f.write_str("strip_value"),
            RowFilter::RowSample(p) => write!(f, "row_sample({p})"),
        }
    }
}
