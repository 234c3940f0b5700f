use super::RowFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest filters a chain or an interleave may hold.
pub const MIN_COMPOSITE_FILTERS: usize = 2;

/// Returned when a chain or interleave is built from fewer than two filters.
/// Hands the filters back so the caller can collapse them instead.
#[derive(Debug, Error)]
#[error("{kind} needs at least 2 filters, got {}", .filters.len())]
pub struct TooFewFilters {
    pub kind: &'static str,
    pub filters: Vec<RowFilter>,
}

/// Wire shape shared by chains and interleaves.
#[doc(hidden)]
#[derive(Serialize, Deserialize)]
pub struct FilterSeq {
    filters: Vec<RowFilter>,
}

macro_rules! composite_filter {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "FilterSeq", into = "FilterSeq")]
        pub struct $name {
            filters: Vec<RowFilter>,
        }

        impl $name {
            pub fn new(filters: Vec<RowFilter>) -> Result<Self, TooFewFilters> {
                if filters.len() < MIN_COMPOSITE_FILTERS {
                    return Err(TooFewFilters {
                        kind: $kind,
                        filters,
                    });
                }
                Ok(Self { filters })
            }

            pub fn filters(&self) -> &[RowFilter] {
                &self.filters
            }

            pub fn into_filters(self) -> Vec<RowFilter> {
                self.filters
            }
        }

        impl TryFrom<FilterSeq> for $name {
            type Error = TooFewFilters;

            fn try_from(seq: FilterSeq) -> Result<Self, Self::Error> {
                Self::new(seq.filters)
            }
        }

        impl From<$name> for FilterSeq {
            fn from(value: $name) -> Self {
                FilterSeq {
                    filters: value.filters,
                }
            }
        }
    };
}

composite_filter!(
    /// Sequential conjunction: each filter reads the output of the previous one.
    Chain,
    "chain"
);

composite_filter!(
    /// Parallel disjunction: every filter reads the input and the outputs are merged.
    Interleave,
    "interleave"
);
