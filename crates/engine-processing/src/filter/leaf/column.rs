use super::{
    TypedFilterAdapter, check_pattern, invalid, mismatch, mismatch_status, pattern_status,
};
use crate::{
    error::AdaptError,
    filter::{context::FilterAdapterContext, translation::Translation},
};
use connectors::bigtable::{
    filter::{self as wire, RangeBound, RowFilter},
    regex::prefix_pattern,
};
use model::{
    predicate::{ColumnRange, Predicate, PredicateKind},
    support::SupportStatus,
};
use std::ops::Bound;

pub struct FamilyRegexAdapter;

impl TypedFilterAdapter for FamilyRegexAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::FamilyRegex(pattern) = predicate else {
            return Err(mismatch(PredicateKind::FamilyRegex, predicate));
        };
        check_pattern(pattern)?;
        Ok(RowFilter::FamilyNameRegex(pattern.clone()).into())
    }

    fn status(&self, _ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::FamilyRegex(pattern) => pattern_status(pattern),
            other => mismatch_status(PredicateKind::FamilyRegex, other),
        }
    }
}

/// An empty prefix matches every qualifier and contributes nothing.
pub struct QualifierPrefixAdapter;

impl TypedFilterAdapter for QualifierPrefixAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::QualifierPrefix(prefix) = predicate else {
            return Err(mismatch(PredicateKind::QualifierPrefix, predicate));
        };
        if prefix.is_empty() {
            return Ok(Translation::Absent);
        }
        Ok(RowFilter::ColumnQualifierRegex(prefix_pattern(prefix)).into())
    }
}

pub struct ColumnRangeAdapter;

impl ColumnRangeAdapter {
    fn check(range: &ColumnRange) -> Result<(), AdaptError> {
        if range.family.is_empty() {
            return Err(invalid(
                PredicateKind::ColumnRange,
                "column family is required",
            ));
        }
        if range.is_inverted() {
            return Err(invalid(
                PredicateKind::ColumnRange,
                format!("qualifier range of family '{}' is empty", range.family),
            ));
        }
        Ok(())
    }
}

impl TypedFilterAdapter for ColumnRangeAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::ColumnRange(range) = predicate else {
            return Err(mismatch(PredicateKind::ColumnRange, predicate));
        };
        Self::check(range)?;

        Ok(RowFilter::ColumnRange(wire::ColumnRange {
            family_name: range.family.clone(),
            start_qualifier: range_bound(&range.start),
            end_qualifier: range_bound(&range.end),
        })
        .into())
    }

    fn status(&self, _ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::ColumnRange(range) => match Self::check(range) {
                Ok(()) => SupportStatus::Supported,
                Err(err) => SupportStatus::not_supported(err.to_string()),
            },
            other => mismatch_status(PredicateKind::ColumnRange, other),
        }
    }
}

pub(crate) fn range_bound(bound: &Bound<Vec<u8>>) -> RangeBound {
    match bound {
        Bound::Included(bytes) => RangeBound::Closed(bytes.clone()),
        Bound::Excluded(bytes) => RangeBound::Open(bytes.clone()),
        Bound::Unbounded => RangeBound::Unbounded,
    }
}
