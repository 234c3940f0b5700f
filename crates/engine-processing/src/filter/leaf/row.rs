use super::{TypedFilterAdapter, check_pattern, mismatch, mismatch_status, pattern_status};
use crate::{
    error::AdaptError,
    filter::{context::FilterAdapterContext, translation::Translation},
};
use connectors::bigtable::{filter::RowFilter, regex::prefix_pattern};
use model::{
    predicate::{ListOperator, Predicate, PredicateKind},
    support::SupportStatus,
};
use tracing::trace;

pub struct RowKeyRegexAdapter;

impl TypedFilterAdapter for RowKeyRegexAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::RowKeyRegex(pattern) = predicate else {
            return Err(mismatch(PredicateKind::RowKeyRegex, predicate));
        };
        check_pattern(pattern)?;
        Ok(RowFilter::RowKeyRegex(pattern.as_bytes().to_vec()).into())
    }

    fn status(&self, _ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::RowKeyRegex(pattern) => pattern_status(pattern),
            other => mismatch_status(PredicateKind::RowKeyRegex, other),
        }
    }
}

/// An empty prefix matches every row and contributes nothing.
pub struct RowPrefixAdapter;

impl TypedFilterAdapter for RowPrefixAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::RowPrefix(prefix) = predicate else {
            return Err(mismatch(PredicateKind::RowPrefix, predicate));
        };
        if prefix.is_empty() {
            return Ok(Translation::Absent);
        }
        Ok(RowFilter::RowKeyRegex(prefix_pattern(prefix)).into())
    }
}

/// Row limits belong on the scan request, not in the row filter, so the
/// predicate contributes no filter. The scan can only honour a limit that
/// applies to every row it returns, which rules out limits beneath an ANY
/// list. A zero limit reads as "unlimited" on the request, so it blocks
/// every row through the filter instead.
pub struct RowLimitAdapter;

pub const ROW_LIMIT_UNDER_ANY: &str = "row limit is only supported at the top level or inside ALL lists";

impl TypedFilterAdapter for RowLimitAdapter {
    fn adapt(
        &self,
        ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::RowLimit(limit) = predicate else {
            return Err(mismatch(PredicateKind::RowLimit, predicate));
        };
        if *limit == 0 {
            return Ok(RowFilter::BlockAll.into());
        }
        trace!(limit, depth = ctx.depth(), "Row limit left to the scan request");
        Ok(Translation::Absent)
    }

    fn status(&self, ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::RowLimit(_) if ctx.is_within(ListOperator::Any) => {
                SupportStatus::not_supported(ROW_LIMIT_UNDER_ANY)
            }
            Predicate::RowLimit(_) => SupportStatus::Supported,
            other => mismatch_status(PredicateKind::RowLimit, other),
        }
    }
}

/// A chance of one keeps every row and contributes nothing; a chance of zero
/// or less keeps none.
pub struct RandomRowAdapter;

impl TypedFilterAdapter for RandomRowAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::RandomRow(chance) = predicate else {
            return Err(mismatch(PredicateKind::RandomRow, predicate));
        };

        let chance = f64::from(*chance);
        if chance.is_nan() || chance >= 1.0 {
            Ok(Translation::Absent)
        } else if chance <= 0.0 {
            Ok(RowFilter::BlockAll.into())
        } else {
            Ok(RowFilter::RowSample(chance).into())
        }
    }

    fn status(&self, _ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::RandomRow(chance) if chance.is_nan() => {
                SupportStatus::not_supported("random row chance is not a number")
            }
            Predicate::RandomRow(_) => SupportStatus::Supported,
            other => mismatch_status(PredicateKind::RandomRow, other),
        }
    }
}
