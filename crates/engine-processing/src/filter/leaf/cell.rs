use super::{TypedFilterAdapter, invalid, mismatch, mismatch_status};
use crate::{
    error::AdaptError,
    filter::{context::FilterAdapterContext, translation::Translation},
};
use connectors::bigtable::{
    filter::{self as wire, RangeBound, RowFilter, ValueRange},
    regex::quote,
};
use model::{
    predicate::{CompareOp, Predicate, PredicateKind, TimestampRange},
    support::SupportStatus,
};
use tracing::debug;

/// Equality becomes a quoted value regex, orderings become a value range.
/// Inequality has no row filter equivalent and contributes nothing.
pub struct ValueAdapter;

impl TypedFilterAdapter for ValueAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::Value(comparison) = predicate else {
            return Err(mismatch(PredicateKind::Value, predicate));
        };

        let value = &comparison.value;
        let range = |start_value, end_value| {
            Translation::Filter(RowFilter::ValueRange(ValueRange {
                start_value,
                end_value,
            }))
        };

        let translation = match comparison.op {
            CompareOp::Eq => RowFilter::ValueRegex(quote(value)).into(),
            CompareOp::Ne => {
                debug!("Value inequality dropped from row filter");
                Translation::Absent
            }
            CompareOp::Lt => range(RangeBound::Unbounded, RangeBound::Open(value.clone())),
            CompareOp::Lte => range(RangeBound::Unbounded, RangeBound::Closed(value.clone())),
            CompareOp::Gt => range(RangeBound::Open(value.clone()), RangeBound::Unbounded),
            CompareOp::Gte => range(RangeBound::Closed(value.clone()), RangeBound::Unbounded),
        };
        Ok(translation)
    }

    fn status(&self, _ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::Value(comparison) if comparison.op == CompareOp::Ne => {
                SupportStatus::not_supported(format!(
                    "value comparison '{}' has no row filter equivalent",
                    comparison.op
                ))
            }
            Predicate::Value(_) => SupportStatus::Supported,
            other => mismatch_status(PredicateKind::Value, other),
        }
    }
}

pub struct TimestampRangeAdapter;

impl TimestampRangeAdapter {
    fn check(range: &TimestampRange) -> Result<(), AdaptError> {
        match range.end_micros {
            Some(end) if end < range.start_micros => Err(invalid(
                PredicateKind::TimestampRange,
                format!(
                    "end {end} precedes start {}",
                    range.start_micros
                ),
            )),
            _ => Ok(()),
        }
    }
}

impl TypedFilterAdapter for TimestampRangeAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::TimestampRange(range) = predicate else {
            return Err(mismatch(PredicateKind::TimestampRange, predicate));
        };
        Self::check(range)?;

        Ok(RowFilter::TimestampRange(wire::TimestampRange {
            start_timestamp_micros: range.start_micros,
            end_timestamp_micros: range.end_micros,
        })
        .into())
    }

    fn status(&self, _ctx: &FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        match predicate {
            Predicate::TimestampRange(range) => match Self::check(range) {
                Ok(()) => SupportStatus::Supported,
                Err(err) => SupportStatus::not_supported(err.to_string()),
            },
            other => mismatch_status(PredicateKind::TimestampRange, other),
        }
    }
}

pub struct KeyOnlyAdapter;

impl TypedFilterAdapter for KeyOnlyAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        match predicate {
            Predicate::KeyOnly => Ok(RowFilter::StripValue.into()),
            other => Err(mismatch(PredicateKind::KeyOnly, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::predicate::ValueComparison;

    fn value(op: CompareOp, bytes: &[u8]) -> Predicate {
        Predicate::Value(ValueComparison::new(op, bytes))
    }

    fn adapt_value(op: CompareOp, bytes: &[u8]) -> Translation {
        ValueAdapter
            .adapt(&FilterAdapterContext::default(), &value(op, bytes))
            .unwrap()
    }

    #[test]
    fn test_value_equality_is_quoted_regex() {
        assert_eq!(
            adapt_value(CompareOp::Eq, b"1.5"),
            Translation::Filter(RowFilter::ValueRegex(b"1\\.5".to_vec()))
        );
    }

    #[test]
    fn test_value_orderings_are_ranges() {
        assert_eq!(
            adapt_value(CompareOp::Lt, b"k"),
            Translation::Filter(RowFilter::ValueRange(ValueRange {
                start_value: RangeBound::Unbounded,
                end_value: RangeBound::Open(b"k".to_vec()),
            }))
        );
        assert_eq!(
            adapt_value(CompareOp::Gte, b"k"),
            Translation::Filter(RowFilter::ValueRange(ValueRange {
                start_value: RangeBound::Closed(b"k".to_vec()),
                end_value: RangeBound::Unbounded,
            }))
        );
    }

    #[test]
    fn test_value_inequality_is_unsupported_and_dropped() {
        let ctx = FilterAdapterContext::default();
        assert_eq!(adapt_value(CompareOp::Ne, b"k"), Translation::Absent);
        assert_eq!(
            ValueAdapter.status(&ctx, &value(CompareOp::Ne, b"k")),
            SupportStatus::not_supported("value comparison '!=' has no row filter equivalent")
        );
        assert!(ValueAdapter
            .status(&ctx, &value(CompareOp::Lte, b"k"))
            .is_supported());
    }

    #[test]
    fn test_timestamp_range() {
        let ctx = FilterAdapterContext::default();
        let translation = TimestampRangeAdapter
            .adapt(&ctx, &Predicate::TimestampRange(TimestampRange::since(100)))
            .unwrap();
        assert_eq!(
            translation,
            Translation::Filter(RowFilter::TimestampRange(wire::TimestampRange {
                start_timestamp_micros: 100,
                end_timestamp_micros: None,
            }))
        );
    }

    #[test]
    fn test_timestamp_range_rejects_end_before_start() {
        let ctx = FilterAdapterContext::default();
        let predicate = Predicate::TimestampRange(TimestampRange::new(10, 5));

        let err = TimestampRangeAdapter.adapt(&ctx, &predicate).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid timestamp_range predicate: end 5 precedes start 10"
        );
        assert!(!TimestampRangeAdapter.status(&ctx, &predicate).is_supported());
    }

    #[test]
    fn test_key_only() {
        let ctx = FilterAdapterContext::default();
        assert_eq!(
            KeyOnlyAdapter.adapt(&ctx, &Predicate::KeyOnly).unwrap(),
            Translation::Filter(RowFilter::StripValue)
        );
    }
}
