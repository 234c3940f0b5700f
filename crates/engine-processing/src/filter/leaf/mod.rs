//! One adapter per leaf predicate kind.

use super::{adapter::FilterAdapter, context::FilterAdapterContext, translation::Translation};
use crate::error::AdaptError;
use model::{
    predicate::{Predicate, PredicateKind},
    support::SupportStatus,
};
use std::borrow::Cow;

pub mod cell;
pub mod column;
pub mod limit;
pub mod row;

pub use cell::{KeyOnlyAdapter, TimestampRangeAdapter, ValueAdapter};
pub use column::{ColumnRangeAdapter, FamilyRegexAdapter, QualifierPrefixAdapter};
pub use limit::{CellsPerColumnAdapter, CellsPerRowAdapter};
pub use row::{RandomRowAdapter, RowKeyRegexAdapter, RowLimitAdapter, RowPrefixAdapter};

/// Translates predicates of one kind.
///
/// Adapters are registered on a [`FilterAdapter`] under the kind they
/// handle and only ever receive predicates of that kind.
pub trait TypedFilterAdapter: Send + Sync {
    fn adapt(
        &self,
        ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError>;

    /// Whether `predicate` can be expressed, given where it sits in the tree.
    fn status(&self, _ctx: &FilterAdapterContext, _predicate: &Predicate) -> SupportStatus {
        SupportStatus::Supported
    }
}

/// Register the adapter of every built-in leaf kind. `Opaque` predicates
/// are left without one.
pub fn register_defaults(adapter: &mut FilterAdapter) {
    adapter
        .register(PredicateKind::RowKeyRegex, RowKeyRegexAdapter)
        .register(PredicateKind::RowPrefix, RowPrefixAdapter)
        .register(PredicateKind::RowLimit, RowLimitAdapter)
        .register(PredicateKind::RandomRow, RandomRowAdapter)
        .register(PredicateKind::FamilyRegex, FamilyRegexAdapter)
        .register(PredicateKind::QualifierPrefix, QualifierPrefixAdapter)
        .register(PredicateKind::ColumnRange, ColumnRangeAdapter)
        .register(PredicateKind::Value, ValueAdapter)
        .register(PredicateKind::TimestampRange, TimestampRangeAdapter)
        .register(PredicateKind::KeyOnly, KeyOnlyAdapter)
        .register(PredicateKind::CellsPerColumn, CellsPerColumnAdapter)
        .register(PredicateKind::CellsPerRow, CellsPerRowAdapter);
}

pub(crate) fn mismatch(expected: PredicateKind, predicate: &Predicate) -> AdaptError {
    AdaptError::KindMismatch {
        expected,
        found: predicate.kind(),
    }
}

pub(crate) fn mismatch_status(expected: PredicateKind, predicate: &Predicate) -> SupportStatus {
    SupportStatus::not_supported(mismatch(expected, predicate).to_string())
}

pub(crate) fn invalid(kind: PredicateKind, message: impl Into<String>) -> AdaptError {
    AdaptError::InvalidArgument {
        kind,
        message: message.into(),
    }
}

/// Reject patterns the engine cannot compile.
pub(crate) fn check_pattern(pattern: &str) -> Result<(), AdaptError> {
    regex::bytes::Regex::new(&without_any_byte_escape(pattern))
        .map(|_| ())
        .map_err(|source| AdaptError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Replace the RE2 `\C` escape, which the regex crate does not know, with
/// its byte-wise equivalent. Escaped backslashes are left alone.
fn without_any_byte_escape(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("\\C") {
        return Cow::Borrowed(pattern);
    }

    let mut rewritten = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            rewritten.push(c);
            continue;
        }
        match chars.next() {
            Some('C') => rewritten.push_str("(?s-u:.)"),
            Some(escaped) => {
                rewritten.push('\\');
                rewritten.push(escaped);
            }
            None => rewritten.push('\\'),
        }
    }
    Cow::Owned(rewritten)
}

pub(crate) fn pattern_status(pattern: &str) -> SupportStatus {
    match check_pattern(pattern) {
        Ok(()) => SupportStatus::Supported,
        Err(err) => SupportStatus::not_supported(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_byte_escape_is_accepted() {
        assert!(check_pattern("user\\C*").is_ok());
        assert!(check_pattern("\\C").is_ok());
        assert!(check_pattern("a[\\C").is_err());
    }

    #[test]
    fn test_any_byte_escape_rewrite() {
        assert_eq!(without_any_byte_escape("user#\\C*"), "user#(?s-u:.)*");
        assert_eq!(without_any_byte_escape("a\\.b"), "a\\.b");
        // An escaped backslash followed by a literal C.
        assert_eq!(without_any_byte_escape("a\\\\C"), "a\\\\C");
        assert!(matches!(without_any_byte_escape("plain"), Cow::Borrowed(_)));
    }
}
