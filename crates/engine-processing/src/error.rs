use model::{predicate::PredicateKind, support::SupportStatus};
use thiserror::Error;

/// Hard failures raised while adapting a predicate tree into a row filter.
///
/// An unsupported predicate is not a failure: adaptation drops it and the
/// support analysis reports it. The one exception is `Unsupported`, raised
/// only when settings ask for support to be verified before adapting.
#[derive(Error, Debug)]
pub enum AdaptError {
    #[error("Invalid regular expression '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid {kind} predicate: {message}")]
    InvalidArgument {
        kind: PredicateKind,
        message: String,
    },

    #[error("Adapter for {expected} predicates received a {found} predicate")]
    KindMismatch {
        expected: PredicateKind,
        found: PredicateKind,
    },

    #[error("Predicate lists nested {depth} deep exceed the limit of {limit}")]
    NestingTooDeep { depth: usize, limit: usize },

    #[error("Filter is not supported:\n{0}")]
    Unsupported(SupportStatus),
}
