pub mod predicate;
pub mod support;
