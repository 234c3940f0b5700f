//! Adaptation of client-side predicate trees into wire row filters.
//!
//! [`FilterAdapter`] is the entry point. It dispatches each predicate to the
//! adapter registered for its kind and routes predicate lists through the
//! [`ListAdapter`], which collapses the translated children into a single
//! filter, a chain, or an interleave.
//!
//! Adapting never reports unsupported predicates: they are dropped from the
//! produced filter exactly like predicates that contribute no constraint.
//! Callers that need full fidelity must check
//! [`FilterAdapter::support_status`] first, or enable
//! `FilterSettings::verify_support`.

pub mod adapter;
pub mod context;
pub mod dispatcher;
pub mod leaf;
pub mod list;
pub mod translation;


pub use adapter::FilterAdapter;
pub use context::{FilterAdapterContext, ListFrame, ListScope};
pub use dispatcher::LeafDispatcher;
pub use leaf::TypedFilterAdapter;
pub use list::ListAdapter;
pub use translation::{Translation, compose};
