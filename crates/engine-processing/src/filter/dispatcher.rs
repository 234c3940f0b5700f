use super::{context::FilterAdapterContext, translation::Translation};
use crate::error::AdaptError;
use model::{predicate::Predicate, support::SupportStatus};

/// Single entry point for translating any predicate, leaf or list.
///
/// Implementations route predicate lists back into the
/// [`ListAdapter`](super::ListAdapter), which calls the dispatcher again for
/// each child. The recursion ends at the leaves of the tree.
pub trait LeafDispatcher: Send + Sync {
    /// Translate `predicate` into its wire filter, or report that it places
    /// no constraint on the scan.
    fn adapt(
        &self,
        ctx: &mut FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError>;

    /// Whether `predicate` can be expressed as a wire filter.
    fn status(&self, ctx: &mut FilterAdapterContext, predicate: &Predicate) -> SupportStatus;
}
