use super::{TypedFilterAdapter, mismatch};
use crate::{
    error::AdaptError,
    filter::{
        context::FilterAdapterContext,
        translation::{Translation, compose},
    },
};
use connectors::bigtable::filter::RowFilter;
use model::predicate::{ListOperator, Predicate, PredicateKind};

/// A limit of zero keeps no cells at all.
pub struct CellsPerColumnAdapter;

impl TypedFilterAdapter for CellsPerColumnAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        match predicate {
            Predicate::CellsPerColumn(0) => Ok(RowFilter::BlockAll.into()),
            Predicate::CellsPerColumn(limit) => Ok(RowFilter::CellsPerColumnLimit(*limit).into()),
            other => Err(mismatch(PredicateKind::CellsPerColumn, other)),
        }
    }
}

/// Skips `offset` cells of each row, then keeps at most `limit` of the rest.
///
/// Both parts are optional: a zero offset and a missing limit contribute
/// nothing. When both are present the offset is applied first.
pub struct CellsPerRowAdapter;

impl TypedFilterAdapter for CellsPerRowAdapter {
    fn adapt(
        &self,
        _ctx: &FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        let Predicate::CellsPerRow { limit, offset } = predicate else {
            return Err(mismatch(PredicateKind::CellsPerRow, predicate));
        };

        if *limit == Some(0) {
            return Ok(RowFilter::BlockAll.into());
        }

        let mut filters = Vec::with_capacity(2);
        if *offset > 0 {
            filters.push(RowFilter::CellsPerRowOffset(*offset));
        }
        if let Some(limit) = limit {
            filters.push(RowFilter::CellsPerRowLimit(*limit));
        }
        Ok(compose(ListOperator::All, filters))
    }
}
