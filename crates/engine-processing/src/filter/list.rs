use super::{
    context::FilterAdapterContext,
    dispatcher::LeafDispatcher,
    translation::{Translation, compose},
};
use crate::error::AdaptError;
use connectors::bigtable::filter::RowFilter;
use model::{
    predicate::{Predicate, PredicateList},
    support::SupportStatus,
};
use tracing::{debug, trace};

/// Adapts a predicate list into a single filter, a chain, or an interleave.
pub struct ListAdapter<'a, D: ?Sized> {
    dispatcher: &'a D,
}

impl<'a, D> ListAdapter<'a, D>
where
    D: LeafDispatcher + ?Sized,
{
    pub fn new(dispatcher: &'a D) -> Self {
        Self { dispatcher }
    }

    /// Translate every child through the dispatcher and collapse the results.
    ///
    /// Children that contribute nothing are skipped. The first failure aborts
    /// the whole list; the filters translated so far are discarded.
    pub fn adapt(
        &self,
        ctx: &mut FilterAdapterContext,
        list: &PredicateList,
    ) -> Result<Translation, AdaptError> {
        let mut scope = ctx.enter_list(list)?;
        let filters = self.collect_child_filters(&mut scope, list)?;

        let contributing = filters.len();
        let translation = compose(list.operator(), filters);
        debug!(
            depth = scope.depth(),
            operator = %list.operator(),
            children = list.len(),
            contributing,
            "Adapted predicate list"
        );

        Ok(translation)
    }

    fn collect_child_filters(
        &self,
        ctx: &mut FilterAdapterContext,
        list: &PredicateList,
    ) -> Result<Vec<RowFilter>, AdaptError> {
        let mut filters = Vec::with_capacity(list.len());
        for child in list.children() {
            match self.dispatcher.adapt(ctx, child)? {
                Translation::Filter(filter) => filters.push(filter),
                Translation::Absent => {
                    trace!(kind = %child.kind(), "Predicate contributes no filter");
                }
            }
        }
        Ok(filters)
    }

    /// Support verdict for the list: every unsupported child, in order.
    pub fn analyze(&self, ctx: &mut FilterAdapterContext, list: &PredicateList) -> SupportStatus {
        let mut unsupported = Vec::new();
        match ctx.enter_list(list) {
            Ok(mut scope) => self.collect_unsupported_statuses(&mut scope, list, &mut unsupported),
            Err(err) => unsupported.push(SupportStatus::not_supported(err.to_string())),
        }
        SupportStatus::composite(unsupported)
    }

    /// Append the verdict of every unsupported child of `list` to `out`.
    /// Never stops at the first one.
    pub fn collect_unsupported_statuses(
        &self,
        ctx: &mut FilterAdapterContext,
        list: &PredicateList,
        out: &mut Vec<SupportStatus>,
    ) {
        for child in list.children() {
            let status = match child {
                Predicate::List(nested) => self.analyze(ctx, nested),
                leaf => self.dispatcher.status(ctx, leaf),
            };
            if !status.is_supported() {
                out.push(status);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::predicate::{ListOperator, PredicateKind};
    use std::sync::Mutex;

    const FAILING: u32 = 13;

    /// Translates `CellsPerColumn(n)` to its limit filter and fails on
    /// `FAILING`; `Opaque` contributes nothing and is unsupported. Records
    /// every leaf it sees with the depth it was seen at.
    #[derive(Default)]
    struct RecordingDispatcher {
        seen: Mutex<Vec<(u32, usize)>>,
    }

    impl RecordingDispatcher {
        fn seen(&self) -> Vec<(u32, usize)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl LeafDispatcher for RecordingDispatcher {
        fn adapt(
            &self,
            ctx: &mut FilterAdapterContext,
            predicate: &Predicate,
        ) -> Result<Translation, AdaptError> {
            match predicate {
                Predicate::List(list) => ListAdapter::new(self).adapt(ctx, list),
                Predicate::CellsPerColumn(n) => {
                    self.seen.lock().unwrap().push((*n, ctx.depth()));
                    if *n == FAILING {
                        return Err(AdaptError::InvalidArgument {
                            kind: PredicateKind::CellsPerColumn,
                            message: "unlucky".to_string(),
                        });
                    }
                    Ok(RowFilter::CellsPerColumnLimit(*n).into())
                }
                _ => Ok(Translation::Absent),
            }
        }

        fn status(&self, ctx: &mut FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
            match predicate {
                Predicate::List(list) => ListAdapter::new(self).analyze(ctx, list),
                Predicate::Opaque { name } => SupportStatus::not_supported(name.clone()),
                _ => SupportStatus::Supported,
            }
        }
    }

    fn cells(n: u32) -> Predicate {
        Predicate::CellsPerColumn(n)
    }

    fn limit(n: u32) -> RowFilter {
        RowFilter::CellsPerColumnLimit(n)
    }

    fn adapt(list: &PredicateList) -> Result<Translation, AdaptError> {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::default();
        let result = ListAdapter::new(&dispatcher).adapt(&mut ctx, list);
        assert_eq!(ctx.depth(), 0);
        result
    }

    fn analyze(list: &PredicateList) -> SupportStatus {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::default();
        let status = ListAdapter::new(&dispatcher).analyze(&mut ctx, list);
        assert_eq!(ctx.depth(), 0);
        status
    }

    #[test]
    fn test_all_of_two_is_chain() {
        let translation = adapt(&PredicateList::all(vec![cells(1), cells(2)])).unwrap();
        assert_eq!(
            translation,
            Translation::Filter(RowFilter::chain(vec![limit(1), limit(2)]).unwrap())
        );
    }

    #[test]
    fn test_any_of_one_is_unwrapped() {
        let translation = adapt(&PredicateList::any(vec![cells(1)])).unwrap();
        assert_eq!(translation, Translation::Filter(limit(1)));
    }

    #[test]
    fn test_empty_list_is_absent() {
        assert_eq!(adapt(&PredicateList::all(vec![])).unwrap(), Translation::Absent);
        assert_eq!(adapt(&PredicateList::any(vec![])).unwrap(), Translation::Absent);
    }

    #[test]
    fn test_absent_children_are_skipped() {
        let list = PredicateList::all(vec![Predicate::opaque("x"), cells(2)]);
        assert_eq!(adapt(&list).unwrap(), Translation::Filter(limit(2)));

        let list = PredicateList::any(vec![Predicate::opaque("x"), Predicate::opaque("y")]);
        assert_eq!(adapt(&list).unwrap(), Translation::Absent);
    }

    #[test]
    fn test_nested_lists() {
        let list = PredicateList::any(vec![Predicate::all(vec![cells(1), cells(2)]), cells(3)]);
        let expected = RowFilter::interleave(vec![
            RowFilter::chain(vec![limit(1), limit(2)]).unwrap(),
            limit(3),
        ])
        .unwrap();
        assert_eq!(adapt(&list).unwrap(), Translation::Filter(expected));
    }

    #[test]
    fn test_nested_list_collapsing_to_one_child() {
        let list = PredicateList::all(vec![
            Predicate::any(vec![Predicate::opaque("x"), cells(1)]),
            Predicate::any(vec![]),
            cells(2),
        ]);
        let expected = RowFilter::chain(vec![limit(1), limit(2)]).unwrap();
        assert_eq!(adapt(&list).unwrap(), Translation::Filter(expected));
    }

    #[test]
    fn test_failure_stops_traversal() {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::default();
        let list = PredicateList::all(vec![
            cells(1),
            Predicate::any(vec![cells(2), cells(FAILING), cells(3)]),
            cells(4),
        ]);

        let err = ListAdapter::new(&dispatcher)
            .adapt(&mut ctx, &list)
            .unwrap_err();

        assert!(matches!(err, AdaptError::InvalidArgument { .. }));
        assert_eq!(dispatcher.seen(), vec![(1, 1), (2, 2), (FAILING, 2)]);
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_depth_seen_by_leaves() {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::default();
        let list = PredicateList::all(vec![
            cells(1),
            Predicate::any(vec![Predicate::all(vec![cells(2)])]),
        ]);

        ListAdapter::new(&dispatcher).adapt(&mut ctx, &list).unwrap();
        assert_eq!(dispatcher.seen(), vec![(1, 1), (2, 3)]);
    }

    #[test]
    fn test_nesting_limit_is_a_failure() {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::with_max_depth(2);
        let list = PredicateList::all(vec![Predicate::all(vec![Predicate::all(vec![cells(1)])])]);

        let err = ListAdapter::new(&dispatcher)
            .adapt(&mut ctx, &list)
            .unwrap_err();
        assert!(matches!(
            err,
            AdaptError::NestingTooDeep { depth: 3, limit: 2 }
        ));
        assert!(dispatcher.seen().is_empty());
        assert_eq!(ctx.depth(), 0);
    }

    #[test]
    fn test_analyze_all_supported() {
        let list = PredicateList::any(vec![Predicate::all(vec![cells(1), cells(2)]), cells(3)]);
        assert_eq!(analyze(&list), SupportStatus::Supported);
        assert_eq!(analyze(&PredicateList::all(vec![])), SupportStatus::Supported);
    }

    #[test]
    fn test_analyze_single_supported_child_is_supported() {
        let list = PredicateList::new(ListOperator::Any, vec![cells(1)]);
        assert_eq!(analyze(&list), SupportStatus::Supported);
    }

    #[test]
    fn test_analyze_collects_every_unsupported_child() {
        let list = PredicateList::all(vec![
            Predicate::opaque("first"),
            cells(1),
            Predicate::any(vec![cells(2), Predicate::opaque("second")]),
            Predicate::opaque("third"),
        ]);

        let status = analyze(&list);
        assert_eq!(
            status,
            SupportStatus::composite(vec![
                SupportStatus::not_supported("first"),
                SupportStatus::composite(vec![SupportStatus::not_supported("second")]),
                SupportStatus::not_supported("third"),
            ])
        );
        assert_eq!(status.leaf_reasons(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_analyze_does_not_adapt() {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::default();
        let list = PredicateList::all(vec![cells(FAILING)]);

        let status = ListAdapter::new(&dispatcher).analyze(&mut ctx, &list);
        assert!(status.is_supported());
        assert!(dispatcher.seen().is_empty());
    }

    #[test]
    fn test_analyze_reports_nesting_limit() {
        let dispatcher = RecordingDispatcher::default();
        let mut ctx = FilterAdapterContext::with_max_depth(1);
        let list = PredicateList::all(vec![Predicate::any(vec![cells(1)])]);

        let status = ListAdapter::new(&dispatcher).analyze(&mut ctx, &list);
        assert_eq!(
            status.leaf_reasons(),
            vec!["Predicate lists nested 2 deep exceed the limit of 1"]
        );
        assert_eq!(ctx.depth(), 0);
    }
}
