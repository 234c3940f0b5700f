use connectors::bigtable::filter::{Chain, Interleave, RowFilter, TooFewFilters};
use model::predicate::ListOperator;

/// Outcome of translating one predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    /// The predicate places no constraint on the scan.
    Absent,
    /// The predicate's wire filter.
    Filter(RowFilter),
}

impl Translation {
    pub fn is_absent(&self) -> bool {
        matches!(self, Translation::Absent)
    }

    pub fn filter(&self) -> Option<&RowFilter> {
        match self {
            Translation::Absent => None,
            Translation::Filter(filter) => Some(filter),
        }
    }

    pub fn into_filter(self) -> Option<RowFilter> {
        match self {
            Translation::Absent => None,
            Translation::Filter(filter) => Some(filter),
        }
    }
}

impl From<RowFilter> for Translation {
    fn from(filter: RowFilter) -> Self {
        Translation::Filter(filter)
    }
}

/// Combine translated siblings under `operator`.
///
/// * no filters → [`Translation::Absent`]
/// * one filter → that filter, unwrapped
/// * otherwise → a chain for `All`, an interleave for `Any`, in input order
pub fn compose(operator: ListOperator, filters: Vec<RowFilter>) -> Translation {
    let composed = match operator {
        ListOperator::All => Chain::new(filters).map(RowFilter::from),
        ListOperator::Any => Interleave::new(filters).map(RowFilter::from),
    };

    match composed {
        Ok(filter) => Translation::Filter(filter),
        Err(TooFewFilters { mut filters, .. }) => match filters.pop() {
            Some(only) => Translation::Filter(only),
            None => Translation::Absent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_empty_is_absent() {
        assert_eq!(compose(ListOperator::All, vec![]), Translation::Absent);
        assert_eq!(compose(ListOperator::Any, vec![]), Translation::Absent);
    }

    #[test]
    fn test_compose_single_is_unwrapped() {
        assert_eq!(
            compose(ListOperator::Any, vec![RowFilter::StripValue]),
            Translation::Filter(RowFilter::StripValue)
        );
    }

    #[test]
    fn test_compose_many() {
        let filters = vec![RowFilter::StripValue, RowFilter::CellsPerColumnLimit(1)];

        let chain = compose(ListOperator::All, filters.clone()).into_filter().unwrap();
        let RowFilter::Chain(chain) = chain else {
            panic!("expected a chain");
        };
        assert_eq!(chain.filters(), filters.as_slice());

        let interleave = compose(ListOperator::Any, filters.clone())
            .into_filter()
            .unwrap();
        let RowFilter::Interleave(interleave) = interleave else {
            panic!("expected an interleave");
        };
        assert_eq!(interleave.filters(), filters.as_slice());
    }
}
