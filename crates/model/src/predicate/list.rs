use super::Predicate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the children of a [`PredicateList`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListOperator {
    /// Every child must pass (conjunction).
    All,
    /// At least one child must pass (disjunction).
    Any,
}

impl fmt::Display for ListOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListOperator::All => f.write_str("ALL"),
            ListOperator::Any => f.write_str("ANY"),
        }
    }
}

/// Ordered list of predicates combined under one [`ListOperator`].
///
/// The list owns its children; they may themselves be lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredicateList {
    operator: ListOperator,
    #[serde(default)]
    children: Vec<Predicate>,
}

impl PredicateList {
    pub fn new(operator: ListOperator, children: Vec<Predicate>) -> Self {
        Self { operator, children }
    }

    pub fn all(children: Vec<Predicate>) -> Self {
        Self::new(ListOperator::All, children)
    }

    pub fn any(children: Vec<Predicate>) -> Self {
        Self::new(ListOperator::Any, children)
    }

    pub fn with(mut self, child: impl Into<Predicate>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn operator(&self) -> ListOperator {
        self.operator
    }

    pub fn children(&self) -> &[Predicate] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
