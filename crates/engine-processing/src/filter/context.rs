use crate::error::AdaptError;
use engine_config::settings::{DEFAULT_MAX_DEPTH, FilterSettings};
use model::predicate::{ListOperator, PredicateList};
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// A predicate list currently being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFrame {
    pub operator: ListOperator,
    pub len: usize,
}

/// Traversal state for one top-level adapt or analyze call.
///
/// Tracks the stack of predicate lists enclosing the predicate being
/// processed, so leaf adapters can behave differently depending on where
/// they sit in the tree. Lists are entered through [`enter_list`], whose
/// guard pops the frame when dropped.
///
/// [`enter_list`]: FilterAdapterContext::enter_list
#[derive(Debug)]
pub struct FilterAdapterContext {
    frames: Vec<ListFrame>,
    max_depth: usize,
}

impl FilterAdapterContext {
    pub fn new(settings: &FilterSettings) -> Self {
        Self::with_max_depth(settings.max_depth())
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Enter `list`. The returned scope derefs to this context and exits the
    /// list when dropped, on every exit path.
    pub fn enter_list(&mut self, list: &PredicateList) -> Result<ListScope<'_>, AdaptError> {
        let depth = self.frames.len() + 1;
        if depth > self.max_depth {
            return Err(AdaptError::NestingTooDeep {
                depth,
                limit: self.max_depth,
            });
        }

        self.frames.push(ListFrame {
            operator: list.operator(),
            len: list.len(),
        });
        trace!(depth, operator = %list.operator(), len = list.len(), "Entered predicate list");

        Ok(ListScope { ctx: self, depth })
    }

    /// Number of lists currently entered.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The innermost list being processed.
    pub fn current_list(&self) -> Option<&ListFrame> {
        self.frames.last()
    }

    /// Every entered list, outermost first.
    pub fn enclosing_lists(&self) -> &[ListFrame] {
        &self.frames
    }

    /// Whether any enclosing list combines its children with `operator`.
    pub fn is_within(&self, operator: ListOperator) -> bool {
        self.frames.iter().any(|frame| frame.operator == operator)
    }
}

impl Default for FilterAdapterContext {
    fn default() -> Self {
        Self::with_max_depth(DEFAULT_MAX_DEPTH)
    }
}

/// Guard for one entered predicate list.
pub struct ListScope<'a> {
    ctx: &'a mut FilterAdapterContext,
    depth: usize,
}

impl Deref for ListScope<'_> {
    type Target = FilterAdapterContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for ListScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for ListScope<'_> {
    fn drop(&mut self) {
        // Nested scopes borrow this one, so they are always gone by now.
        debug_assert_eq!(self.ctx.frames.len(), self.depth);
        self.ctx.frames.pop();
        trace!(depth = self.depth, "Exited predicate list");
    }
}
