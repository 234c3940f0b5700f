use super::{
    context::FilterAdapterContext,
    dispatcher::LeafDispatcher,
    leaf::{TypedFilterAdapter, register_defaults},
    list::ListAdapter,
    translation::Translation,
};
use crate::error::AdaptError;
use connectors::bigtable::{filter::RowFilter, request::ScanRequest};
use engine_config::settings::FilterSettings;
use model::{
    predicate::{ListOperator, Predicate, PredicateKind},
    support::SupportStatus,
};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Translates predicate trees into wire row filters.
///
/// Holds one [`TypedFilterAdapter`] per leaf kind and routes predicate lists
/// through the [`ListAdapter`]. Read-only once built, so a single instance
/// can serve any number of threads; every call gets its own context.
pub struct FilterAdapter {
    adapters: HashMap<PredicateKind, Box<dyn TypedFilterAdapter>>,
    settings: FilterSettings,
}

impl FilterAdapter {
    /// An adapter with nothing registered. Every leaf contributes nothing
    /// and is reported unsupported until registered.
    pub fn new(settings: FilterSettings) -> Self {
        Self {
            adapters: HashMap::new(),
            settings,
        }
    }

    /// An adapter for every built-in leaf kind.
    pub fn with_defaults(settings: FilterSettings) -> Self {
        let mut adapter = Self::new(settings);
        register_defaults(&mut adapter);
        adapter
    }

    /// Register `adapter` for `kind`, replacing any previous one.
    pub fn register<A>(&mut self, kind: PredicateKind, adapter: A) -> &mut Self
    where
        A: TypedFilterAdapter + 'static,
    {
        if self.adapters.insert(kind, Box::new(adapter)).is_some() {
            debug!(%kind, "Replaced predicate adapter");
        }
        self
    }

    pub fn is_registered(&self, kind: PredicateKind) -> bool {
        self.adapters.contains_key(&kind)
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn new_context(&self) -> FilterAdapterContext {
        FilterAdapterContext::new(&self.settings)
    }

    /// Translate `predicate` into a row filter, or `None` when it places no
    /// constraint on the scan.
    ///
    /// Unsupported predicates are left out of the result. With
    /// `verify_support` enabled they fail the call instead.
    pub fn adapt_filter(&self, predicate: &Predicate) -> Result<Option<RowFilter>, AdaptError> {
        if self.settings.verify_support() {
            let status = self.support_status(predicate);
            if !status.is_supported() {
                return Err(AdaptError::Unsupported(status));
            }
        }

        let mut ctx = self.new_context();
        let translation = self.adapt(&mut ctx, predicate)?;
        Ok(translation.into_filter())
    }

    pub fn support_status(&self, predicate: &Predicate) -> SupportStatus {
        let mut ctx = self.new_context();
        self.status(&mut ctx, predicate)
    }

    /// Build the scan request for `table`.
    ///
    /// Row limits cannot live in the filter. Those that bound every returned
    /// row, at the top level or reached through `ALL` lists only, become the
    /// request's row limit; the smallest one wins. Zero limits are never
    /// lifted, the filter already blocks every row for them.
    pub fn build_scan(
        &self,
        table: impl Into<String>,
        predicate: &Predicate,
    ) -> Result<ScanRequest, AdaptError> {
        let filter = self.adapt_filter(predicate)?;
        let rows_limit = row_limit(predicate);
        Ok(ScanRequest::new(table)
            .with_filter(filter)
            .with_rows_limit(rows_limit))
    }
}

impl Default for FilterAdapter {
    fn default() -> Self {
        Self::with_defaults(FilterSettings::default())
    }
}

impl LeafDispatcher for FilterAdapter {
    fn adapt(
        &self,
        ctx: &mut FilterAdapterContext,
        predicate: &Predicate,
    ) -> Result<Translation, AdaptError> {
        if let Predicate::List(list) = predicate {
            return ListAdapter::new(self).adapt(ctx, list);
        }

        let kind = predicate.kind();
        match self.adapters.get(&kind) {
            Some(adapter) => adapter.adapt(ctx, predicate),
            None => {
                warn!(%kind, depth = ctx.depth(), "No adapter registered, predicate dropped");
                Ok(Translation::Absent)
            }
        }
    }

    fn status(&self, ctx: &mut FilterAdapterContext, predicate: &Predicate) -> SupportStatus {
        if let Predicate::List(list) = predicate {
            return ListAdapter::new(self).analyze(ctx, list);
        }

        let kind = predicate.kind();
        match self.adapters.get(&kind) {
            Some(adapter) => adapter.status(ctx, predicate),
            None => SupportStatus::not_supported(format!("no adapter registered for {kind}")),
        }
    }
}

fn row_limit(predicate: &Predicate) -> Option<u64> {
    match predicate {
        Predicate::RowLimit(0) => None,
        Predicate::RowLimit(limit) => Some(*limit),
        Predicate::List(list) if list.operator() == ListOperator::All => {
            list.children().iter().filter_map(row_limit).min()
        }
        _ => None,
    }
}
