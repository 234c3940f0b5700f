#![allow(dead_code)]

use crate::default_adapter;
use connectors::bigtable::{filter::RowFilter, request::ScanRequest};
use engine_processing::{error::AdaptError, filter::FilterAdapter};
use model::{predicate::Predicate, support::SupportStatus};

/// A query over user rows: key pattern, latest version only, values stripped.
pub const USER_KEYS_PREDICATE: &str = r#"{
    "list": {
        "operator": "all",
        "children": [
            { "row_key_regex": "user#[0-9]+" },
            { "cells_per_column": 1 },
            "key_only"
        ]
    }
}"#;

/// Either recent cells of the `events` family or any cell of the `profile`
/// family, for at most 100 rows.
pub const EVENTS_OR_PROFILE_PREDICATE: &str = r#"{
    "list": {
        "operator": "all",
        "children": [
            { "row_limit": 100 },
            {
                "list": {
                    "operator": "any",
                    "children": [
                        {
                            "list": {
                                "operator": "all",
                                "children": [
                                    { "family_regex": "events" },
                                    { "timestamp_range": { "start_micros": 1000, "end_micros": null } }
                                ]
                            }
                        },
                        { "family_regex": "profile" }
                    ]
                }
            }
        ]
    }
}"#;

pub fn parse(json: &str) -> Predicate {
    Predicate::from_json(json).expect("parse predicate")
}

/// Adapt with the default adapter.
pub fn adapt(json: &str) -> Result<Option<RowFilter>, AdaptError> {
    adapt_with(&default_adapter(), json)
}

pub fn adapt_with(adapter: &FilterAdapter, json: &str) -> Result<Option<RowFilter>, AdaptError> {
    adapter.adapt_filter(&parse(json))
}

/// Adapt with the default adapter and render the filter in its text form.
pub fn render(json: &str) -> Option<String> {
    adapt(json)
        .expect("adapt predicate")
        .map(|filter| filter.to_string())
}

pub fn status(json: &str) -> SupportStatus {
    status_with(&default_adapter(), json)
}

pub fn status_with(adapter: &FilterAdapter, json: &str) -> SupportStatus {
    adapter.support_status(&parse(json))
}

pub fn scan(table: &str, json: &str) -> ScanRequest {
    default_adapter()
        .build_scan(table, &parse(json))
        .expect("build scan request")
}

/// Assert that every chain and interleave in `filter` has at least two children.
pub fn assert_no_degenerate_composites(filter: &RowFilter) {
    filter.walk(&mut |node| {
        if node.is_composite() {
            assert!(
                node.children().len() >= 2,
                "degenerate composite filter: {node}"
            );
        }
    });
}

/// Reasons of the offending leaves, outermost path first.
pub fn leaf_reasons(status: &SupportStatus) -> Vec<String> {
    status
        .leaf_reasons()
        .into_iter()
        .map(str::to_string)
        .collect()
}
