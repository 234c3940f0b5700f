#![allow(dead_code)]

use engine_config::settings::FilterSettings;
use engine_processing::filter::FilterAdapter;

pub mod utils;

/// Adapter with every built-in leaf registered and default settings.
fn default_adapter() -> FilterAdapter {
    FilterAdapter::default()
}

/// Adapter configured from a settings document, as a host would load it.
fn configured_adapter(settings_json: &str) -> FilterAdapter {
    let settings = FilterSettings::from_json(settings_json).expect("parse filter settings");
    FilterAdapter::with_defaults(settings)
}
