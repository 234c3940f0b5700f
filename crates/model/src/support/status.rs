use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason attached to a list whose children are not all supported.
pub const COMPOSITE_NOT_SUPPORTED: &str = "composite filter not supported";

/// Whether a predicate can be expressed as a wire row filter.
///
/// An unsupported verdict keeps the verdicts of the children that caused it,
/// in child order, so the path from the root list down to every offending
/// leaf can be reconstructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportStatus {
    #[default]
    Supported,
    Unsupported {
        reason: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        causes: Vec<SupportStatus>,
    },
}

impl SupportStatus {
    /// Verdict for a single predicate that cannot be expressed.
    pub fn not_supported(reason: impl Into<String>) -> Self {
        SupportStatus::Unsupported {
            reason: reason.into(),
            causes: Vec::new(),
        }
    }

    /// Verdict for a list, given the verdicts of its children.
    ///
    /// `Supported` entries are dropped. When nothing is left the list is
    /// supported.
    pub fn composite(causes: Vec<SupportStatus>) -> Self {
        let causes: Vec<_> = causes.into_iter().filter(|s| !s.is_supported()).collect();
        if causes.is_empty() {
            SupportStatus::Supported
        } else {
            SupportStatus::Unsupported {
                reason: COMPOSITE_NOT_SUPPORTED.to_string(),
                causes,
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, SupportStatus::Supported)
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            SupportStatus::Supported => None,
            SupportStatus::Unsupported { reason, .. } => Some(reason),
        }
    }

    pub fn causes(&self) -> &[SupportStatus] {
        match self {
            SupportStatus::Supported => &[],
            SupportStatus::Unsupported { causes, .. } => causes,
        }
    }

    /// One entry per offending leaf: the reasons from this verdict down to
    /// the leaf, outermost first.
    pub fn paths(&self) -> Vec<Vec<&str>> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        self.collect_paths(&mut prefix, &mut paths);
        paths
    }

    fn collect_paths<'a>(&'a self, prefix: &mut Vec<&'a str>, out: &mut Vec<Vec<&'a str>>) {
        let SupportStatus::Unsupported { reason, causes } = self else {
            return;
        };

        prefix.push(reason);
        if causes.is_empty() {
            out.push(prefix.clone());
        } else {
            for cause in causes {
                cause.collect_paths(prefix, out);
            }
        }
        prefix.pop();
    }

    /// Reasons of the offending leaves, in traversal order.
    pub fn leaf_reasons(&self) -> Vec<&str> {
        self.paths()
            .into_iter()
            .filter_map(|path| path.last().copied())
            .collect()
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            SupportStatus::Supported => write!(f, "{:indent$}supported", "", indent = depth * 2),
            SupportStatus::Unsupported { reason, causes } => {
                write!(f, "{:indent$}{reason}", "", indent = depth * 2)?;
                for cause in causes {
                    writeln!(f)?;
                    cause.write_indented(f, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for SupportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested() -> SupportStatus {
        SupportStatus::composite(vec![
            SupportStatus::not_supported("value != is not expressible"),
            SupportStatus::composite(vec![
                SupportStatus::Supported,
                SupportStatus::not_supported("no adapter registered for opaque"),
            ]),
        ])
    }

    #[test]
    fn test_empty_composite_is_supported() {
        assert_eq!(SupportStatus::composite(vec![]), SupportStatus::Supported);
        assert_eq!(
            SupportStatus::composite(vec![SupportStatus::Supported, SupportStatus::Supported]),
            SupportStatus::Supported
        );
    }

    #[test]
    fn test_composite_keeps_unsupported_in_order() {
        let status = nested();

        assert!(!status.is_supported());
        assert_eq!(status.reason(), Some(COMPOSITE_NOT_SUPPORTED));
        assert_eq!(status.causes().len(), 2);
        assert_eq!(
            status.causes()[0].reason(),
            Some("value != is not expressible")
        );
        assert_eq!(status.causes()[1].causes().len(), 1);
    }

    #[test]
    fn test_paths_reach_every_leaf() {
        let status = nested();

        assert_eq!(
            status.paths(),
            vec![
                vec![COMPOSITE_NOT_SUPPORTED, "value != is not expressible"],
                vec![
                    COMPOSITE_NOT_SUPPORTED,
                    COMPOSITE_NOT_SUPPORTED,
                    "no adapter registered for opaque"
                ],
            ]
        );
        assert_eq!(
            status.leaf_reasons(),
            vec![
                "value != is not expressible",
                "no adapter registered for opaque"
            ]
        );
        assert!(SupportStatus::Supported.paths().is_empty());
    }

    #[test]
    fn test_display_indents_causes() {
        let rendered = nested().to_string();
        let expected = "composite filter not supported\n  value != is not expressible\n  composite filter not supported\n    no adapter registered for opaque";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_serialized_leaf_omits_causes() {
        let json = serde_json::to_string(&SupportStatus::not_supported("nope")).unwrap();
        assert_eq!(json, r#"{"unsupported":{"reason":"nope"}}"#);
        assert_eq!(
            serde_json::to_string(&SupportStatus::Supported).unwrap(),
            r#""supported""#
        );
    }
}
