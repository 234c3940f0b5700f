use super::bytes::base64_bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One end of a byte range on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RangeBound {
    #[default]
    Unbounded,
    Closed(#[serde(with = "base64_bytes")] Vec<u8>),
    Open(#[serde(with = "base64_bytes")] Vec<u8>),
}

impl RangeBound {
    fn fmt_start(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Unbounded => f.write_str("(-inf"),
            RangeBound::Closed(b) => write!(f, "[{:?}", String::from_utf8_lossy(b)),
            RangeBound::Open(b) => write!(f, "({:?}", String::from_utf8_lossy(b)),
        }
    }

    fn fmt_end(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Unbounded => f.write_str("+inf)"),
            RangeBound::Closed(b) => write!(f, "{:?}]", String::from_utf8_lossy(b)),
            RangeBound::Open(b) => write!(f, "{:?})", String::from_utf8_lossy(b)),
        }
    }
}

/// Qualifier range within one column family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnRange {
    pub family_name: String,
    #[serde(default)]
    pub start_qualifier: RangeBound,
    #[serde(default)]
    pub end_qualifier: RangeBound,
}

impl fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:", self.family_name)?;
        self.start_qualifier.fmt_start(f)?;
        f.write_str(", ")?;
        self.end_qualifier.fmt_end(f)
    }
}

/// Cell value range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub start_value: RangeBound,
    #[serde(default)]
    pub end_value: RangeBound,
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.start_value.fmt_start(f)?;
        f.write_str(", ")?;
        self.end_value.fmt_end(f)
    }
}

/// Cell timestamp range in microseconds, end exclusive. A missing end is
/// unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampRange {
    pub start_timestamp_micros: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_timestamp_micros: Option<i64>,
}

impl fmt::Display for TimestampRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_timestamp_micros {
            Some(end) => write!(f, "[{}, {})", self.start_timestamp_micros, end),
            None => write!(f, "[{}, +inf)", self.start_timestamp_micros),
        }
    }
}
