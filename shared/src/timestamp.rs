//! Order timestamp normalization
//!
//! Orders are written by the external storefront, and its timestamp field
//! has shown up in three wire shapes over time:
//!
//! - `{"seconds": 1700000000, "nanoseconds": 500000000}` (store-native)
//! - `1700000000123` (epoch milliseconds)
//! - `"2023-11-14T22:13:20Z"` (RFC 3339 string)
//!
//! The union is resolved to epoch milliseconds exactly once, at the
//! repository boundary. Display code only ever sees millis.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Raw order timestamp as it appears on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderTimestamp {
    /// Store-native shape: epoch seconds plus optional nanoseconds
    Seconds {
        seconds: i64,
        #[serde(default)]
        nanoseconds: u32,
    },
    /// Epoch milliseconds
    Millis(i64),
    /// RFC 3339 string
    Rfc3339(String),
}

impl OrderTimestamp {
    /// Resolve to epoch milliseconds
    ///
    /// An unparseable RFC 3339 string resolves to 0 with a warning rather
    /// than dropping the order from the list.
    pub fn to_millis(&self) -> i64 {
        match self {
            OrderTimestamp::Seconds {
                seconds,
                nanoseconds,
            } => seconds * 1000 + i64::from(*nanoseconds) / 1_000_000,
            OrderTimestamp::Millis(ms) => *ms,
            OrderTimestamp::Rfc3339(s) => match DateTime::parse_from_rfc3339(s) {
                Ok(dt) => dt.timestamp_millis(),
                Err(err) => {
                    tracing::warn!(raw = %s, error = %err, "Unparseable order timestamp");
                    0
                }
            },
        }
    }
}

impl Default for OrderTimestamp {
    fn default() -> Self {
        OrderTimestamp::Millis(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_shape_resolves() {
        let ts: OrderTimestamp =
            serde_json::from_str(r#"{"seconds": 1700000000, "nanoseconds": 500000000}"#).unwrap();
        assert_eq!(ts.to_millis(), 1_700_000_000_500);
    }

    #[test]
    fn seconds_shape_without_nanos() {
        let ts: OrderTimestamp = serde_json::from_str(r#"{"seconds": 1700000000}"#).unwrap();
        assert_eq!(ts.to_millis(), 1_700_000_000_000);
    }

    #[test]
    fn millis_shape_resolves() {
        let ts: OrderTimestamp = serde_json::from_str("1700000000123").unwrap();
        assert_eq!(ts.to_millis(), 1_700_000_000_123);
    }

    #[test]
    fn rfc3339_shape_resolves() {
        let ts: OrderTimestamp = serde_json::from_str(r#""2023-11-14T22:13:20Z""#).unwrap();
        assert_eq!(ts.to_millis(), 1_700_000_000_000);
    }

    #[test]
    fn garbage_string_resolves_to_zero() {
        let ts = OrderTimestamp::Rfc3339("not a date".into());
        assert_eq!(ts.to_millis(), 0);
    }
}
