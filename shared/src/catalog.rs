//! Catalog enums
//!
//! Category and size are closed sets on the write path. A record read back
//! from the store may still carry a category this build does not know
//! (written by an older or foreign client), so deserialization folds those
//! into [`Category::Unknown`] instead of failing the whole snapshot.

use serde::{Deserialize, Serialize};

/// Product category
///
/// Display buckets are exactly {men, women, kids}. `Unknown` is never
/// accepted on create; it only exists so a foreign value cannot poison a
/// collection snapshot. Unknown items serialize as `"unknown"` (a record
/// carrying one must still survive a listing response) but are excluded
/// from every bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Men,
    Women,
    Kids,
    #[serde(other)]
    Unknown,
}

impl Category {
    /// The fixed display buckets, in display order
    pub const BUCKETS: [Category; 3] = [Category::Men, Category::Women, Category::Kids];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Men => "men",
            Category::Women => "women",
            Category::Kids => "kids",
            Category::Unknown => "unknown",
        }
    }

    /// Parse a form value. Only the three real buckets are valid input.
    pub fn parse(value: &str) -> Option<Category> {
        match value {
            "men" => Some(Category::Men),
            "women" => Some(Category::Women),
            "kids" => Some(Category::Kids),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Garment size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::XS, Size::S, Size::M, Size::L, Size::XL, Size::XXL];

    pub fn as_str(&self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }

    pub fn parse(value: &str) -> Option<Size> {
        match value {
            "XS" => Some(Size::XS),
            "S" => Some(Size::S),
            "M" => Some(Size::M),
            "L" => Some(Size::L),
            "XL" => Some(Size::XL),
            "XXL" => Some(Size::XXL),
            _ => None,
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        let json = serde_json::to_string(&Category::Women).unwrap();
        assert_eq!(json, "\"women\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Women);
    }

    #[test]
    fn foreign_category_folds_to_unknown() {
        let cat: Category = serde_json::from_str("\"accessories\"").unwrap();
        assert_eq!(cat, Category::Unknown);
    }

    #[test]
    fn unknown_category_still_serializes() {
        // A mirrored record may hold Unknown; serializing it must not fail
        let json = serde_json::to_string(&Category::Unknown).unwrap();
        assert_eq!(json, "\"unknown\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::Unknown);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(Category::parse("men"), Some(Category::Men));
        assert_eq!(Category::parse("accessories"), None);
        assert_eq!(Category::parse(""), None);
    }

    #[test]
    fn size_parse() {
        assert_eq!(Size::parse("XXL"), Some(Size::XXL));
        assert_eq!(Size::parse("xxl"), None);
    }
}
