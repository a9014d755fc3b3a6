//! Form drafts
//!
//! Drafts hold the raw form strings and are parsed during validation, so a
//! half-typed price never panics anything. Validation returns every failing
//! field at once; `build` is only called on a draft that already validated.

use serde::Deserialize;
use shared::{Category, Size};

use crate::db::models::{Hero, HeroCreate, Product, ProductCreate};

/// A form the ingestion controller can drive
pub trait RecordForm: Clone + Default + Send + Sync + 'static {
    /// Create payload produced on submit
    type Record: Send + Sync + 'static;
    /// Persisted record mirrored from the live feed
    type Stored: StoredRecord;

    /// Resource name used in status messages ("product", "hero")
    const LABEL: &'static str;
    /// Plural form for bulk messages ("products", "heroes")
    const LABEL_PLURAL: &'static str;

    /// Image slots; `None` = unbounded, `Some(1)` = single-slot replace
    fn image_slots() -> Option<usize> {
        None
    }

    /// All validation issues, empty when the draft is submittable
    fn validate(&self, staged_assets: usize) -> Vec<String>;

    /// Assemble the record from the draft and the uploaded URLs
    fn build(&self, images: Vec<String>) -> Self::Record;
}

/// A persisted record as held in the local mirror
pub trait StoredRecord: Clone + Send + Sync + 'static {
    fn id_string(&self) -> String;
    /// Case-insensitive substring filter for the search box
    fn matches_query(&self, needle: &str) -> bool;
}

impl StoredRecord for Product {
    fn id_string(&self) -> String {
        Product::id_string(self)
    }

    fn matches_query(&self, needle: &str) -> bool {
        Product::matches_query(self, needle)
    }
}

impl StoredRecord for Hero {
    fn id_string(&self) -> String {
        Hero::id_string(self)
    }

    fn matches_query(&self, needle: &str) -> bool {
        Hero::matches_query(self, needle)
    }
}

// =============================================================================
// Product form
// =============================================================================

/// Raw product form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_price: String,
    #[serde(default)]
    pub sale_price: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sizes: Vec<String>,
}

impl RecordForm for ProductDraft {
    type Record = ProductCreate;
    type Stored = Product;

    const LABEL: &'static str = "product";
    const LABEL_PLURAL: &'static str = "products";

    fn validate(&self, staged_assets: usize) -> Vec<String> {
        let mut issues = Vec::new();

        if self.name.trim().is_empty() {
            issues.push("name is required".to_string());
        }
        if self.description.trim().is_empty() {
            issues.push("description is required".to_string());
        }

        match parse_price(&self.base_price) {
            Some(price) if price > 0.0 => {}
            Some(_) => issues.push("price must be greater than 0".to_string()),
            None => issues.push("price must be a positive number".to_string()),
        }
        match parse_price(&self.sale_price) {
            Some(price) if price >= 0.0 => {}
            Some(_) => issues.push("sale price must not be negative".to_string()),
            None => issues.push("sale price must be a number".to_string()),
        }
        match self.quantity.trim().parse::<i64>() {
            Ok(quantity) if quantity >= 0 => {}
            Ok(_) => issues.push("quantity must not be negative".to_string()),
            Err(_) => issues.push("quantity must be a whole number".to_string()),
        }

        if Category::parse(self.category.trim()).is_none() {
            issues.push("category must be one of men, women, kids".to_string());
        }
        if self.sizes.is_empty() {
            issues.push("select at least one size".to_string());
        } else if self.sizes.iter().any(|s| Size::parse(s).is_none()) {
            issues.push("sizes must be XS, S, M, L, XL or XXL".to_string());
        }

        if staged_assets == 0 {
            issues.push("add at least one image".to_string());
        }

        issues
    }

    fn build(&self, images: Vec<String>) -> ProductCreate {
        ProductCreate {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            base_price: parse_price(&self.base_price).unwrap_or_default(),
            sale_price: parse_price(&self.sale_price).unwrap_or_default(),
            quantity: self.quantity.trim().parse().unwrap_or_default(),
            category: Category::parse(self.category.trim()).unwrap_or(Category::Unknown),
            sizes: self
                .sizes
                .iter()
                .filter_map(|s| Size::parse(s))
                .collect(),
            images,
        }
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

// =============================================================================
// Hero form
// =============================================================================

/// Raw hero banner form fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub button_text: String,
    #[serde(default)]
    pub description: String,
}

impl RecordForm for HeroDraft {
    type Record = HeroCreate;
    type Stored = Hero;

    const LABEL: &'static str = "hero";
    const LABEL_PLURAL: &'static str = "heroes";

    fn image_slots() -> Option<usize> {
        Some(1)
    }

    fn validate(&self, staged_assets: usize) -> Vec<String> {
        let mut issues = Vec::new();
        if self.title.trim().is_empty() {
            issues.push("title is required".to_string());
        }
        if self.button_text.trim().is_empty() {
            issues.push("button text is required".to_string());
        }
        if self.description.trim().is_empty() {
            issues.push("description is required".to_string());
        }
        if staged_assets == 0 {
            issues.push("add an image".to_string());
        }
        issues
    }

    fn build(&self, images: Vec<String>) -> HeroCreate {
        HeroCreate {
            title: self.title.trim().to_string(),
            button_text: self.button_text.trim().to_string(),
            description: self.description.trim().to_string(),
            image: images.into_iter().next().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ProductDraft {
        ProductDraft {
            name: " Linen Shirt ".into(),
            description: "Lightweight".into(),
            base_price: "49.90".into(),
            sale_price: "39.90".into(),
            quantity: "12".into(),
            category: "men".into(),
            sizes: vec!["M".into(), "L".into()],
        }
    }

    #[test]
    fn valid_draft_has_no_issues() {
        assert!(valid_draft().validate(1).is_empty());
    }

    #[test]
    fn issues_are_aggregated() {
        let draft = ProductDraft {
            base_price: "0".into(),
            quantity: "-1".into(),
            ..ProductDraft::default()
        };
        let issues = draft.validate(0);
        // name, description, price, sale price, quantity, category, sizes, image
        assert_eq!(issues.len(), 8);
        assert!(issues.iter().any(|i| i.contains("greater than 0")));
        assert!(issues.iter().any(|i| i.contains("at least one image")));
    }

    #[test]
    fn build_trims_and_parses() {
        let record = valid_draft().build(vec!["https://cdn.example/a.jpg".into()]);
        assert_eq!(record.name, "Linen Shirt");
        assert_eq!(record.base_price, 49.90);
        assert_eq!(record.quantity, 12);
        assert_eq!(record.category, shared::Category::Men);
        assert_eq!(record.images.len(), 1);
    }

    #[test]
    fn nan_price_is_rejected() {
        let mut draft = valid_draft();
        draft.base_price = "NaN".into();
        assert_eq!(draft.validate(1).len(), 1);
    }

    #[test]
    fn hero_draft_requires_every_field() {
        let issues = HeroDraft::default().validate(0);
        assert_eq!(issues.len(), 4);
        assert!(HeroDraft::image_slots() == Some(1));
    }

    #[test]
    fn plural_labels_are_real_words() {
        assert_eq!(ProductDraft::LABEL_PLURAL, "products");
        assert_eq!(HeroDraft::LABEL_PLURAL, "heroes");
    }
}
