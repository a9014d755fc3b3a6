//! Display projections
//!
//! Pure functions recomputed from the local mirror on every snapshot push.

use serde::Serialize;
use shared::Category;

use crate::db::models::Product;

use super::forms::StoredRecord;

/// Case-insensitive substring filter; a blank query returns everything
pub fn filter_by_query<T: StoredRecord>(records: &[T], query: &str) -> Vec<T> {
    let needle = query.trim();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.matches_query(needle))
        .cloned()
        .collect()
}

/// Products grouped into the fixed display buckets
#[derive(Debug, Default, Serialize)]
pub struct CategoryBuckets {
    pub men: Vec<Product>,
    pub women: Vec<Product>,
    pub kids: Vec<Product>,
}

/// Group products by category
///
/// Policy: a record whose category is not one of the three buckets is
/// excluded from every bucket (it can only come from a foreign writer;
/// this build never creates one).
pub fn group_by_category(products: &[Product]) -> CategoryBuckets {
    let mut buckets = CategoryBuckets::default();
    for product in products {
        match product.category {
            Category::Men => buckets.men.push(product.clone()),
            Category::Women => buckets.women.push(product.clone()),
            Category::Kids => buckets.kids.push(product.clone()),
            Category::Unknown => {
                tracing::debug!(
                    id = %product.id_string(),
                    name = %product.name,
                    "Product with unknown category excluded from display buckets"
                );
            }
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Size;

    fn product(name: &str, description: &str, category: Category) -> Product {
        Product {
            id: None,
            name: name.into(),
            description: description.into(),
            base_price: 10.0,
            sale_price: 8.0,
            quantity: 1,
            category,
            sizes: vec![Size::M],
            images: vec!["https://img.example/a.jpg".into()],
            created_at: 0,
        }
    }

    #[test]
    fn filter_matches_name_and_description() {
        let records = vec![
            product("Linen Shirt", "summer", Category::Men),
            product("Wool Coat", "winter warmth", Category::Women),
        ];
        assert_eq!(filter_by_query(&records, "LINEN").len(), 1);
        assert_eq!(filter_by_query(&records, "winter").len(), 1);
        assert_eq!(filter_by_query(&records, "").len(), 2);
        assert!(filter_by_query(&records, "denim").is_empty());
    }

    #[test]
    fn grouping_fills_fixed_buckets() {
        let records = vec![
            product("A", "", Category::Men),
            product("B", "", Category::Kids),
            product("C", "", Category::Men),
        ];
        let buckets = group_by_category(&records);
        assert_eq!(buckets.men.len(), 2);
        assert_eq!(buckets.women.len(), 0);
        assert_eq!(buckets.kids.len(), 1);
    }

    #[test]
    fn bucket_excludes_unknown_category() {
        let records = vec![
            product("A", "", Category::Men),
            product("B", "", Category::Unknown),
        ];
        let buckets = group_by_category(&records);
        let total = buckets.men.len() + buckets.women.len() + buckets.kids.len();
        assert_eq!(total, 1);
    }
}
