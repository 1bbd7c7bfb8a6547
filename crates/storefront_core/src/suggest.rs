use std::collections::HashSet;

use crate::Product;

/// Most suggestions offered for one search box draft.
pub const SUGGESTION_LIMIT: usize = 5;

/// Names of `products` containing `text`, case-insensitive, in list order.
///
/// Repeated names appear once. Blank text suggests nothing.
pub fn suggest_names(products: &[Product], text: &str, limit: usize) -> Vec<String> {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|product| product.name.to_lowercase().contains(&needle))
        .filter(|product| seen.insert(product.name.as_str()))
        .map(|product| product.name.clone())
        .take(limit)
        .collect()
}
