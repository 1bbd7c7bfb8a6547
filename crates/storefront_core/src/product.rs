use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A catalog entry as returned by search. Only `id` matters to pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub price_cents: u64,
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price_cents: u64) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category: String::new(),
            image_url: None,
            description: None,
            price_cents,
        }
    }
}

/// One page of search results, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub page_number: u32,
    pub items: Vec<Product>,
}

impl Page {
    pub fn new(page_number: u32, items: Vec<Product>) -> Self {
        Self { page_number, items }
    }

    /// A page shorter than `page_size` (or empty) is the last one.
    pub fn is_last(&self, page_size: u32) -> bool {
        self.items.is_empty() || self.items.len() < page_size as usize
    }
}

/// Formats integer cents as `12.34`.
pub fn format_price(cents: u64) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}
