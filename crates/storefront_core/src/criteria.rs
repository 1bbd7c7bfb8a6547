/// Upper bound of the price filter, in whole currency units.
pub const PRICE_CEILING: u32 = 1000;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Newest,
}

impl SortKey {
    /// Name used by the search API.
    pub fn as_wire(self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "priceLowHigh",
            SortKey::PriceDesc => "priceHighLow",
            SortKey::Newest => "newest",
        }
    }

    /// Accepts both the wire names and the short user-facing aliases.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "relevance" => Some(SortKey::Relevance),
            "pricelowhigh" | "priceasc" | "price_asc" => Some(SortKey::PriceAsc),
            "pricehighlow" | "pricedesc" | "price_desc" => Some(SortKey::PriceDesc),
            "newest" => Some(SortKey::Newest),
            _ => None,
        }
    }
}

/// Catalogue category, addressed by URL slug and sent to the API as its enum value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Vegetable,
    SnacksBreads,
    Fruits,
    Meats,
    MilkDairy,
    Seafood,
    Drinks,
    FrozenFood,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Vegetable,
        Category::SnacksBreads,
        Category::Fruits,
        Category::Meats,
        Category::MilkDairy,
        Category::Seafood,
        Category::Drinks,
        Category::FrozenFood,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Vegetable => "vegetable",
            Category::SnacksBreads => "snacks-breads",
            Category::Fruits => "fruits",
            Category::Meats => "meats",
            Category::MilkDairy => "milk-dairy",
            Category::Seafood => "seafood",
            Category::Drinks => "drinks",
            Category::FrozenFood => "frozen-food",
        }
    }

    /// Enum value understood by the search API. Spellings are the server's.
    pub fn as_wire(self) -> &'static str {
        match self {
            Category::Vegetable => "Vegetable",
            Category::SnacksBreads => "Sneack_and_Bread",
            Category::Fruits => "Fruit",
            Category::Meats => "Meats",
            Category::MilkDairy => "Milk_and_Diary",
            Category::Seafood => "Seafood",
            Category::Drinks => "Drinks",
            Category::FrozenFood => "Frozen_Food",
        }
    }

    /// Slug with dashes as spaces and each word capitalised.
    pub fn display_name(self) -> String {
        self.slug()
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(slug))
    }

    /// Accepts a slug or an API enum value.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::from_slug(raw).or_else(|| {
            Self::ALL
                .into_iter()
                .find(|category| category.as_wire().eq_ignore_ascii_case(raw))
        })
    }
}

/// The complete set of parameters defining one logical result set.
///
/// Fields are private so every instance goes through the normalising
/// constructors; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchCriteria {
    query_text: String,
    category: String,
    sort_key: SortKey,
    min_price: u32,
    max_price: u32,
    page_size: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            query_text: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::Relevance,
            min_price: 0,
            max_price: PRICE_CEILING,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl SearchCriteria {
    pub fn new(query_text: impl Into<String>) -> Self {
        Self::default().with_query(query_text)
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn price_range(&self) -> (u32, u32) {
        (self.min_price, self.max_price)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn with_query(mut self, query_text: impl Into<String>) -> Self {
        self.query_text = query_text.into().trim().to_string();
        self
    }

    /// Blank input or `all` in any case resets to [`ALL_CATEGORIES`].
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into().trim().to_string();
        self.category = if category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            ALL_CATEGORIES.to_string()
        } else {
            category
        };
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_price_range(mut self, min: u32, max: u32) -> Self {
        (self.min_price, self.max_price) = normalize_price_range(min, max);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

/// Clamps both bounds to [`PRICE_CEILING`] and orders them.
pub fn normalize_price_range(min: u32, max: u32) -> (u32, u32) {
    let min = min.min(PRICE_CEILING);
    let max = max.min(PRICE_CEILING);
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_normalise_input() {
        let criteria = SearchCriteria::new("  milk ")
            .with_category("")
            .with_price_range(1500, 20)
            .with_page_size(0);

        assert_eq!(criteria.query_text(), "milk");
        assert_eq!(criteria.category(), ALL_CATEGORIES);
        assert_eq!(criteria.price_range(), (20, PRICE_CEILING));
        assert_eq!(criteria.page_size(), 1);
    }

    #[test]
    fn sort_key_parses_wire_and_alias_names() {
        assert_eq!(SortKey::parse("priceLowHigh"), Some(SortKey::PriceAsc));
        assert_eq!(SortKey::parse("price_desc"), Some(SortKey::PriceDesc));
        assert_eq!(SortKey::parse("NEWEST"), Some(SortKey::Newest));
        assert_eq!(SortKey::parse("rating"), None);
        assert_eq!(SortKey::PriceDesc.as_wire(), "priceHighLow");
    }

    #[test]
    fn category_slugs_map_to_api_values() {
        assert_eq!(Category::from_slug("milk-dairy"), Some(Category::MilkDairy));
        assert_eq!(Category::MilkDairy.as_wire(), "Milk_and_Diary");
        assert_eq!(Category::from_slug("snacks-breads").map(Category::as_wire), Some("Sneack_and_Bread"));
        assert_eq!(Category::from_slug("Milk_and_Diary"), None);
        assert_eq!(Category::parse("frozen_food"), Some(Category::FrozenFood));
        assert_eq!(Category::parse(" Fruits "), Some(Category::Fruits));
        assert_eq!(Category::parse("toys"), None);
        assert_eq!(Category::FrozenFood.display_name(), "Frozen Food");
        for category in Category::ALL {
            assert_eq!(Category::from_slug(category.slug()), Some(category));
        }
    }

    #[test]
    fn all_in_any_case_clears_the_category() {
        let criteria = SearchCriteria::default().with_category("Seafood");
        assert_eq!(criteria.clone().with_category("all").category(), ALL_CATEGORIES);
        assert_eq!(criteria.with_category("Seafood").category(), "Seafood");
    }

    #[test]
    fn equality_is_structural() {
        let a = SearchCriteria::new("milk").with_category("Dairy");
        let b = SearchCriteria::new("milk").with_category("Dairy");
        assert_eq!(a, b);
        assert_ne!(a, b.with_sort(SortKey::Newest));
    }
}
