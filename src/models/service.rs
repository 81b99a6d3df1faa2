use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::CategorySelection;

/// Stable integer identifier of a catalog service
pub type ServiceId = u32;

/// Minimum rating for a service to be featured on the home screen
pub const FEATURED_RATING_THRESHOLD: Decimal = dec!(4.8);

/// Number of services shown in the featured strip
pub const FEATURED_LIMIT: usize = 3;

/// A bookable offering shown in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub title: String,
    pub category: String,
    pub price: Decimal,
    pub rating: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub description: String,
    pub provider: String,
    pub duration: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Search text and category selection applied when browsing the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceFilters {
    #[serde(default)]
    pub search_query: String,
    #[serde(default)]
    pub selected_category: CategorySelection,
}

/// Request model for changing the browsing filters. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateFiltersRequest {
    pub search_query: Option<String>,
    pub selected_category: Option<CategorySelection>,
}

impl ServiceFilters {
    pub fn new(search_query: impl Into<String>, selected_category: CategorySelection) -> Self {
        Self {
            search_query: search_query.into(),
            selected_category,
        }
    }

    /// True when neither the category nor the search text narrows the catalog
    pub fn is_unfiltered(&self) -> bool {
        self.selected_category.is_all() && self.search_query.trim().is_empty()
    }
}

impl Service {
    /// Check if the service matches both the category selection and the search text
    pub fn matches_filters(&self, filters: &ServiceFilters) -> bool {
        self.matches_category(&filters.selected_category) && self.matches_search(&filters.search_query)
    }

    /// Exact, case-sensitive category match; `All` matches everything
    pub fn matches_category(&self, selection: &CategorySelection) -> bool {
        match selection {
            CategorySelection::All => true,
            CategorySelection::Named(category) => &self.category == category,
        }
    }

    /// Case-insensitive substring match over title, category, provider and tags.
    /// Blank queries match every service.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }

        let query_lower = query.to_lowercase();
        self.title.to_lowercase().contains(&query_lower)
            || self.category.to_lowercase().contains(&query_lower)
            || self.provider.to_lowercase().contains(&query_lower)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query_lower))
    }

    pub fn is_featured(&self) -> bool {
        self.rating >= FEATURED_RATING_THRESHOLD
    }
}
