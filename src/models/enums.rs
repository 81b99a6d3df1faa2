use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Label of the pseudo-category that selects the whole catalog
pub const ALL_CATEGORIES: &str = "All";

/// Category chosen in the category filter bar
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategorySelection {
    #[default]
    All,
    Named(String),
}

impl CategorySelection {
    pub fn named(category: impl Into<String>) -> Self {
        Self::from(category.into())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategorySelection::All)
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelection::All => write!(f, "{}", ALL_CATEGORIES),
            CategorySelection::Named(category) => write!(f, "{}", category),
        }
    }
}

impl From<String> for CategorySelection {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategorySelection::All
        } else {
            CategorySelection::Named(value)
        }
    }
}

impl From<CategorySelection> for String {
    fn from(value: CategorySelection) -> Self {
        value.to_string()
    }
}

impl FromStr for CategorySelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CategorySelection::from(s.to_string()))
    }
}

/// Status of a placed order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selection_string_conversion() {
        assert_eq!(CategorySelection::All.to_string(), "All");
        assert_eq!(CategorySelection::named("Fitness").to_string(), "Fitness");

        assert_eq!("All".parse::<CategorySelection>().unwrap(), CategorySelection::All);
        assert_eq!(
            "Cleaning".parse::<CategorySelection>().unwrap(),
            CategorySelection::Named("Cleaning".to_string())
        );
        // Only the exact label selects everything
        assert_eq!(
            "all".parse::<CategorySelection>().unwrap(),
            CategorySelection::Named("all".to_string())
        );
    }

    #[test]
    fn test_category_selection_serde() {
        let json = serde_json::to_string(&CategorySelection::All).unwrap();
        assert_eq!(json, "\"All\"");

        let deserialized: CategorySelection = serde_json::from_str("\"Beauty & Wellness\"").unwrap();
        assert_eq!(deserialized, CategorySelection::named("Beauty & Wellness"));
    }

    #[test]
    fn test_order_status_string_conversion() {
        assert_eq!(OrderStatus::Confirmed.to_string(), "confirmed");
        assert_eq!("PENDING".parse::<OrderStatus>().unwrap(), OrderStatus::Pending);
        assert!("shipped".parse::<OrderStatus>().is_err());
    }
}
