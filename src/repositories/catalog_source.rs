use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::models::{CatalogResult, Service};

const IMAGE_QUERY: &str = "?auto=compress&cs=tinysrgb&w=400";

/// Trait defining where the service catalog comes from
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full list of bookable services
    async fn load_services(&self) -> CatalogResult<Vec<Service>>;

    /// Short description used in logs
    fn describe(&self) -> String;
}

/// Catalog bundled with the binary
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource;

impl StaticCatalogSource {
    pub fn new() -> Self {
        Self
    }

    /// The bundled catalog, in display order
    pub fn services() -> Vec<Service> {
        vec![
            fixture(
                1,
                "AC Repair & Service",
                "Appliance",
                dec!(199),
                dec!(4.8),
                5691588,
                "Professional AC repair and maintenance service. Our certified technicians will diagnose and fix any AC issues.",
                "CoolTech Services",
                "60-90 mins",
                &["AC", "Repair", "Maintenance", "Cooling"],
            ),
            fixture(
                2,
                "House Cleaning",
                "Cleaning",
                dec!(89),
                dec!(4.9),
                4239019,
                "Deep cleaning service for your home. We cover all rooms, kitchen, bathrooms, and common areas.",
                "SparkleClean",
                "2-3 hours",
                &["Cleaning", "Deep Clean", "Home", "Sanitization"],
            ),
            fixture(
                3,
                "Plumbing Service",
                "Home Repair",
                dec!(149),
                dec!(4.7),
                8985457,
                "Expert plumbing services for leaks, clogs, and installations. 24/7 emergency service available.",
                "FlowMaster Plumbing",
                "45-120 mins",
                &["Plumbing", "Repair", "Installation", "Emergency"],
            ),
            fixture(
                4,
                "Massage Therapy",
                "Beauty & Wellness",
                dec!(120),
                dec!(4.9),
                3997743,
                "Relaxing full-body massage therapy session. Choose from Swedish, deep tissue, or aromatherapy.",
                "Zen Wellness",
                "60 mins",
                &["Massage", "Wellness", "Relaxation", "Therapy"],
            ),
            fixture(
                5,
                "Hair Cut & Styling",
                "Beauty & Wellness",
                dec!(45),
                dec!(4.6),
                3993449,
                "Professional haircut and styling service at your doorstep. Includes wash, cut, and styling.",
                "StyleCraft Salon",
                "45 mins",
                &["Haircut", "Styling", "Beauty", "Grooming"],
            ),
            fixture(
                6,
                "Electrical Repair",
                "Home Repair",
                dec!(179),
                dec!(4.8),
                5974042,
                "Licensed electrician for all electrical repairs and installations. Safe and reliable service.",
                "PowerPro Electric",
                "60-90 mins",
                &["Electrical", "Repair", "Installation", "Wiring"],
            ),
            fixture(
                7,
                "Pest Control",
                "Home Maintenance",
                dec!(129),
                dec!(4.5),
                4239013,
                "Safe and effective pest control treatment for your home. Eco-friendly options available.",
                "BugBuster Pro",
                "90 mins",
                &["Pest Control", "Treatment", "Eco-friendly", "Home"],
            ),
            fixture(
                8,
                "Personal Trainer",
                "Fitness",
                dec!(85),
                dec!(4.7),
                416778,
                "Certified personal trainer for customized fitness sessions. Equipment provided.",
                "FitLife Training",
                "60 mins",
                &["Fitness", "Training", "Health", "Personal"],
            ),
        ]
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture(
    id: u32,
    title: &str,
    category: &str,
    price: Decimal,
    rating: Decimal,
    photo_id: u32,
    description: &str,
    provider: &str,
    duration: &str,
    tags: &[&str],
) -> Service {
    Service {
        id,
        title: title.to_string(),
        category: category.to_string(),
        price,
        rating,
        image: Some(format!(
            "https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg{IMAGE_QUERY}",
            id = photo_id
        )),
        description: description.to_string(),
        provider: provider.to_string(),
        duration: duration.to_string(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load_services(&self) -> CatalogResult<Vec<Service>> {
        Ok(Self::services())
    }

    fn describe(&self) -> String {
        "bundled".to_string()
    }
}

/// Catalog read from a JSON array of services on disk
#[derive(Debug, Clone)]
pub struct JsonFileCatalogSource {
    path: PathBuf,
}

impl JsonFileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalogSource {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn load_services(&self) -> CatalogResult<Vec<Service>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        let services: Vec<Service> = serde_json::from_str(&contents)?;

        info!(count = services.len(), "Read catalog file");
        Ok(services)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}
