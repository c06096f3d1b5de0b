//! Brand portfolio and market tables.

use serde::{Deserialize, Serialize};

/// Product category. Brands in the same category count as related for halo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrandCategory {
    /// Soft drinks and sparkling water.
    Beverages,
    /// Chips, bars, cereal.
    Snacks,
    /// Skin and sun care.
    PersonalCare,
    /// Grilling and outdoor.
    Outdoor,
}

impl BrandCategory {
    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            BrandCategory::Beverages => "Beverages",
            BrandCategory::Snacks => "Snacks",
            BrandCategory::PersonalCare => "Personal Care",
            BrandCategory::Outdoor => "Outdoor",
        }
    }
}

/// Static description of a brand in the portfolio.
#[derive(Debug, Clone, Copy)]
pub struct BrandProfile {
    /// Brand name (identifier).
    pub name: &'static str,
    /// Product category.
    pub category: BrandCategory,
    /// Average daily net revenue before seasonality.
    pub base_daily_revenue: f64,
    /// Whether revenue follows the in/pre/post/off-season pattern.
    pub seasonal: bool,
}

/// Brand portfolio.
pub static BRANDS: [BrandProfile; 8] = [
    BrandProfile {
        name: "Aurora Sparkling",
        category: BrandCategory::Beverages,
        base_daily_revenue: 120_000.0,
        seasonal: true,
    },
    BrandProfile {
        name: "Crestview Cola",
        category: BrandCategory::Beverages,
        base_daily_revenue: 180_000.0,
        seasonal: false,
    },
    BrandProfile {
        name: "Harvest Crunch",
        category: BrandCategory::Snacks,
        base_daily_revenue: 90_000.0,
        seasonal: false,
    },
    BrandProfile {
        name: "Golden Grove Chips",
        category: BrandCategory::Snacks,
        base_daily_revenue: 70_000.0,
        seasonal: false,
    },
    BrandProfile {
        name: "Lumina Skin",
        category: BrandCategory::PersonalCare,
        base_daily_revenue: 60_000.0,
        seasonal: false,
    },
    BrandProfile {
        name: "Solace Sun Care",
        category: BrandCategory::PersonalCare,
        base_daily_revenue: 45_000.0,
        seasonal: true,
    },
    BrandProfile {
        name: "Summit Grill",
        category: BrandCategory::Outdoor,
        base_daily_revenue: 40_000.0,
        seasonal: true,
    },
    BrandProfile {
        name: "TrailFuel Bars",
        category: BrandCategory::Outdoor,
        base_daily_revenue: 55_000.0,
        seasonal: false,
    },
];

impl BrandProfile {
    /// Look up a brand by name.
    pub fn find(name: &str) -> Option<&'static BrandProfile> {
        BRANDS.iter().find(|b| b.name == name)
    }

    /// Whether two brands are related under the category convention.
    pub fn is_related(&self, other: &BrandProfile) -> bool {
        self.category == other.category
    }
}

/// Names of all brands flagged as seasonal.
pub fn seasonal_brand_names() -> Vec<String> {
    BRANDS
        .iter()
        .filter(|b| b.seasonal)
        .map(|b| b.name.to_string())
        .collect()
}

/// Geographic market group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarketGroup {
    /// United States, Canada.
    #[serde(rename = "North America")]
    NorthAmerica,
    /// Western Europe.
    #[serde(rename = "Europe")]
    Europe,
    /// Asia-Pacific.
    #[serde(rename = "APAC")]
    Apac,
    /// Latin America.
    #[serde(rename = "LATAM")]
    Latam,
    /// Market missing from the market table.
    #[serde(rename = "Other")]
    Other,
}

impl MarketGroup {
    /// Get display name.
    pub fn name(&self) -> &'static str {
        match self {
            MarketGroup::NorthAmerica => "North America",
            MarketGroup::Europe => "Europe",
            MarketGroup::Apac => "APAC",
            MarketGroup::Latam => "LATAM",
            MarketGroup::Other => "Other",
        }
    }
}

impl std::fmt::Display for MarketGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Markets and the group each belongs to.
pub static MARKETS: [(&str, MarketGroup); 10] = [
    ("United States", MarketGroup::NorthAmerica),
    ("Canada", MarketGroup::NorthAmerica),
    ("Mexico", MarketGroup::Latam),
    ("Brazil", MarketGroup::Latam),
    ("United Kingdom", MarketGroup::Europe),
    ("Germany", MarketGroup::Europe),
    ("France", MarketGroup::Europe),
    ("Japan", MarketGroup::Apac),
    ("Australia", MarketGroup::Apac),
    ("India", MarketGroup::Apac),
];

/// Market group for a market name, `None` when the market is unknown.
pub fn market_group(market: &str) -> Option<MarketGroup> {
    MARKETS
        .iter()
        .find(|(name, _)| *name == market)
        .map(|(_, group)| *group)
}

/// Names of all markets.
pub fn market_names() -> Vec<String> {
    MARKETS.iter().map(|(name, _)| name.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_lookup() {
        let brand = BrandProfile::find("Summit Grill").unwrap();
        assert!(brand.seasonal);
        assert!(BrandProfile::find("Unknown").is_none());
    }

    #[test]
    fn test_relatedness_by_category() {
        let aurora = BrandProfile::find("Aurora Sparkling").unwrap();
        let cola = BrandProfile::find("Crestview Cola").unwrap();
        let grill = BrandProfile::find("Summit Grill").unwrap();
        assert!(aurora.is_related(cola));
        assert!(!aurora.is_related(grill));
    }

    #[test]
    fn test_seasonal_brands() {
        let seasonal = seasonal_brand_names();
        assert_eq!(seasonal.len(), 3);
        assert!(seasonal.contains(&"Solace Sun Care".to_string()));
    }

    #[test]
    fn test_market_groups() {
        assert_eq!(market_group("Japan"), Some(MarketGroup::Apac));
        assert_eq!(market_group("Atlantis"), None);
        assert_eq!(market_names().len(), 10);
    }
}
