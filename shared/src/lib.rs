use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sellable content item as returned by the content API
///
/// Items are immutable once fetched; the catalog only ever derives new
/// collections from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub creator: String,
    pub title: String,
    /// Wire name is `pricingOption`, encoded as 0 (Paid), 1 (Free), 2 (ViewOnly)
    #[serde(rename = "pricingOption")]
    pub pricing_category: PricingCategory,
    #[serde(default)]
    pub image_path: String,
    /// Only meaningful for `PricingCategory::Paid`; absent or null reads as 0
    #[serde(default, deserialize_with = "price_or_zero")]
    pub price: f64,
}

fn price_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

impl Item {
    /// Price used for ordering; missing or non-finite prices count as 0
    pub fn effective_price(&self) -> f64 {
        if self.price.is_finite() {
            self.price
        } else {
            0.0
        }
    }

    /// Label shown on the item card
    pub fn price_label(&self) -> String {
        match self.pricing_category {
            PricingCategory::Paid => format!("${:.2}", self.effective_price()),
            PricingCategory::Free => "FREE".to_string(),
            PricingCategory::ViewOnly => "View Only".to_string(),
        }
    }
}

/// Pricing category of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PricingCategory {
    Paid,
    Free,
    ViewOnly,
}

impl PricingCategory {
    /// All categories in their stable index order
    pub const ALL: [PricingCategory; 3] = [
        PricingCategory::Paid,
        PricingCategory::Free,
        PricingCategory::ViewOnly,
    ];

    pub fn index(self) -> u8 {
        match self {
            PricingCategory::Paid => 0,
            PricingCategory::Free => 1,
            PricingCategory::ViewOnly => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PricingCategory::Paid),
            1 => Some(PricingCategory::Free),
            2 => Some(PricingCategory::ViewOnly),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PricingCategory::Paid => "Paid",
            PricingCategory::Free => "Free",
            PricingCategory::ViewOnly => "View Only",
        }
    }
}

impl TryFrom<u8> for PricingCategory {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or_else(|| format!("Unknown pricing option: {}", value))
    }
}

impl From<PricingCategory> for u8 {
    fn from(category: PricingCategory) -> Self {
        category.index()
    }
}

/// Ordering applied to the matched items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Ascending by creator name
    #[default]
    Name,
    /// Most expensive first
    PriceHigh,
    /// Cheapest first
    PriceLow,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Name, SortKey::PriceHigh, SortKey::PriceLow];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceHigh => "price_high",
            SortKey::PriceLow => "price_low",
        }
    }

    /// Human-readable label for the sort dropdown
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Name => "Item Name",
            SortKey::PriceHigh => "Higher Price",
            SortKey::PriceLow => "Lower Price",
        }
    }

    /// Parse a sort key, falling back to `Name` for anything unrecognized
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "price_high" => Ok(SortKey::PriceHigh),
            "price_low" => Ok(SortKey::PriceLow),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed price interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const DEFAULT_MIN: f64 = 0.0;
    pub const DEFAULT_MAX: f64 = 999.0;

    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// A range is usable when both bounds are finite, non-negative and ordered
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min >= 0.0 && self.min <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}
