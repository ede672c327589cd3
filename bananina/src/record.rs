use std::fmt;

use serde::{Serialize, Serializer};

/// Written in place of any value that could not be extracted.
pub const NOT_AVAILABLE: &str = "N/A";

/// Discount cell of items without a special price.
pub const NO_DISCOUNT: &str = "No discount";

/// Outcome of a single extraction step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field {
    Value(String),
    #[default]
    Unavailable,
}

impl Field {
    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Value(value) => Some(value),
            Field::Unavailable => None,
        }
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map_or(Field::Unavailable, Field::Value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Value(value.to_string())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value().unwrap_or(NOT_AVAILABLE))
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.value().unwrap_or(NOT_AVAILABLE))
    }
}

/// Fields read from a listing tile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSummary {
    pub brand: Field,
    pub name: Field,
    pub price: Field,
    pub original_price: Field,
    pub discount: String,
    pub product_link: Field,
    pub primary_image: Field,
    pub hover_image: Field,
    pub sku: Field,
}

/// Fields read from a product detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailFields {
    pub quality: Field,
    pub description: Field,
    pub details: Field,
    pub condition: Field,
}

impl DetailFields {
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// One output row. Field order is the column order of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "Brand")]
    pub brand: Field,
    #[serde(rename = "Name")]
    pub name: Field,
    #[serde(rename = "Price")]
    pub price: Field,
    #[serde(rename = "Original Price")]
    pub original_price: Field,
    #[serde(rename = "Discount")]
    pub discount: String,
    #[serde(rename = "Product Link")]
    pub product_link: Field,
    #[serde(rename = "Primary Image")]
    pub primary_image: Field,
    #[serde(rename = "Hover Image")]
    pub hover_image: Field,
    #[serde(rename = "SKU")]
    pub sku: Field,
    #[serde(rename = "Quality")]
    pub quality: Field,
    #[serde(rename = "Description")]
    pub description: Field,
    #[serde(rename = "Details")]
    pub details: Field,
    #[serde(rename = "Condition")]
    pub condition: Field,
}

impl ProductRecord {
    pub fn new(summary: ItemSummary, details: DetailFields) -> Self {
        Self {
            brand: summary.brand,
            name: summary.name,
            price: summary.price,
            original_price: summary.original_price,
            discount: summary.discount,
            product_link: summary.product_link,
            primary_image: summary.primary_image,
            hover_image: summary.hover_image,
            sku: summary.sku,
            quality: details.quality,
            description: details.description,
            details: details.details,
            condition: details.condition,
        }
    }
}
