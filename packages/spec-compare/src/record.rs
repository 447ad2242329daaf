//! Extracted product records and the comparison verdict.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Structured attributes extracted from one product spec sheet.
///
/// `product_name` is required. Every other attribute may be missing; a JSON
/// `null` counts as missing. `price` must be a JSON number when present.
/// Keys the model adds beyond the known set are kept in `extra` so the record
/// serializes back out with everything the model returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecRecord {
    #[serde(deserialize_with = "text")]
    pub product_name: String,

    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub processor: Option<String>,

    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub ram: Option<String>,

    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,

    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub battery: Option<String>,

    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SpecRecord {
    /// Create a record with only a product name.
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            processor: None,
            ram: None,
            storage: None,
            price: None,
            battery: None,
            weight: None,
            extra: Map::new(),
        }
    }

    pub fn with_processor(mut self, value: impl Into<String>) -> Self {
        self.processor = Some(value.into());
        self
    }

    pub fn with_ram(mut self, value: impl Into<String>) -> Self {
        self.ram = Some(value.into());
        self
    }

    pub fn with_storage(mut self, value: impl Into<String>) -> Self {
        self.storage = Some(value.into());
        self
    }

    pub fn with_battery(mut self, value: impl Into<String>) -> Self {
        self.battery = Some(value.into());
        self
    }

    pub fn with_weight(mut self, value: impl Into<String>) -> Self {
        self.weight = Some(value.into());
        self
    }

    /// Set the price. Non-finite values cannot be represented and are ignored.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Number::from_f64(price);
        self
    }

    /// Set an integral price, kept as an integer when serialized.
    pub fn with_whole_price(mut self, price: u64) -> Self {
        self.price = Some(Number::from(price));
        self
    }

    /// Price as a float for comparisons.
    pub fn price_value(&self) -> Option<f64> {
        self.price.as_ref().and_then(Number::as_f64)
    }

    /// Display value of a table attribute, `None` when missing.
    pub fn attribute(&self, attribute: Attribute) -> Option<String> {
        match attribute {
            Attribute::Processor => self.processor.clone(),
            Attribute::Ram => self.ram.clone(),
            Attribute::Storage => self.storage.clone(),
            Attribute::Battery => self.battery.clone(),
            Attribute::Weight => self.weight.clone(),
            Attribute::Price => self.price.as_ref().map(Number::to_string),
        }
    }
}

/// Attributes shown as table rows, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Processor,
    Ram,
    Storage,
    Battery,
    Weight,
    Price,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Processor,
        Attribute::Ram,
        Attribute::Storage,
        Attribute::Battery,
        Attribute::Weight,
        Attribute::Price,
    ];

    /// JSON key of the attribute.
    pub fn key(self) -> &'static str {
        match self {
            Attribute::Processor => "processor",
            Attribute::Ram => "ram",
            Attribute::Storage => "storage",
            Attribute::Battery => "battery",
            Attribute::Weight => "weight",
            Attribute::Price => "price",
        }
    }

    /// Row label.
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Processor => "Processor",
            Attribute::Ram => "Ram",
            Attribute::Storage => "Storage",
            Attribute::Battery => "Battery",
            Attribute::Weight => "Weight",
            Attribute::Price => "Price",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Qualitative cross-product comparison returned by the analyst model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonVerdict {
    pub best_value_product: String,

    #[serde(default)]
    pub reason: String,

    #[serde(default)]
    pub comparison_summary: Vec<ProductAssessment>,
}

/// Strengths and weaknesses of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAssessment {
    pub product_name: String,

    #[serde(default)]
    pub strengths: Vec<String>,

    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// Cheapest product found by the price comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Cheapest {
    pub product_name: String,
    pub price: Number,
}

// Models sometimes answer `"ram": 16` or `"storage": ["512GB", "1TB"]`
// instead of a string. Scalars keep their JSON text, arrays are joined with
// ", ", and objects keep their compact JSON.
fn display_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(display_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        object @ Value::Object(_) => Some(object.to_string()),
    }
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(display_text(Value::deserialize(deserializer)?))
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    display_text(Value::deserialize(deserializer)?)
        .ok_or_else(|| serde::de::Error::custom("product_name must not be null"))
}
