//! Core domain types for the product content pipeline.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

// ---------------------------------------------------------------------------
// RawProduct
// ---------------------------------------------------------------------------

/// Raw keys every product record must carry, in canonical order.
pub const RAW_PRODUCT_KEYS: [&str; 8] = [
    "Product Name",
    "Concentration",
    "Skin Type",
    "Key Ingredients",
    "Benefits",
    "How to Use",
    "Side Effects",
    "Price",
];

/// Unvalidated product data as supplied by the input collector.
///
/// Kept as a plain JSON object so that missing keys surface in the parser
/// rather than at deserialization time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(pub Map<String, Value>);

impl RawProduct {
    /// Look up a raw field by its display key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The built-in sample product used when no input file is given.
    pub fn sample() -> Self {
        let mut map = Map::new();
        map.insert("Product Name".into(), "GlowBoost Vitamin C Serum".into());
        map.insert("Concentration".into(), "10% Vitamin C".into());
        map.insert("Skin Type".into(), "Oily, Combination".into());
        map.insert(
            "Key Ingredients".into(),
            Value::from(vec!["Vitamin C", "Hyaluronic Acid"]),
        );
        map.insert(
            "Benefits".into(),
            Value::from(vec!["Brightening", "Fades dark spots"]),
        );
        map.insert(
            "How to Use".into(),
            "Apply 2-3 drops in the morning before sunscreen".into(),
        );
        map.insert(
            "Side Effects".into(),
            "Mild tingling for sensitive skin".into(),
        );
        map.insert("Price".into(), Value::from(699));
        Self(map)
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// Canonical product record produced by the parser. Read-only downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub concentration: String,
    pub skin_type: String,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub usage: String,
    pub side_effects: String,
    /// Kept as the exact JSON number from the raw record.
    pub price: Number,
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// The five categories the question generator is asked to fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionCategory {
    Informational,
    Usage,
    Safety,
    Purchase,
    Comparison,
}

impl QuestionCategory {
    /// All categories in prompt order.
    pub const ALL: [QuestionCategory; 5] = [
        Self::Informational,
        Self::Usage,
        Self::Safety,
        Self::Purchase,
        Self::Comparison,
    ];

    /// JSON key used for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "Informational",
            Self::Usage => "Usage",
            Self::Safety => "Safety",
            Self::Purchase => "Purchase",
            Self::Comparison => "Comparison",
        }
    }
}

impl std::fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categorized questions exactly as returned by the text-generation service.
///
/// No schema is enforced: categories may be missing, extra keys are kept.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionSet(pub Map<String, Value>);

impl QuestionSet {
    /// Borrow the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// String questions listed under `category`. Non-string entries are skipped.
    pub fn questions(&self, category: QuestionCategory) -> Vec<&str> {
        match self.0.get(category.as_str()) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Known categories with no key in the set.
    pub fn missing_categories(&self) -> Vec<QuestionCategory> {
        QuestionCategory::ALL
            .into_iter()
            .filter(|c| !self.0.contains_key(c.as_str()))
            .collect()
    }

    /// Number of string questions across the known categories.
    pub fn total_questions(&self) -> usize {
        QuestionCategory::ALL
            .iter()
            .map(|c| self.questions(*c).len())
            .sum()
    }
}
