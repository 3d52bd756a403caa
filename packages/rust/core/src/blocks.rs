//! Reusable content blocks shared by the page renderers.
//!
//! Every block is a pure function of the product fields it reads.

use serde::Serialize;
use serde_json::Number;

use pagegen_shared::Product;

// ---------------------------------------------------------------------------
// Text blocks
// ---------------------------------------------------------------------------

/// One-sentence summary of what the product does.
pub fn benefits_block(product: &Product) -> String {
    if product.benefits.is_empty() {
        return format!(
            "{} is a {} formulation.",
            product.name, product.concentration
        );
    }
    format!(
        "{} is a {} formulation that delivers {}.",
        product.name,
        product.concentration,
        join_list(&product.benefits)
    )
}

/// How to apply the product and for which skin type.
pub fn usage_block(product: &Product) -> String {
    format!(
        "{}. Best suited for {} skin.",
        sentence(&product.usage),
        product.skin_type
    )
}

/// Side effects plus a patch-test reminder.
pub fn safety_block(product: &Product) -> String {
    format!(
        "Possible side effects: {}. Patch test before first use.",
        sentence(&product.side_effects)
    )
}

// ---------------------------------------------------------------------------
// Structured blocks
// ---------------------------------------------------------------------------

/// Ingredient section of the product page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientsBlock {
    pub concentration: String,
    pub key_ingredients: Vec<String>,
    pub summary: String,
}

pub fn ingredients_block(product: &Product) -> IngredientsBlock {
    IngredientsBlock {
        concentration: product.concentration.clone(),
        key_ingredients: product.ingredients.clone(),
        summary: format!(
            "Powered by {} at {}.",
            join_list(&product.ingredients),
            product.concentration
        ),
    }
}

/// Price section of the product page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceBlock {
    pub amount: Number,
    pub currency: String,
    /// Human-readable price, e.g. `₹699`.
    pub display: String,
}

pub fn pricing_block(product: &Product, currency_symbol: &str) -> PriceBlock {
    PriceBlock {
        amount: product.price.clone(),
        currency: currency_symbol.to_string(),
        display: format!("{currency_symbol}{}", product.price),
    }
}

// ---------------------------------------------------------------------------
// Comparison block
// ---------------------------------------------------------------------------

/// The fields two products are compared on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparedProduct {
    pub name: String,
    pub ingredients: Vec<String>,
    pub benefits: Vec<String>,
    pub price: Number,
}

impl From<&Product> for ComparedProduct {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            ingredients: product.ingredients.clone(),
            benefits: product.benefits.clone(),
            price: product.price.clone(),
        }
    }
}

/// Partition of two lists by exact string match. Order follows the inputs;
/// a repeated entry appears once, at its first position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListDiff {
    pub shared: Vec<String>,
    pub only_in_first: Vec<String>,
    pub only_in_second: Vec<String>,
}

/// Side-by-side price comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceDiff {
    pub first: Number,
    pub second: Number,
    /// `first - second`.
    pub difference: Option<Number>,
    /// Name of the cheaper product, `None` on a tie.
    pub cheaper: Option<String>,
}

/// Result of [`comparison_block`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub ingredients: ListDiff,
    pub benefits: ListDiff,
    pub price: PriceDiff,
}

pub fn comparison_block(first: &ComparedProduct, second: &ComparedProduct) -> Comparison {
    Comparison {
        ingredients: list_diff(&first.ingredients, &second.ingredients),
        benefits: list_diff(&first.benefits, &second.benefits),
        price: price_diff(first, second),
    }
}

fn list_diff(first: &[String], second: &[String]) -> ListDiff {
    let first = distinct(first);
    let second = distinct(second);

    let (shared, only_in_first): (Vec<String>, Vec<String>) = first
        .iter()
        .cloned()
        .partition(|item| second.contains(item));
    let only_in_second = second
        .into_iter()
        .filter(|item| !first.contains(item))
        .collect();

    ListDiff {
        shared,
        only_in_first,
        only_in_second,
    }
}

fn distinct(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(item) {
            out.push(item.clone());
        }
    }
    out
}

fn price_diff(first: &ComparedProduct, second: &ComparedProduct) -> PriceDiff {
    let difference = match (first.price.as_i64(), second.price.as_i64()) {
        (Some(a), Some(b)) => a.checked_sub(b).map(Number::from),
        _ => match (first.price.as_f64(), second.price.as_f64()) {
            (Some(a), Some(b)) => Number::from_f64(a - b),
            _ => None,
        },
    };

    let cheaper = match (first.price.as_f64(), second.price.as_f64()) {
        (Some(a), Some(b)) if a < b => Some(first.name.clone()),
        (Some(a), Some(b)) if b < a => Some(second.name.clone()),
        _ => None,
    };

    PriceDiff {
        first: first.price.clone(),
        second: second.price.clone(),
        difference,
        cheaper,
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `a`, `a and b`, `a, b and c`.
fn join_list(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

/// Strip trailing whitespace and full stops so a sentence can be re-punctuated.
fn sentence(text: &str) -> &str {
    text.trim_end().trim_end_matches('.')
}
