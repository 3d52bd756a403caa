//! Comparison page renderer.
//!
//! Compares the parsed product against a fixed reference product supplied
//! by the caller.

use std::path::Path;

use serde::Serialize;
use serde_json::Number;
use tracing::info;

use pagegen_shared::{Product, Result};

use crate::blocks::{ComparedProduct, ListDiff, PriceDiff, comparison_block};
use crate::pipeline::PipelineState;
use crate::writer::{COMPARISON_PAGE_FILE, write_page};

/// A product defined at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceProduct {
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
    pub benefits: &'static [&'static str],
    pub price: u64,
}

/// The product every comparison page is rendered against.
pub const RADIANT_FIX_C_SERUM: ReferenceProduct = ReferenceProduct {
    name: "RadiantFix C Serum",
    ingredients: &["Vitamin C", "Niacinamide"],
    benefits: &["Glow", "Even tone"],
    price: 799,
};

impl From<&ReferenceProduct> for ComparedProduct {
    fn from(reference: &ReferenceProduct) -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            name: reference.name.to_string(),
            ingredients: owned(reference.ingredients),
            benefits: owned(reference.benefits),
            price: Number::from(reference.price),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPage {
    pub page: &'static str,
    /// `[first, second]`.
    pub products: [ComparedProduct; 2],
    pub ingredients: ListDiff,
    pub benefits: ListDiff,
    pub price: PriceDiff,
}

pub fn render(product: &Product, reference: &ReferenceProduct) -> ComparisonPage {
    let first = ComparedProduct::from(product);
    let second = ComparedProduct::from(reference);
    let comparison = comparison_block(&first, &second);

    ComparisonPage {
        page: "Comparison",
        products: [first, second],
        ingredients: comparison.ingredients,
        benefits: comparison.benefits,
        price: comparison.price,
    }
}

/// Pipeline stage: render and write `comparison_page.json`.
pub fn run(
    mut state: PipelineState,
    output_dir: &Path,
    reference: &ReferenceProduct,
) -> Result<PipelineState> {
    let page = render(state.product()?, reference);
    let written = write_page(output_dir, COMPARISON_PAGE_FILE, &page)?;
    info!(path = %written.path.display(), against = reference.name, "wrote comparison page");
    state.written.push(written);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegen_shared::RawProduct;
    use serde_json::json;

    fn product() -> Product {
        crate::parser::parse_product(&RawProduct::sample()).unwrap()
    }

    fn expected_reference() -> serde_json::Value {
        json!({
            "name": "RadiantFix C Serum",
            "ingredients": ["Vitamin C", "Niacinamide"],
            "benefits": ["Glow", "Even tone"],
            "price": 799
        })
    }

    #[test]
    fn reference_product_is_constant() {
        assert_eq!(serde_json::to_value(RADIANT_FIX_C_SERUM).unwrap(), expected_reference());

        let mut other = product();
        other.name = "Budget Serum".into();
        other.price = Number::from(99);

        for p in [product(), other] {
            let page = serde_json::to_value(render(&p, &RADIANT_FIX_C_SERUM)).unwrap();
            assert_eq!(page["products"][1], expected_reference());
        }
    }

    #[test]
    fn page_shape() {
        let page = serde_json::to_value(render(&product(), &RADIANT_FIX_C_SERUM)).unwrap();

        assert_eq!(page["page"], "Comparison");
        assert_eq!(page["products"][0]["name"], "GlowBoost Vitamin C Serum");
        assert_eq!(
            page["ingredients"],
            json!({
                "shared": ["Vitamin C"],
                "only_in_first": ["Hyaluronic Acid"],
                "only_in_second": ["Niacinamide"]
            })
        );
        assert_eq!(
            page["benefits"],
            json!({
                "shared": [],
                "only_in_first": ["Brightening", "Fades dark spots"],
                "only_in_second": ["Glow", "Even tone"]
            })
        );
        assert_eq!(
            page["price"],
            json!({
                "first": 699,
                "second": 799,
                "difference": -100,
                "cheaper": "GlowBoost Vitamin C Serum"
            })
        );
    }
}
