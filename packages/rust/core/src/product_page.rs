//! Product page renderer.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use pagegen_shared::{Product, Result};

use crate::blocks::{
    IngredientsBlock, PriceBlock, benefits_block, ingredients_block, pricing_block, usage_block,
};
use crate::pipeline::PipelineState;
use crate::writer::{PRODUCT_PAGE_FILE, write_page};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPage {
    pub name: String,
    pub description: String,
    pub ingredients: IngredientsBlock,
    pub usage: String,
    pub price: PriceBlock,
}

pub fn render(product: &Product, currency_symbol: &str) -> ProductPage {
    ProductPage {
        name: product.name.clone(),
        description: benefits_block(product),
        ingredients: ingredients_block(product),
        usage: usage_block(product),
        price: pricing_block(product, currency_symbol),
    }
}

/// Pipeline stage: render and write `product_page.json`.
pub fn run(
    mut state: PipelineState,
    output_dir: &Path,
    currency_symbol: &str,
) -> Result<PipelineState> {
    let page = render(state.product()?, currency_symbol);
    let written = write_page(output_dir, PRODUCT_PAGE_FILE, &page)?;
    info!(path = %written.path.display(), "wrote product page");
    state.written.push(written);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegen_shared::RawProduct;

    #[test]
    fn page_fields_come_from_blocks() {
        let product = crate::parser::parse_product(&RawProduct::sample()).unwrap();
        let page = render(&product, "₹");

        assert_eq!(page.name, "GlowBoost Vitamin C Serum");
        assert_eq!(page.description, benefits_block(&product));
        assert_eq!(page.usage, usage_block(&product));
        assert_eq!(page.ingredients.key_ingredients, product.ingredients);
        assert_eq!(page.price.display, "₹699");
    }

    #[test]
    fn serialized_keys() {
        let product = crate::parser::parse_product(&RawProduct::sample()).unwrap();
        let json = serde_json::to_value(render(&product, "$")).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for key in ["name", "description", "ingredients", "usage", "price"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(keys.len(), 5);
        assert_eq!(json["price"]["display"], "$699");
    }
}
