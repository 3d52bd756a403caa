//! Raw product record → canonical [`Product`].
//!
//! Field renaming only. Values are copied as-is; a value of the wrong JSON
//! type is rejected rather than converted.

use serde_json::{Number, Value};
use tracing::{info, instrument};

use pagegen_shared::{PageGenError, Product, RawProduct, Result};

use crate::pipeline::PipelineState;

/// Build the canonical product record from the raw record.
///
/// Fails with [`PageGenError::MissingField`] on the first absent key.
pub fn parse_product(raw: &RawProduct) -> Result<Product> {
    Ok(Product {
        name: string_field(raw, "Product Name")?,
        concentration: string_field(raw, "Concentration")?,
        skin_type: string_field(raw, "Skin Type")?,
        ingredients: string_list_field(raw, "Key Ingredients")?,
        benefits: string_list_field(raw, "Benefits")?,
        usage: string_field(raw, "How to Use")?,
        side_effects: string_field(raw, "Side Effects")?,
        price: number_field(raw, "Price")?,
    })
}

/// Pipeline stage: parse `raw_product_data` into `product`.
#[instrument(skip_all)]
pub fn run(mut state: PipelineState) -> Result<PipelineState> {
    let product = parse_product(&state.raw_product_data)?;
    info!(name = %product.name, "parsed product");
    state.product = Some(product);
    Ok(state)
}

fn field<'a>(raw: &'a RawProduct, key: &str) -> Result<&'a Value> {
    raw.get(key).ok_or_else(|| PageGenError::missing_field(key))
}

fn string_field(raw: &RawProduct, key: &str) -> Result<String> {
    match field(raw, key)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(invalid(key, "string")),
    }
}

fn string_list_field(raw: &RawProduct, key: &str) -> Result<Vec<String>> {
    let Value::Array(items) = field(raw, key)? else {
        return Err(invalid(key, "array of strings"));
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_owned)
                .ok_or_else(|| invalid(key, "array of strings"))
        })
        .collect()
}

fn number_field(raw: &RawProduct, key: &str) -> Result<Number> {
    match field(raw, key)? {
        Value::Number(n) => Ok(n.clone()),
        _ => Err(invalid(key, "number")),
    }
}

fn invalid(key: &str, expected: &'static str) -> PageGenError {
    PageGenError::InvalidField {
        key: key.to_string(),
        expected,
    }
}
