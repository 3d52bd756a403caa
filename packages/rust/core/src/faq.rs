//! FAQ page renderer.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use pagegen_shared::{Product, Result};

use crate::blocks::{benefits_block, safety_block, usage_block};
use crate::pipeline::PipelineState;
use crate::writer::{FAQ_FILE, write_page};

/// Fixed answer to "Who can use this?".
pub const WHO_CAN_USE_ANSWER: &str = "Suitable for oily and combination skin.";

/// Fixed answer to "When should I apply it?".
pub const WHEN_TO_APPLY_ANSWER: &str = "Morning routine before sunscreen.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqItem {
    pub q: String,
    pub a: String,
}

/// `{"page": "FAQ", "items": [...]}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqPage {
    pub page: &'static str,
    pub items: Vec<FaqItem>,
}

pub fn render(product: &Product) -> FaqPage {
    let item = |q: &str, a: String| FaqItem { q: q.to_string(), a };

    FaqPage {
        page: "FAQ",
        items: vec![
            item("What does this serum do?", benefits_block(product)),
            item("How do I use it?", usage_block(product)),
            item("Is it safe?", safety_block(product)),
            item("Who can use this?", WHO_CAN_USE_ANSWER.to_string()),
            item("When should I apply it?", WHEN_TO_APPLY_ANSWER.to_string()),
        ],
    }
}

/// Pipeline stage: render and write `faq.json`.
pub fn run(mut state: PipelineState, output_dir: &Path) -> Result<PipelineState> {
    let page = render(state.product()?);
    let written = write_page(output_dir, FAQ_FILE, &page)?;
    info!(path = %written.path.display(), items = page.items.len(), "wrote FAQ page");
    state.written.push(written);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagegen_shared::RawProduct;

    fn product() -> Product {
        crate::parser::parse_product(&RawProduct::sample()).unwrap()
    }

    #[test]
    fn always_five_items() {
        let page = render(&product());
        assert_eq!(page.page, "FAQ");
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].a, benefits_block(&product()));
        assert_eq!(page.items[1].a, usage_block(&product()));
        assert_eq!(page.items[2].a, safety_block(&product()));
    }

    #[test]
    fn fixed_answers_ignore_product() {
        let mut other = product();
        other.name = "Night Repair Cream".into();
        other.skin_type = "Dry".into();
        other.usage = "Apply at night".into();

        let a = render(&product());
        let b = render(&other);
        assert_ne!(a.items[0].a, b.items[0].a);
        for idx in [3, 4] {
            assert_eq!(a.items[idx].a.as_bytes(), b.items[idx].a.as_bytes());
        }
        assert_eq!(a.items[3].a, WHO_CAN_USE_ANSWER);
        assert_eq!(a.items[4].a, WHEN_TO_APPLY_ANSWER);
    }

    #[test]
    fn serializes_with_q_and_a_keys() {
        let json = serde_json::to_value(render(&product())).unwrap();
        assert_eq!(json["page"], "FAQ");
        assert_eq!(json["items"][3]["q"], "Who can use this?");
        assert_eq!(json["items"][4]["a"], WHEN_TO_APPLY_ANSWER);
    }
}
