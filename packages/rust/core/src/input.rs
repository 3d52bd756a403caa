//! Input collection: where the raw product record comes from.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use pagegen_shared::{PageGenError, RawProduct, Result};

/// Load the raw product record.
///
/// With a path, the file must hold a single JSON object. Without one, the
/// built-in sample product is used.
pub fn load_raw_product(path: Option<&Path>) -> Result<RawProduct> {
    let Some(path) = path else {
        debug!("no input file given, using built-in sample product");
        return Ok(RawProduct::sample());
    };

    let content = std::fs::read_to_string(path).map_err(|e| PageGenError::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| {
        PageGenError::validation(format!("invalid product JSON in {}: {e}", path.display()))
    })?;

    match value {
        Value::Object(map) => {
            info!(path = %path.display(), keys = map.len(), "loaded raw product");
            Ok(RawProduct(map))
        }
        _ => Err(PageGenError::validation(format!(
            "{}: expected a JSON object with product fields",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn missing_path_yields_sample() {
        let raw = load_raw_product(None).unwrap();
        assert_eq!(raw, RawProduct::sample());
    }

    #[test]
    fn fixture_matches_sample() {
        let path = Path::new("../../../fixtures/json/product.fixture.json");
        let raw = load_raw_product(Some(path)).expect("load fixture");
        assert_eq!(raw, RawProduct::sample());
    }

    #[test]
    fn non_object_is_rejected() {
        let path = std::env::temp_dir().join(format!("pagegen-input-{}.json", Uuid::now_v7()));
        std::fs::write(&path, r#"["Product Name"]"#).unwrap();

        let err = load_raw_product(Some(&path)).unwrap_err();
        assert!(matches!(err, PageGenError::Validation { .. }));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unreadable_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("pagegen-absent-{}.json", Uuid::now_v7()));
        let err = load_raw_product(Some(&path)).unwrap_err();
        assert!(matches!(err, PageGenError::Io { .. }));
    }
}
