//! Writes rendered pages to the output directory.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use pagegen_shared::{PageGenError, Result};

/// File name of the FAQ page.
pub const FAQ_FILE: &str = "faq.json";
/// File name of the product page.
pub const PRODUCT_PAGE_FILE: &str = "product_page.json";
/// File name of the comparison page.
pub const COMPARISON_PAGE_FILE: &str = "comparison_page.json";

/// Metadata for a single written page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenPage {
    pub path: PathBuf,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Serialize `page` as 2-space indented JSON and overwrite `dir/file_name`.
///
/// The write goes straight to the target path; an interrupted write can
/// leave a truncated file behind.
pub fn write_page<T: Serialize>(dir: &Path, file_name: &str, page: &T) -> Result<WrittenPage> {
    std::fs::create_dir_all(dir).map_err(|e| PageGenError::io(dir, e))?;

    let json = serde_json::to_string_pretty(page).map_err(|e| {
        PageGenError::validation(format!("JSON serialization failed: {e}"))
    })?;

    let path = dir.join(file_name);
    std::fs::write(&path, &json).map_err(|e| PageGenError::io(&path, e))?;

    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(path = %path.display(), size = json.len(), "wrote page");

    Ok(WrittenPage {
        path,
        sha256,
        size_bytes: json.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn writes_two_space_indented_json() {
        let dir = std::env::temp_dir().join(format!("pagegen-writer-{}", Uuid::now_v7()));
        let page = serde_json::json!({"page": "FAQ", "items": [{"q": "Q", "a": "A"}]});

        let written = write_page(&dir, FAQ_FILE, &page).unwrap();
        let content = std::fs::read_to_string(&written.path).unwrap();

        assert!(content.contains("\n  \"page\": \"FAQ\""));
        assert!(content.contains("\n    {\n      \""));
        assert!(content.contains("\"a\": \"A\""));
        assert_eq!(written.size_bytes, content.len());
        assert_eq!(written.sha256.len(), 64);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = std::env::temp_dir().join(format!("pagegen-writer-{}", Uuid::now_v7()));

        write_page(&dir, PRODUCT_PAGE_FILE, &serde_json::json!({"name": "long old name"})).unwrap();
        let written = write_page(&dir, PRODUCT_PAGE_FILE, &serde_json::json!({"name": "new"})).unwrap();

        let content = std::fs::read_to_string(&written.path).unwrap();
        assert_eq!(content, "{\n  \"name\": \"new\"\n}");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
