use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ResolutionError;
use crate::models::ProductInfo;

static CATALOG_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/catalog/(\d+)(?:/|$)").expect("catalog id pattern is valid"));

/// Turns a product reference (URL or bare article number) into its id and title.
pub trait ProductResolver {
    fn resolve(&self, reference: &str) -> Result<ProductInfo, ResolutionError>;
}

/// Extracts the numeric article from a `/catalog/<id>/...` URL, or accepts a bare number.
pub fn parse_product_id(reference: &str) -> Result<String, ResolutionError> {
    let reference = reference.trim();
    if !reference.is_empty() && reference.chars().all(|c| c.is_ascii_digit()) {
        return Ok(reference.to_string());
    }

    CATALOG_ID
        .captures(reference)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ResolutionError::InvalidReference(reference.to_string()))
}

/// Shared checks applied to whatever a transport returned for `id`.
pub fn product_from_title(id: &str, title: Option<String>) -> Result<ProductInfo, ResolutionError> {
    let title = title.ok_or_else(|| ResolutionError::NotFound(id.to_string()))?;
    let title = title.trim();
    if title.is_empty() {
        return Err(ResolutionError::EmptyTitle(id.to_string()));
    }
    Ok(ProductInfo {
        id: id.to_string(),
        title: title.to_string(),
    })
}
