use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;

use crate::error::FetchError;
use crate::models::SearchResultItem;

#[derive(Debug, Deserialize)]
struct ProductsEnvelope {
    #[serde(default)]
    data: Option<ProductList>,
    #[serde(default)]
    products: Option<Vec<RawProduct>>,
}

#[derive(Debug, Deserialize)]
struct ProductList {
    #[serde(default)]
    products: Option<Vec<RawProduct>>,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Option<String>,
}

impl ProductsEnvelope {
    fn into_products(self) -> Vec<RawProduct> {
        self.data
            .and_then(|d| d.products)
            .or(self.products)
            .unwrap_or_default()
    }
}

/// Ids arrive as numbers or strings; both compare as their decimal text.
/// Anything else becomes an empty id, which still occupies its slot but never matches.
fn id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn products(body: Value) -> Result<Vec<RawProduct>, FetchError> {
    let envelope: ProductsEnvelope = serde_json::from_value(body)?;
    Ok(envelope.into_products())
}

/// Title of the first product in a card API response, if any product came back.
pub fn parse_card_title(body: Value) -> Result<Option<String>, FetchError> {
    Ok(products(body)?
        .into_iter()
        .next()
        .map(|p| p.name.unwrap_or_default()))
}

/// Search API response into result items, one per returned entry, in ranking order.
pub fn parse_search_items(body: Value) -> Result<Vec<SearchResultItem>, FetchError> {
    Ok(products(body)?
        .iter()
        .map(|p| SearchResultItem::new(id_to_string(&p.id)))
        .collect())
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css).map_err(|e| FetchError::Decode(format!("bad selector `{css}`: {e}")))
}

pub fn parse_page_title(html: &str) -> Result<Option<String>, FetchError> {
    let doc = Html::parse_document(html);
    let title_selector = selector("h1.product-page__title, h1")?;

    Ok(doc
        .select(&title_selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string()))
}

pub fn parse_search_page(html: &str) -> Result<Vec<SearchResultItem>, FetchError> {
    let doc = Html::parse_document(html);
    let card_selector = selector("article.product-card")?;

    Ok(doc
        .select(&card_selector)
        .map(|e| SearchResultItem::new(e.value().attr("data-nm-id").unwrap_or_default().trim()))
        .collect())
}
