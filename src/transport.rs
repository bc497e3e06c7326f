use tracing::debug;

use crate::config::HttpConfig;
use crate::error::{FetchError, ResolutionError};
use crate::fetcher::Fetcher;
use crate::models::{ProductInfo, SearchResultItem};
use crate::parser;
use crate::resolver::{ProductResolver, parse_product_id, product_from_title};
use crate::scanner::PageFetcher;

/// Talks to the marketplace's JSON card and search endpoints.
pub struct ApiTransport {
    fetcher: Fetcher,
    config: HttpConfig,
}

impl ApiTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            config: config.clone(),
        })
    }

    fn search_params(&self, keyword: &str, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("appType", "1".to_string()),
            ("dest", self.config.dest.clone()),
            ("curr", "rub".to_string()),
            ("locale", "ru".to_string()),
            ("lang", "ru".to_string()),
            ("pricemarginCoeff", "1.0".to_string()),
            ("query", keyword.to_string()),
            ("page", page.to_string()),
            ("spp", "0".to_string()),
            ("resultset", "catalog".to_string()),
        ]
    }
}

impl ProductResolver for ApiTransport {
    fn resolve(&self, reference: &str) -> Result<ProductInfo, ResolutionError> {
        let id = parse_product_id(reference)?;
        let params = [("dest", self.config.dest.clone()), ("nm", id.clone())];
        let body = self.fetcher.get_json(&self.config.card_url, &params)?;
        product_from_title(&id, parser::parse_card_title(body)?)
    }
}

impl PageFetcher for ApiTransport {
    fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<SearchResultItem>, FetchError> {
        let params = self.search_params(keyword, page);
        let body = self.fetcher.get_json(&self.config.search_url, &params)?;
        parser::parse_search_items(body)
    }
}

/// Reads the server-rendered product and search pages instead of the JSON API.
pub struct HtmlTransport {
    fetcher: Fetcher,
    config: HttpConfig,
}

impl HtmlTransport {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            config: config.clone(),
        })
    }
}

impl ProductResolver for HtmlTransport {
    fn resolve(&self, reference: &str) -> Result<ProductInfo, ResolutionError> {
        let id = parse_product_id(reference)?;
        let url = product_page_url(&self.config.product_page_url, &id);
        debug!(%url, "fetching product page");
        let html = self.fetcher.get_html(&url, &[])?;
        product_from_title(&id, parser::parse_page_title(&html)?)
    }
}

impl PageFetcher for HtmlTransport {
    fn fetch_page(&self, keyword: &str, page: u32) -> Result<Vec<SearchResultItem>, FetchError> {
        let params = [("search", keyword.to_string()), ("page", page.to_string())];
        let html = self.fetcher.get_html(&self.config.search_page_url, &params)?;
        parser::parse_search_page(&html)
    }
}

fn product_page_url(template: &str, id: &str) -> String {
    template.replace("{id}", id)
}
