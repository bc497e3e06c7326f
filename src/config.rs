use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const RU_STOPWORDS: [&str; 20] = [
    "и", "в", "на", "с", "по", "из", "за", "к", "о", "от", "для", "что", "это", "как", "так",
    "его", "ее", "но", "или", "а",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub http: HttpConfig,
    /// Tokenizer and stopword rules keyed by locale name. An entry here replaces the built-in `ru` rules.
    pub locales: HashMap<String, LocaleRules>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_pages: u32,
    pub max_keywords: usize,
    pub locale: String,
    pub deadline_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_pages: 3,
            max_keywords: 5,
            locale: "ru".to_string(),
            deadline_secs: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
    pub accept_language: String,
    pub referer: String,
    /// Delivery region the marketplace prices and ranks against.
    pub dest: String,
    pub card_url: String,
    pub search_url: String,
    /// `{id}` is replaced with the product id.
    pub product_page_url: String,
    pub search_page_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_redirects: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36".to_string(),
            accept_language: "ru-RU,ru;q=0.9".to_string(),
            referer: "https://www.wildberries.ru/".to_string(),
            dest: "-1257786".to_string(),
            card_url: "https://card.wb.ru/cards/detail".to_string(),
            search_url: "https://search.wb.ru/exactmatch/ru/common/v4/search".to_string(),
            product_page_url: "https://www.wildberries.ru/catalog/{id}/detail.aspx".to_string(),
            search_page_url: "https://www.wildberries.ru/catalog/0/search.aspx".to_string(),
        }
    }
}

/// Only `token_pattern` is required; a locale without `stopwords` filters none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocaleRules {
    /// Regex whose maximal matches are the candidate words.
    pub token_pattern: String,
    /// Words of this many characters or fewer are dropped.
    #[serde(default = "default_min_len")]
    pub min_len: usize,
    #[serde(default)]
    pub stopwords: Vec<String>,
}

fn default_min_len() -> usize {
    3
}

impl LocaleRules {
    pub fn russian() -> Self {
        Self {
            token_pattern: "[А-Яа-яЁё]+".to_string(),
            min_len: default_min_len(),
            stopwords: RU_STOPWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn locale_rules(&self, locale: &str) -> Result<LocaleRules, ConfigError> {
        if let Some(rules) = self.locales.get(locale) {
            return Ok(rules.clone());
        }
        match locale {
            "ru" => Ok(LocaleRules::russian()),
            other => Err(ConfigError::UnknownLocale(other.to_string())),
        }
    }
}
