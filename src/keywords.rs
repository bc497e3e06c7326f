use std::collections::HashSet;

use regex::Regex;

use crate::config::LocaleRules;
use crate::error::ConfigError;

pub const DEFAULT_MAX_KEYWORDS: usize = 5;

/// Derives search terms from a product title.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    token: Regex,
    min_len: usize,
    stopwords: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new(locale: &str, rules: &LocaleRules) -> Result<Self, ConfigError> {
        let token = Regex::new(&rules.token_pattern).map_err(|source| ConfigError::InvalidPattern {
            locale: locale.to_string(),
            source,
        })?;
        Ok(Self {
            token,
            min_len: rules.min_len,
            stopwords: rules.stopwords.iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    /// Returns at most `max_keywords` distinct lowercased words, in order of first
    /// appearance. An empty result means the title has no usable search terms.
    pub fn extract(&self, title: &str, max_keywords: usize) -> Vec<String> {
        let mut keywords: Vec<String> = Vec::new();
        if max_keywords == 0 {
            return keywords;
        }

        for m in self.token.find_iter(title) {
            let word = m.as_str().to_lowercase();
            if word.chars().count() <= self.min_len
                || self.stopwords.contains(&word)
                || keywords.contains(&word)
            {
                continue;
            }
            keywords.push(word);
            if keywords.len() >= max_keywords {
                break;
            }
        }
        keywords
    }
}
