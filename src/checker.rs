use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::ResolutionError;
use crate::keywords::KeywordExtractor;
use crate::models::{KeywordOutcome, RankReport};
use crate::resolver::ProductResolver;
use crate::scanner::{PageFetcher, find_position};

/// Resolves a product once, derives its keywords and scans each keyword in turn.
pub struct RankChecker<'a, R: ?Sized, P: ?Sized> {
    resolver: &'a R,
    fetcher: &'a P,
    extractor: &'a KeywordExtractor,
    max_keywords: usize,
    deadline: Option<Duration>,
}

impl<'a, R, P> RankChecker<'a, R, P>
where
    R: ProductResolver + ?Sized,
    P: PageFetcher + ?Sized,
{
    pub fn new(resolver: &'a R, fetcher: &'a P, extractor: &'a KeywordExtractor) -> Self {
        Self {
            resolver,
            fetcher,
            extractor,
            max_keywords: crate::keywords::DEFAULT_MAX_KEYWORDS,
            deadline: None,
        }
    }

    pub fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }

    /// No new keyword scan starts once `deadline` has elapsed; a running scan is not interrupted.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn check(&self, reference: &str, page_limit: u32) -> Result<RankReport, ResolutionError> {
        let started = Instant::now();
        let product = self.resolver.resolve(reference)?;
        info!(id = %product.id, title = %product.title, "resolved product");

        let keywords = self.extractor.extract(&product.title, self.max_keywords);
        if keywords.is_empty() {
            warn!(title = %product.title, "title has no usable keywords");
        }

        let mut outcomes = Vec::with_capacity(keywords.len());
        let mut truncated = false;
        for keyword in &keywords {
            if self.deadline.is_some_and(|d| started.elapsed() >= d) {
                warn!(remaining = keywords.len() - outcomes.len(), "deadline reached, skipping keywords");
                truncated = true;
                break;
            }
            let outcome = find_position(keyword, &product.id, page_limit, self.fetcher);
            info!(
                keyword = %keyword,
                found = outcome.found,
                page = ?outcome.page,
                position = ?outcome.position,
                checked = outcome.items_checked,
                "keyword scanned"
            );
            outcomes.push(KeywordOutcome {
                keyword: keyword.clone(),
                outcome,
            });
        }

        Ok(RankReport {
            product,
            page_limit,
            keywords,
            outcomes,
            truncated,
            checked_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
