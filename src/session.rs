//! Line-oriented front end: remembers a page-limit default between requests.

pub const USAGE: &str = "Send a Wildberries product link, optionally followed by the number of pages to scan.\n\
Example: https://www.wildberries.ru/catalog/145726284/detail.aspx 5\n\
Set a default page count with /maxpages 5";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    SetMaxPages(u32),
    Check { url: String, max_pages: u32 },
    Reply(String),
}

#[derive(Debug, Clone)]
pub struct Session {
    fallback_pages: u32,
    default_pages: Option<u32>,
}

impl Session {
    pub fn new(fallback_pages: u32) -> Self {
        Self {
            fallback_pages,
            default_pages: None,
        }
    }

    pub fn max_pages(&self) -> u32 {
        self.default_pages.unwrap_or(self.fallback_pages)
    }

    /// Interprets one input line. `/maxpages N` updates the session default as a side effect.
    pub fn handle(&mut self, line: &str) -> Command {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some(&first) = parts.first() else {
            return Command::Reply(USAGE.to_string());
        };

        match first {
            "/start" | "/help" => Command::Start,
            "/maxpages" => match parts.get(1).and_then(|n| parse_count(n)) {
                Some(n) if parts.len() == 2 => {
                    self.default_pages = Some(n);
                    Command::SetMaxPages(n)
                }
                _ => Command::Reply("Usage: /maxpages 5".to_string()),
            },
            url if is_product_url(url) => {
                let max_pages = parts
                    .get(1)
                    .and_then(|n| parse_count(n))
                    .unwrap_or_else(|| self.max_pages());
                Command::Check {
                    url: url.to_string(),
                    max_pages,
                }
            }
            _ => Command::Reply("Please send a valid Wildberries product link.".to_string()),
        }
    }
}

fn parse_count(s: &str) -> Option<u32> {
    if s.chars().all(|c| c.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

pub fn is_product_url(s: &str) -> bool {
    s.starts_with("http") && s.contains("wildberries.ru/catalog/")
}
