//! Page scraping: one GET against a user-supplied URL, reduced to readable text.

pub mod html;
pub mod url_guard;

use std::time::Duration;

use reqwest::{redirect::Policy, Client, Url};
use thiserror::Error;
use tracing::{debug, warn};

const MAX_REDIRECTS: usize = 5;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Unsupported URL scheme '{0}' (only http and https are fetched)")]
    UnsupportedScheme(String),

    #[error("Refusing to fetch private or local address '{0}'")]
    BlockedHost(String),

    #[error("Could not resolve host '{host}': {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Response larger than {limit} bytes")]
    TooLarge { limit: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct PageScraper {
    client: Client,
    max_chars: usize,
    max_bytes: usize,
    allow_private_hosts: bool,
}

impl PageScraper {
    /// `allow_private_hosts` lets loopback and private-network URLs through. Local development only.
    pub fn new(
        timeout: Duration,
        max_chars: usize,
        max_bytes: usize,
        allow_private_hosts: bool,
    ) -> Result<Self, ScrapeError> {
        let redirect = if allow_private_hosts {
            Policy::limited(MAX_REDIRECTS)
        } else {
            Policy::custom(|attempt| {
                if attempt.previous().len() >= MAX_REDIRECTS {
                    return attempt.error("too many redirects");
                }
                if url_guard::is_blocked_redirect(attempt.url()) {
                    let target = attempt.url().to_string();
                    return attempt.error(format!("redirect to private address {target} blocked"));
                }
                attempt.follow()
            })
        };

        Ok(Self {
            client: Client::builder()
                .timeout(timeout)
                .redirect(redirect)
                .user_agent(concat!(
                    env!("CARGO_PKG_NAME"),
                    "/",
                    env!("CARGO_PKG_VERSION")
                ))
                .build()?,
            max_chars,
            max_bytes,
            allow_private_hosts,
        })
    }

    /// Fetches `url` and returns its visible text. Non-2xx responses are errors, as are
    /// bodies over the byte cap.
    pub async fn fetch_page_text(&self, url: &str) -> Result<String, ScrapeError> {
        let parsed = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ScrapeError::UnsupportedScheme(parsed.scheme().to_string()));
        }
        if !self.allow_private_hosts {
            url_guard::ensure_public_host(&parsed).await?;
        }

        let mut response = self.client.get(parsed).send().await?.error_for_status()?;

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(ScrapeError::TooLarge {
                    limit: self.max_bytes,
                });
            }
        }

        // Content-Length may be missing or wrong, so the cap is enforced while reading too.
        let mut body: Vec<u8> = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(ScrapeError::TooLarge {
                    limit: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        let text = html::extract_visible_text(&String::from_utf8_lossy(&body));
        Ok(truncate_chars(&text, self.max_chars).to_string())
    }

    /// Scrapes `url`, logging any failure and substituting empty content.
    pub async fn scrape_or_empty(&self, url: &str) -> String {
        match self.fetch_page_text(url).await {
            Ok(text) => {
                debug!("Scraped content length: {} chars from {url}", text.chars().count());
                text
            }
            Err(e) => {
                warn!("Error scraping {url}: {e}");
                String::new()
            }
        }
    }
}

/// Cuts `s` to at most `max` characters without splitting a UTF-8 sequence.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
