//! Consumer-side checks on produced entries.
//!
//! Feeds never reject items. These checks report entries that Google would
//! refuse to index so that tooling can surface them.

use thiserror::Error;

use crate::{entry::SitemapEntry, feed::Genre};

/// Most stock tickers Google News accepts per article.
pub const MAX_STOCK_TICKERS: usize = 5;

/// A problem found in a sitemap entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryIssue {
    /// Video entry with neither a content nor a player location.
    #[error("{location}: video needs a content_loc or a player_loc")]
    MissingVideoLocation { location: String },

    #[error("{location}: {count} stock tickers, at most {MAX_STOCK_TICKERS} allowed")]
    TooManyStockTickers { location: String, count: usize },

    /// Ticker not in `EXCHANGE:TICKER` form.
    #[error("{location}: malformed stock ticker {ticker:?}")]
    MalformedStockTicker { location: String, ticker: String },

    #[error("{location}: unknown genre {genre:?}")]
    UnknownGenre { location: String, genre: String },

    #[error("{location}: missing title")]
    MissingTitle { location: String },
}

/// Check one entry.
pub fn validate_entry(entry: &SitemapEntry) -> Vec<EntryIssue> {
    let mut issues = Vec::new();
    let location = || entry.location.clone();

    if let Some(news) = entry.news() {
        if news.title.is_none() {
            issues.push(EntryIssue::MissingTitle {
                location: location(),
            });
        }

        if let Some(genres) = &news.genres {
            for genre in genres.to_list() {
                if genre.parse::<Genre>().is_err() {
                    issues.push(EntryIssue::UnknownGenre {
                        location: location(),
                        genre,
                    });
                }
            }
        }

        if let Some(tickers) = &news.stock_tickers {
            let tickers = tickers.to_list();
            if tickers.len() > MAX_STOCK_TICKERS {
                issues.push(EntryIssue::TooManyStockTickers {
                    location: location(),
                    count: tickers.len(),
                });
            }
            for ticker in tickers {
                if !is_stock_ticker(&ticker) {
                    issues.push(EntryIssue::MalformedStockTicker {
                        location: location(),
                        ticker,
                    });
                }
            }
        }
    }

    if let Some(video) = entry.video() {
        if video.content_loc.is_none() && video.player_loc.is_none() {
            issues.push(EntryIssue::MissingVideoLocation {
                location: location(),
            });
        }
        if video.title.is_none() {
            issues.push(EntryIssue::MissingTitle {
                location: location(),
            });
        }
    }

    issues
}

fn is_stock_ticker(ticker: &str) -> bool {
    match ticker.split_once(':') {
        Some((exchange, symbol)) => {
            !exchange.is_empty()
                && !symbol.is_empty()
                && exchange.chars().all(|c| c.is_ascii_uppercase())
                && symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.')
        }
        None => false,
    }
}
