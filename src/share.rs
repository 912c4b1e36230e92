//! Sharing a finished wrap: a post-intent URL in the browser, or the plain
//! summary on the clipboard.

use thiserror::Error;

use crate::stats::WrappedStats;

const INTENT_URL: &str = "https://twitter.com/intent/tweet";
const HASHTAG: &str = "#GitHubWrapped";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("could not open a browser: {0}")]
    Browser(String),

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),
}

/// One paragraph describing the year, suitable for a post.
pub fn share_text(stats: &WrappedStats) -> String {
    let mut parts = vec![format!(
        "My {} on GitHub: {} contributions over {} active days",
        stats.year, stats.total_contributions, stats.active_days
    )];
    if stats.streaks.longest.length > 1 {
        parts.push(format!(
            "a {}-day longest streak",
            stats.streaks.longest.length
        ));
    }
    if let Some(language) = stats.top_language() {
        parts.push(format!("mostly {}", language.name));
    }
    format!(
        "{}. I'm {}. {}",
        parts.join(", "),
        stats.archetype.title().replacen("The ", "the ", 1),
        HASHTAG
    )
}

/// Post-intent URL with `text` prefilled.
pub fn share_url(text: &str) -> String {
    format!("{}?text={}", INTENT_URL, urlencoding::encode(text))
}

/// Open the post-intent URL in the default browser.
pub fn open_share(stats: &WrappedStats) -> Result<String, ShareError> {
    let url = share_url(&share_text(stats));
    webbrowser::open(&url).map_err(|e| ShareError::Browser(e.to_string()))?;
    tracing::info!("opened share url");
    Ok(url)
}

/// Put the share text on the system clipboard.
pub fn copy_summary(stats: &WrappedStats) -> Result<(), ShareError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ShareError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(share_text(stats))
        .map_err(|e| ShareError::Clipboard(e.to_string()))?;
    tracing::info!("copied summary to clipboard");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::fixtures::{empty_activity, sample_activity};
    use crate::models::DateWindow;
    use crate::stats::{compute_stats, DEFAULT_TOP_N};
    use chrono::{FixedOffset, NaiveDate};

    fn window() -> DateWindow {
        DateWindow::for_year(2024, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_share_text_mentions_headlines() {
        let stats = compute_stats(&sample_activity(window()), utc(), DEFAULT_TOP_N);
        let text = share_text(&stats);
        assert!(text.starts_with("My 2024 on GitHub: "));
        assert!(text.contains(&format!("{} contributions", stats.total_contributions)));
        assert!(text.contains("mostly Rust"));
        assert!(text.contains(&stats.archetype.title()[4..]));
        assert!(text.ends_with(HASHTAG));
    }

    #[test]
    fn test_share_text_for_quiet_year() {
        let stats = compute_stats(&empty_activity("ghost", window()), utc(), DEFAULT_TOP_N);
        let text = share_text(&stats);
        assert!(text.contains("0 contributions over 0 active days"));
        assert!(!text.contains("streak"));
        assert!(!text.contains("mostly"));
    }

    #[test]
    fn test_share_url_is_encoded() {
        let url = share_url("a b #c & d");
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?text=a%20b%20%23c%20%26%20d"
        );
    }
}
