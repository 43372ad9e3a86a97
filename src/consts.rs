//! Project-wide constants.

use std::path::PathBuf;

pub const HOMEPAGE: &str = env!("CARGO_PKG_HOMEPAGE");
pub const REPO: &str = env!("CARGO_PKG_REPOSITORY");

/// Default generation service address when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Path of the generation endpoint, relative to the base address.
pub const GENERATE_PATH: &str = "/generate_video";

/// The single user-facing failure message. The service's actual error
/// goes to stderr; the user always sees this.
pub const GENERATION_FAILED_MSG: &str = "Error generating video. Please try again.";

/// How many past generations `/history` shows by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Default database path: `~/.reel/reel.db`.
/// Single DB for config and generation history.
pub fn default_db_path() -> PathBuf {
    dirs::home_dir()
        .expect("cannot determine home directory")
        .join(".reel")
        .join("reel.db")
}

/// Shorten a topic for one-line display (e.g. history listings).
pub fn elide(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consts_are_non_empty() {
        assert!(!HOMEPAGE.is_empty());
        assert!(!REPO.is_empty());
        assert!(!DEFAULT_BASE_URL.is_empty());
        assert!(!GENERATION_FAILED_MSG.is_empty());
    }

    #[test]
    fn default_base_url_has_no_trailing_slash() {
        assert!(!DEFAULT_BASE_URL.ends_with('/'));
    }

    #[test]
    fn generate_path_is_rooted() {
        assert!(GENERATE_PATH.starts_with('/'));
    }

    #[test]
    fn elide_short_string_unchanged() {
        assert_eq!(elide("Photosynthesis", 40), "Photosynthesis");
    }

    #[test]
    fn elide_exact_length_unchanged() {
        assert_eq!(elide("abcde", 5), "abcde");
    }

    #[test]
    fn elide_long_string_truncates() {
        let out = elide("a very long topic about quantum tunneling", 12);
        assert!(out.chars().count() <= 12);
        assert!(out.ends_with('…'));
    }

    #[test]
    fn elide_counts_chars_not_bytes() {
        // Multi-byte chars must not be split
        let out = elide("ααααααααα", 5);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= 5);
    }
}
