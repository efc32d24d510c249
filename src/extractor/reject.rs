/// Heuristics for pages that fetched fine but carry no article: consent
/// walls, error pages, navigation shells.
const MIN_CONTENT_LENGTH: usize = 250;
const MIN_WORD_COUNT: usize = 50;
const MAX_WALL_RATIO: f64 = 0.3;

const WALL_KEYWORDS: [&str; 12] = [
    "cookie",
    "consent",
    "gdpr",
    "privacy policy",
    "subscribe",
    "newsletter",
    "sign up",
    "log in",
    "enable javascript",
    "404",
    "not found",
    "access denied",
];

pub fn should_reject(title: &str, text: &str) -> bool {
    if text.chars().count() < MIN_CONTENT_LENGTH {
        return true;
    }

    let word_count = text.split_whitespace().count();
    if title.trim().is_empty() && word_count < MIN_WORD_COUNT {
        return true;
    }

    wall_ratio(text, word_count) > MAX_WALL_RATIO
}

fn wall_ratio(text: &str, total_words: usize) -> f64 {
    if total_words == 0 {
        return 1.0;
    }
    let text_lower = text.to_lowercase();
    let hits: usize = WALL_KEYWORDS
        .iter()
        .map(|keyword| text_lower.matches(keyword).count())
        .sum();
    hits as f64 / total_words as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_content() {
        assert!(should_reject("Title", "too short"));
        assert!(!should_reject(
            "Title",
            &"substantial article content here ".repeat(40)
        ));
    }

    #[test]
    fn rejects_untitled_thin_pages() {
        assert!(should_reject("", &"only a handful of words ".repeat(3)));
    }

    #[test]
    fn rejects_consent_walls() {
        let wall = "cookie consent privacy policy gdpr subscribe newsletter ".repeat(30);
        assert!(should_reject("Some Title", &wall));
    }
}
