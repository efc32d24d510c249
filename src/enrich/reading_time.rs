/// Average adult silent-reading speed, as used by the common readtime
/// tooling.
const WORDS_PER_MINUTE: u32 = 265;

/// Estimated reading time in whole minutes, rounded up, never zero.
/// Empty or whitespace-only text yields `None` ("unknown"), not zero.
pub fn estimate(text: &str) -> Option<u32> {
    let words = text.split_whitespace().count() as u32;
    if words == 0 {
        return None;
    }
    Some(words.div_ceil(WORDS_PER_MINUTE).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn empty_text_is_unknown() {
        assert_eq!(estimate(""), None);
        assert_eq!(estimate("   \n\t "), None);
    }

    #[test]
    fn short_text_reads_in_one_minute() {
        assert_eq!(estimate("a few words"), Some(1));
    }

    #[test]
    fn rounds_up_to_whole_minutes() {
        let text = "word ".repeat(266);
        assert_eq!(estimate(&text), Some(2));
        let text = "word ".repeat(265);
        assert_eq!(estimate(&text), Some(1));
    }

    proptest! {
        #[test]
        fn nonempty_text_yields_positive_minutes(text in "[a-z ]{1,2000}") {
            match estimate(&text) {
                Some(minutes) => prop_assert!(minutes >= 1),
                None => prop_assert!(text.split_whitespace().count() == 0),
            }
        }
    }
}
