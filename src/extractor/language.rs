use whatlang::{Lang, detect};

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// Best-effort ISO 639-1 language code for the extracted text. Short or
/// ambiguous input yields `None`.
pub fn detect_language(text: &str) -> Option<String> {
    if text.trim().len() < MIN_TEXT_LENGTH {
        return None;
    }

    let info = detect(text)?;
    if info.confidence() < MIN_CONFIDENCE {
        return None;
    }

    Some(iso_639_1(info.lang()))
}

fn iso_639_1(lang: Lang) -> String {
    let code = match lang {
        Lang::Eng => "en",
        Lang::Kor => "ko",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Jpn => "ja",
        Lang::Cmn => "zh",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Ita => "it",
        Lang::Nld => "nl",
        // Fall back to the three-letter code whatlang knows for the rest
        other => return other.code().to_string(),
    };
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_english() {
        let text = "This is a test of the language detection layer. It should comfortably \
                    recognize plain English prose of this length.";
        assert_eq!(detect_language(text), Some("en".to_string()));
    }

    #[test]
    fn detects_korean() {
        let text = "이 문장은 한국어로 작성된 기사 본문의 예시입니다. 언어 감지가 \
                    한국어를 올바르게 인식하는지 확인합니다.";
        assert_eq!(detect_language(text), Some("ko".to_string()));
    }

    #[test]
    fn short_text_yields_none() {
        assert_eq!(detect_language("short"), None);
    }
}
