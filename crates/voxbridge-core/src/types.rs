#[derive(Debug, Clone)]
pub struct Utterance {
    pub transcript: String,
    pub language_code: String,
    pub is_final: bool,
}

impl Utterance {
    /// True when the detected language is any English variant
    /// ("en-US", "en-IN", plain "en", ...).
    pub fn is_english(&self) -> bool {
        self.language_code.starts_with("en")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance(lang: &str) -> Utterance {
        Utterance {
            transcript: "hello".to_string(),
            language_code: lang.to_string(),
            is_final: true,
        }
    }

    #[test]
    fn test_is_english_for_en_us() {
        assert!(utterance("en-US").is_english());
    }

    #[test]
    fn test_is_english_for_bare_en() {
        assert!(utterance("en").is_english());
    }

    #[test]
    fn test_is_english_for_en_in() {
        assert!(utterance("en-IN").is_english());
    }

    #[test]
    fn test_not_english_for_es_es() {
        assert!(!utterance("es-ES").is_english());
    }

    #[test]
    fn test_not_english_for_empty_code() {
        assert!(!utterance("").is_english());
    }
}
