pub const DEFAULT_LANGUAGE: &str = "turkish";

/// Fixed decoding options passed to speech-to-text on every request.
/// Decoding is always greedy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodingOptions {
    pub language: String,
    pub timestamps: bool,
}

impl DecodingOptions {
    pub fn for_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            timestamps: false,
        }
    }

    /// Whisper language code for the configured language name.
    ///
    /// Accepts either a two letter code or an English language name.
    pub fn language_code(&self) -> &str {
        match self.language.to_lowercase().as_str() {
            "turkish" | "tr" => "tr",
            "english" | "en" => "en",
            "german" | "de" => "de",
            "french" | "fr" => "fr",
            "spanish" | "es" => "es",
            "arabic" | "ar" => "ar",
            "russian" | "ru" => "ru",
            "kurdish" | "ku" => "ku",
            _ => self.language.as_str(),
        }
    }
}

impl Default for DecodingOptions {
    fn default() -> Self {
        Self::for_language(DEFAULT_LANGUAGE)
    }
}
