use unicode_normalization::UnicodeNormalization;

/// Tokens this short or shorter carry no signal ("de", "da", "e", ...)
pub const MAX_IGNORED_TOKEN_CHARS: usize = 2;

/// Text folding used by the ranker.
///
/// Implementations must be pure: the same input always yields the same
/// output on every platform.
pub trait TextNormalizer {
    fn normalize(&self, text: &str) -> String;

    fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .filter(|token| token.chars().count() > MAX_IGNORED_TOKEN_CHARS)
            .map(str::to_string)
            .collect()
    }
}

/// Lowercase, strip combining diacritics, turn everything that is not an
/// ASCII word character into a space, collapse whitespace.
///
/// "Pão de Queijo (assado)" => "pao de queijo assado"
#[derive(Debug, Default, Clone, Copy)]
pub struct DiacriticFolding;

impl TextNormalizer for DiacriticFolding {
    fn normalize(&self, text: &str) -> String {
        let folded: String = text
            .to_lowercase()
            .nfd()
            .filter(|c| !is_combining_diacritic(*c))
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' {
                    c
                } else {
                    ' '
                }
            })
            .collect();

        folded.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Combining Diacritical Marks block
fn is_combining_diacritic(c: char) -> bool {
    matches!(c, '\u{0300}'..='\u{036f}')
}
