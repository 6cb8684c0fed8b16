/// Shortest token, in characters, that takes part in term weighting.
pub const MIN_TOKEN_CHARS: usize = 2;

/// Lower-case text, then split it into runs of word characters (alphanumeric
/// or `_`). Single-character runs are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase();
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for ch in normalized.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            current.push(ch);
            current_chars += 1;
        } else {
            flush(&mut tokens, &mut current, &mut current_chars);
        }
    }
    flush(&mut tokens, &mut current, &mut current_chars);

    tokens
}

fn flush(tokens: &mut Vec<String>, current: &mut String, current_chars: &mut usize) {
    if *current_chars >= MIN_TOKEN_CHARS {
        tokens.push(std::mem::take(current));
    } else {
        current.clear();
    }
    *current_chars = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_whitespace() {
        assert_eq!(
            tokenize("Computer-Science, Boston!"),
            vec!["computer", "science", "boston"]
        );
    }

    #[test]
    fn drops_single_characters() {
        assert_eq!(tokenize("a b cd e"), vec!["cd"]);
    }

    #[test]
    fn keeps_digits_underscores_and_unicode() {
        assert_eq!(
            tokenize("MIT_2024 Zürich São"),
            vec!["mit_2024", "zürich", "são"]
        );
    }

    #[test]
    fn splits_the_lowered_text() {
        // 'İ' lowers to two characters.
        for text in ["İstanbul", "İ", "KİLİS Üni"] {
            let lowered = text.to_lowercase();
            assert_eq!(tokenize(text), tokenize(&lowered));
            assert!(tokenize(text).iter().all(|t| lowered.contains(t.as_str())));
        }
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize("  ...  ").is_empty());
    }
}
