/// Lower-cases `text` and replaces every character outside `a-z 0-9 + # . /` with a space.
///
/// Keeps tokens like `c++`, `c#`, `node.js` and `ci/cd` intact while turning all
/// other punctuation into word boundaries.
pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| if is_token_char(c) { c } else { ' ' })
        .collect()
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '#' | '.' | '/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_empty_string() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn test_lowercases_and_keeps_token_punctuation() {
        assert_eq!(normalize_text("C++ / C# Node.js CI/CD"), "c++ / c# node.js ci/cd");
    }

    #[test]
    fn test_each_disallowed_char_becomes_one_space() {
        assert_eq!(normalize_text("Python, SQL;\tAWS!"), "python  sql  aws ");
        assert_eq!(normalize_text("résumé"), "r sum ");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let inputs = [
            "Senior Backend Engineer — Python/Django, PostgreSQL & AWS (5+ yrs)",
            "ÆØÅ naïve façade: React.js + TypeScript #frontend",
            "",
        ];
        for input in inputs {
            let once = normalize_text(input);
            assert_eq!(normalize_text(&once), once);
        }
    }

    #[test]
    fn test_output_only_contains_allowed_characters() {
        let out = normalize_text("Ünïcödé ✓ tabs\tnew\nlines {braces} [x] 100% $cash İstanbul");
        assert!(out.chars().all(|c| c == ' ' || is_token_char(c)), "got {out:?}");
    }
}
