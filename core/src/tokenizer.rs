use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SEPARATOR: Regex = Regex::new(r"[^a-z0-9]+").expect("valid regex");
}

/// Shortest fragment kept as a term.
pub const MIN_TERM_LEN: usize = 3;

/// Tokenize text into lowercase ASCII alphanumeric terms of at least three characters.
///
/// Order and duplicates are preserved; callers that need a set deduplicate themselves.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATOR
        .split(&lowered)
        .filter(|frag| frag.len() >= MIN_TERM_LEN)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("AI chips reshape supply-chains!");
        assert_eq!(t, vec!["chips", "reshape", "supply", "chains"]);
    }

    #[test]
    fn keeps_duplicates_and_digits() {
        let t = tokenize("Covid19 covid19, the 5G rollout");
        assert_eq!(t, vec!["covid19", "covid19", "the", "rollout"]);
    }

    #[test]
    fn non_ascii_letters_split() {
        // lowercased "é" is outside [a-z0-9]
        let t = tokenize("Café policy");
        assert_eq!(t, vec!["caf", "policy"]);
    }
}
