use newsfind_core::tokenizer::tokenize;

#[test]
fn it_lowercases_and_drops_short_fragments() {
    let words = tokenize("AI chips: U.S. Fabs RAMP up 3nm output!");
    assert_eq!(words, vec!["chips", "fabs", "ramp", "3nm", "output"]);
}

#[test]
fn it_emits_only_lowercase_alphanumerics() {
    let text = "Climate-bill passes (legislature), 2024 — «vote» #Policy_42";
    for w in tokenize(text) {
        assert!(w.len() >= 3);
        assert!(w.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()), "{w}");
    }
}

#[test]
fn it_is_idempotent() {
    let text = "City approves new transit policy; transit transit!";
    let once = tokenize(text);
    let twice = tokenize(&once.join(" "));
    assert_eq!(once, twice);
}
