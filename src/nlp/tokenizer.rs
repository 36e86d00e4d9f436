//! Regex tokenizer for Portuguese text.

use std::sync::LazyLock;

use regex::Regex;

/// Kind of a raw token as produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Number,
    /// Currency marker such as `r$` or `us$`.
    Currency,
    Punct,
    /// Non-punctuation symbol (`$`, `%`, emoji).
    Symbol,
    Space,
}

/// A token slice of the input with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
          (?P<space>\s+)
        | (?P<currency>\p{L}{1,3}\$)
        | (?P<number>\d+(?:[.,]\d+)*)
        | (?P<word>[\p{L}\p{M}\p{N}_]+(?:[-'’][\p{L}\p{M}\p{N}_]+)*)
        | (?P<other>.)
        ",
    )
    .expect("token regex is valid")
});

static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\p{P}+$").expect("punct regex is valid"));

/// Split text into tokens. Every byte of the input belongs to exactly one token.
pub fn tokenize(text: &str) -> Vec<RawToken<'_>> {
    TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let (m, kind) = if let Some(m) = caps.name("space") {
                (m, TokenKind::Space)
            } else if let Some(m) = caps.name("currency") {
                (m, TokenKind::Currency)
            } else if let Some(m) = caps.name("number") {
                (m, TokenKind::Number)
            } else if let Some(m) = caps.name("word") {
                (m, TokenKind::Word)
            } else {
                let m = caps.name("other")?;
                let kind = if PUNCT_RE.is_match(m.as_str()) {
                    TokenKind::Punct
                } else {
                    TokenKind::Symbol
                };
                (m, kind)
            };
            Some(RawToken {
                text: m.as_str(),
                kind,
            })
        })
        .collect()
}
