//! Tokenizer for dice notation.

use std::fmt;
use std::ops::Range;

use logos::Logos;

use super::DiceTerm;

/// Token type for dice formulas.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A dice term such as `2d6` or `2d20kh1`.
    Dice(DiceTerm),
    /// A non-negative integer literal.
    Number(i64),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// A bracketed flavor annotation such as `[fire]`, without the brackets.
    Flavor(String),
    /// A bare word, typically a damage label after a dice term.
    Word(String),
    /// An unresolved roll-data reference such as `@strength.mod`, without the `@`.
    Reference(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Dice(term) => write!(f, "{term}"),
            Token::Number(n) => write!(f, "{n}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Flavor(s) => write!(f, "[{s}]"),
            Token::Word(w) => write!(f, "{w}"),
            Token::Reference(r) => write!(f, "@{r}"),
        }
    }
}

/// Internal logos token, converted to an owned [`Token`] after lexing.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r"[0-9]*[dD][0-9]+([kK][hHlL][0-9]+)?")]
    Dice,

    #[regex(r"[0-9]+")]
    Number,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[regex(r"\[[^\]]*\]")]
    Flavor,

    #[regex(r"[a-zA-Z_][a-zA-Z_]*")]
    Word,

    #[regex(r"@[a-zA-Z_][a-zA-Z0-9_.]*")]
    Reference,
}

/// A lexer error with source location.
#[derive(Debug, Clone)]
pub struct LexError {
    /// Byte range of the erroneous input in the source.
    pub span: Range<usize>,
    /// Human-readable description of the lexer error.
    pub message: String,
}

/// Lex a formula into a sequence of `(Token, Span)` pairs.
///
/// Returns the token stream and any lexer errors. Lexing continues past
/// errors so every problem in the formula is reported at once.
pub fn lex(source: &str) -> (Vec<(Token, Range<usize>)>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = match result {
            Ok(RawToken::Dice) => match DiceTerm::parse(slice) {
                Some(term) => Token::Dice(term),
                None => {
                    errors.push(LexError {
                        span,
                        message: format!("invalid dice term: {slice}"),
                    });
                    continue;
                }
            },
            Ok(RawToken::Number) => match slice.parse::<i64>() {
                Ok(n) => Token::Number(n),
                Err(_) => {
                    errors.push(LexError {
                        span,
                        message: format!("number out of range: {slice}"),
                    });
                    continue;
                }
            },
            Ok(RawToken::Plus) => Token::Plus,
            Ok(RawToken::Minus) => Token::Minus,
            Ok(RawToken::Star) => Token::Star,
            Ok(RawToken::LParen) => Token::LParen,
            Ok(RawToken::RParen) => Token::RParen,
            Ok(RawToken::Flavor) => Token::Flavor(slice[1..slice.len() - 1].trim().to_string()),
            Ok(RawToken::Word) => Token::Word(slice.to_string()),
            Ok(RawToken::Reference) => Token::Reference(slice[1..].to_string()),
            Err(()) => {
                errors.push(LexError {
                    span,
                    message: format!("unexpected character: {slice:?}"),
                });
                continue;
            }
        };
        tokens.push((token, span));
    }

    (tokens, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<String> {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "errors: {errors:?}");
        tokens.iter().map(|(t, _)| t.to_string()).collect()
    }

    #[test]
    fn lex_check_formula() {
        assert_eq!(kinds("2d20kh1+3"), vec!["2d20kh1", "+", "3"]);
        assert_eq!(kinds("1d20 - 1"), vec!["1d20", "-", "1"]);
    }

    #[test]
    fn lex_critical_group() {
        assert_eq!(
            kinds("(2d6 + 1d4 + 3) * 2"),
            vec!["(", "2d6", "+", "1d4", "+", "3", ")", "*", "2"]
        );
    }

    #[test]
    fn lex_labels_and_flavor() {
        let (tokens, _) = lex("2d6 slashing + d4[fire]");
        assert_eq!(tokens[1].0, Token::Word("slashing".to_string()));
        assert_eq!(tokens[3].0, Token::Dice(DiceTerm::parse("d4").unwrap()));
        assert_eq!(tokens[4].0, Token::Flavor("fire".to_string()));
    }

    #[test]
    fn lex_reference() {
        let (tokens, _) = lex("1d6 + @strength.mod");
        assert_eq!(tokens[2].0, Token::Reference("strength.mod".to_string()));
    }

    #[test]
    fn lex_reports_bad_characters() {
        let (tokens, errors) = lex("1d6 # 2");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, 4..5);
    }

    #[test]
    fn spans_cover_source() {
        let (tokens, _) = lex("10d10 + 5");
        assert_eq!(tokens[0].1, 0..5);
        assert_eq!(tokens[2].1, 8..9);
    }
}
