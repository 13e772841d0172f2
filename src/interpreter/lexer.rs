use logos::Logos;

use crate::error::LexError;

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// `let`
    #[token("let")]
    Let,
    /// `in`
    #[token("in")]
    In,
    /// `fn`
    #[token("fn")]
    Fn,
    /// `where`
    #[token("where")]
    Where,
    /// `aug`
    #[token("aug")]
    Aug,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `and`
    #[token("and")]
    And,
    /// `rec`
    #[token("rec")]
    Rec,
    /// `within`
    #[token("within")]
    Within,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `nil`
    #[token("nil")]
    Nil,
    /// `dummy`
    #[token("dummy")]
    Dummy,
    /// `gr` or `>`
    #[token("gr")]
    #[token(">")]
    Greater,
    /// `ge` or `>=`
    #[token("ge")]
    #[token(">=")]
    GreaterEqual,
    /// `ls` or `<`
    #[token("ls")]
    #[token("<")]
    Less,
    /// `le` or `<=`
    #[token("le")]
    #[token("<=")]
    LessEqual,
    /// `eq`
    #[token("eq")]
    Equal,
    /// `ne`
    #[token("ne")]
    NotEqual,
    /// Identifier tokens; variable or function names such as `x` or `Print`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens, delimited by `"` or `'`, with the escape
    /// sequences `\t`, `\n`, `\\`, `\"` and `\'` already decoded.
    #[regex(r#""([^"\\\n]|\\.)*""#, unescape_string)]
    #[regex(r"'([^'\\\n]|\\.)*'", unescape_string)]
    StringLit(String),
    /// `->`
    #[token("->")]
    Arrow,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `**`
    #[token("**")]
    Power,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `&`
    #[token("&")]
    Ampersand,
    /// `|`
    #[token("|")]
    Bar,
    /// `@`
    #[token("@")]
    At,
    /// `=`
    #[token("=")]
    Equals,
    /// `.`
    #[token(".")]
    Dot,
    /// `,`
    #[token(",")]
    Comma,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `;`
    #[token(";")]
    Semi,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip)]
    Comment,
    /// Newlines bump the line counter and are otherwise discarded.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses an integer literal from the current token slice.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(i64)`: The parsed integer value if successful.
/// - `None`: If the literal does not fit into an `i64`.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}

/// Decodes a string literal from the current token slice.
///
/// Strips the delimiters and replaces the escape sequences `\t`, `\n`, `\\`,
/// `\"` and `\'` with the characters they denote.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Some(String)`: The decoded contents of the literal.
/// - `None`: If the literal contains an unknown escape sequence.
fn unescape_string(lex: &logos::Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];

    let mut decoded = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            decoded.push(c);
            continue;
        }
        match chars.next()? {
            't' => decoded.push('\t'),
            'n' => decoded.push('\n'),
            '\\' => decoded.push('\\'),
            '"' => decoded.push('"'),
            '\'' => decoded.push('\''),
            _ => return None,
        }
    }
    Some(decoded)
}

/// Tokenizes a complete source string.
///
/// The scan either consumes the whole input, yielding every token paired with
/// the line it starts on, or stops at the first lexical error.
///
/// # Parameters
/// - `source`: The complete source text.
///
/// # Returns
/// A vector of `(Token, line)` pairs, in source order.
///
/// # Errors
/// Returns a [`LexError`] describing the first unexpected character sequence,
/// unterminated string literal, or oversized integer literal.
///
/// # Example
/// ```
/// use rpal::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("let x = 5").unwrap();
/// assert_eq!(tokens.len(), 4);
/// assert_eq!(tokens[0].0, Token::Let);
///
/// assert!(tokenize("let x = 'oops").is_err());
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            return Err(classify_error(lexer.slice(), lexer.extras.line));
        }
    }

    Ok(tokens)
}

/// Turns a failed lexer slice into the most specific [`LexError`].
///
/// An opening quote with no matching closer means the string was never
/// terminated; an all-digit slice means the integer callback rejected an
/// oversized literal; everything else (including a string with an unknown
/// escape sequence) is an unexpected character sequence.
fn classify_error(slice: &str, line: usize) -> LexError {
    let token = slice.to_string();

    for delimiter in ['"', '\''] {
        if token.starts_with(delimiter) {
            let terminated = token.len() >= 2 && token.ends_with(delimiter);
            if !terminated {
                return LexError::UnterminatedString { line };
            }
        }
    }

    if !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()) {
        return LexError::IntegerTooLarge { token, line };
    }

    LexError::UnexpectedToken { token, line }
}
