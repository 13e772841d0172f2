use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Label, Node, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{arithmetic::parse_additive, core::ParseResult},
    },
};

/// Parses a boolean disjunction.
///
/// Grammar: `B := Bt ("or" Bt)*` (left-associative)
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A left-nested `or` tree or the plain conjunction.
pub(crate) fn parse_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_conjunction(tokens)?;

    while let Some((Token::Or, _)) = tokens.peek() {
        tokens.next();
        let right = parse_conjunction(tokens)?;
        left = Node::new(Label::Binary(BinaryOperator::Or), vec![left, right]);
    }

    Ok(left)
}

/// Parses a boolean conjunction.
///
/// Grammar: `Bt := Bs ("&" Bs)*` (left-associative)
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A left-nested `&` tree or the plain negation tier.
fn parse_conjunction<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_negation(tokens)?;

    while let Some((Token::Ampersand, _)) = tokens.peek() {
        tokens.next();
        let right = parse_negation(tokens)?;
        left = Node::new(Label::Binary(BinaryOperator::And), vec![left, right]);
    }

    Ok(left)
}

/// Parses a boolean negation.
///
/// Grammar: `Bs := "not" Bp | Bp`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `not` node or the plain comparison.
fn parse_negation<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, _)) = tokens.peek() {
        tokens.next();
        let operand = parse_comparison(tokens)?;

        return Ok(Node::new(Label::Unary(UnaryOperator::Not), vec![operand]));
    }

    parse_comparison(tokens)
}

/// Parses a comparison.
///
/// Grammar: `Bp := A (op A)?` where `op` is one of `gr`, `ge`, `ls`, `le`,
/// `eq`, `ne` (or their symbolic spellings). Comparisons are
/// non-associative: at most one operator is consumed at this tier.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A comparison node or the plain arithmetic expression.
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_additive(tokens)?;

    if let Some((token, _)) = tokens.peek()
       && let Some(op) = token_to_comparison(token)
    {
        tokens.next();
        let right = parse_additive(tokens)?;

        return Ok(Node::new(Label::Binary(op), vec![left, right]));
    }

    Ok(left)
}

/// Maps a token to its comparison operator, if it is one.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` for comparison tokens, otherwise `None`.
#[must_use]
pub const fn token_to_comparison(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Equal => Some(BinaryOperator::Equal),
        Token::NotEqual => Some(BinaryOperator::NotEqual),
        _ => None,
    }
}
