use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Label, Node, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_token, parse_identifier},
        },
    },
};

/// Parses addition and subtraction expressions.
///
/// Handles the left-associative binary operators `+` and `-`, as well as a
/// single leading sign: a leading `+` is dropped, a leading `-` produces a
/// `neg` node.
///
/// Grammar: `A := ("+" | "-")? At (("+" | "-") At)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree over multiplicative-level nodes.
pub(crate) fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = match tokens.peek() {
        Some((Token::Plus, _)) => {
            tokens.next();
            parse_multiplicative(tokens)?
        },
        Some((Token::Minus, _)) => {
            tokens.next();
            let operand = parse_multiplicative(tokens)?;
            Node::new(Label::Unary(UnaryOperator::Neg), vec![operand])
        },
        _ => parse_multiplicative(tokens)?,
    };

    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_arithmetic(token)
           && matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
        {
            tokens.next();
            let right = parse_multiplicative(tokens)?;
            left = Node::new(Label::Binary(op), vec![left, right]);
            continue;
        }
        break;
    }

    Ok(left)
}

/// Maps a token to its arithmetic operator, if it is one.
///
/// # Parameters
/// - `token`: Token to convert.
///
/// # Returns
/// `Some(BinaryOperator)` for `+`, `-`, `*` and `/`, otherwise `None`.
#[must_use]
pub const fn token_to_arithmetic(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}

/// Parses multiplication-level expressions.
///
/// Handles the left-associative operators `*` and `/`.
///
/// Grammar: `At := Af (("*" | "/") Af)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// A binary expression tree combining exponent-level nodes.
fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_exponent(tokens)?;

    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_arithmetic(token)
           && matches!(op, BinaryOperator::Mul | BinaryOperator::Div)
        {
            tokens.next();
            let right = parse_exponent(tokens)?;
            left = Node::new(Label::Binary(op), vec![left, right]);
            continue;
        }
        break;
    }

    Ok(left)
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ** b ** c` parses as
/// `a ** (b ** c)`.
///
/// Grammar: `Af := Ap ("**" Af)?`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let left = parse_infix_application(tokens)?;

    if let Some((Token::Power, _)) = tokens.peek() {
        tokens.next();
        let right = parse_exponent(tokens)?;

        return Ok(Node::new(Label::Binary(BinaryOperator::Pow), vec![left, right]));
    }

    Ok(left)
}

/// Parses infix applications with `@`.
///
/// `E1 @ f E2` applies the named function `f` to `E1` and `E2`, left to
/// right; chains associate to the left.
///
/// Grammar: `Ap := R ("@" IDENTIFIER R)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `@` node with three children, or the plain application tier.
fn parse_infix_application<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_application(tokens)?;

    while let Some((Token::At, _)) = tokens.peek() {
        tokens.next();
        let name = parse_identifier(tokens)?;
        let right = parse_application(tokens)?;

        left = Node::new(Label::At,
                         vec![left, Node::leaf(Label::Identifier(name)), right]);
    }

    Ok(left)
}

/// Parses function application by juxtaposition.
///
/// Application is left-associative and is signalled purely by adjacency: any
/// token that can begin an operand continues the chain.
///
/// Grammar: `R := Rn (Rn)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A left-nested `gamma` tree or the plain operand.
fn parse_application<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut rator = parse_operand(tokens)?;

    while let Some((Token::LParen
                    | Token::Identifier(_)
                    | Token::Integer(_)
                    | Token::StringLit(_)
                    | Token::True
                    | Token::False
                    | Token::Nil
                    | Token::Dummy,
                    _)) = tokens.peek()
    {
        let rand = parse_operand(tokens)?;
        rator = Node::new(Label::Gamma, vec![rator, rand]);
    }

    Ok(rator)
}

/// Parses an atomic operand.
///
/// Grammar:
/// ```text
///     Rn := IDENTIFIER | INTEGER | STRING
///         | "true" | "false" | "nil" | "dummy"
///         | "(" E ")"
/// ```
/// # Parameters
/// - `tokens`: Token stream positioned at the start of an operand.
///
/// # Returns
/// A leaf node, or the parenthesized expression.
fn parse_operand<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::LParen, _)) => {
            let inner = parse_expression(tokens)?;
            expect_token(tokens, &Token::RParen, "')'")?;
            Ok(inner)
        },
        Some((Token::Identifier(name), _)) => Ok(Node::leaf(Label::Identifier(name.clone()))),
        Some((Token::Integer(value), _)) => Ok(Node::leaf(Label::Integer(*value))),
        Some((Token::StringLit(value), _)) => Ok(Node::leaf(Label::StringLit(value.clone()))),
        Some((Token::True, _)) => Ok(Node::leaf(Label::True)),
        Some((Token::False, _)) => Ok(Node::leaf(Label::False)),
        Some((Token::Nil, _)) => Ok(Node::leaf(Label::Nil)),
        Some((Token::Dummy, _)) => Ok(Node::leaf(Label::Dummy)),
        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}
