use std::iter::Peekable;

use crate::{
    ast::{Label, Node},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect_token, parse_identifier},
        },
    },
};

/// Parses a definition.
///
/// Grammar: `D := Da ("within" D)?`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `within` node or the plain simultaneous-definition tier.
pub(crate) fn parse_definition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let outer = parse_simultaneous(tokens)?;

    if let Some((Token::Within, _)) = tokens.peek() {
        tokens.next();
        let inner = parse_definition(tokens)?;

        return Ok(Node::new(Label::Within, vec![outer, inner]));
    }

    Ok(outer)
}

/// Parses simultaneous definitions.
///
/// Grammar: `Da := Dr ("and" Dr)*`
///
/// Two or more members produce an `and` node; a single member passes through
/// unchanged.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An `and` node or the single definition.
fn parse_simultaneous<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut members = vec![parse_recursive(tokens)?];

    while let Some((Token::And, _)) = tokens.peek() {
        tokens.next();
        members.push(parse_recursive(tokens)?);
    }

    if members.len() == 1 {
        return Ok(members.remove(0));
    }
    Ok(Node::new(Label::And, members))
}

/// Parses an optionally recursive definition.
///
/// Grammar: `Dr := "rec" Db | Db`
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `rec` node or the plain binding.
pub(crate) fn parse_recursive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Rec, _)) = tokens.peek() {
        tokens.next();
        let binding = parse_binding(tokens)?;

        return Ok(Node::new(Label::Rec, vec![binding]));
    }

    parse_binding(tokens)
}

/// Parses a single binding.
///
/// Grammar:
/// ```text
///     Db := IDENTIFIER Vb+ "=" E    (function form)
///         | Vl "=" E                (plain binding)
///         | "(" D ")"
/// ```
/// A leading identifier is ambiguous between the first two productions; one
/// token of lookahead decides: an identifier or `(` right after it means a
/// function form.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead (requires a `Clone` iterator).
///
/// # Returns
/// A `function_form` node, an `=` node, or the parenthesized definition.
fn parse_binding<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Identifier(_), _)) => {
            let mut lookahead = tokens.clone();
            lookahead.next();

            if let Some((Token::Identifier(_) | Token::LParen, _)) = lookahead.peek() {
                return parse_function_form(tokens);
            }

            let variables = parse_variable_list(tokens)?;
            expect_token(tokens, &Token::Equals, "'='")?;
            let value = parse_expression(tokens)?;

            Ok(Node::new(Label::Equal, vec![variables, value]))
        },

        Some((Token::LParen, _)) => {
            tokens.next();
            let definition = parse_definition(tokens)?;
            expect_token(tokens, &Token::RParen, "')'")?;

            Ok(definition)
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a function form.
///
/// Grammar: `IDENTIFIER Vb+ "=" E`
///
/// The children of the resulting `function_form` node are the function name,
/// each parameter in order, and finally the body.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the function name.
///
/// # Returns
/// A `function_form` node.
fn parse_function_form<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let name = parse_identifier(tokens)?;
    let mut children = vec![Node::leaf(Label::Identifier(name))];

    children.push(parse_binder(tokens)?);
    while let Some((Token::Identifier(_) | Token::LParen, _)) = tokens.peek() {
        children.push(parse_binder(tokens)?);
    }

    expect_token(tokens, &Token::Equals, "'='")?;
    children.push(parse_expression(tokens)?);

    Ok(Node::new(Label::FunctionForm, children))
}

/// Parses a single binder.
///
/// Grammar:
/// ```text
///     Vb := IDENTIFIER
///         | "(" ")"
///         | "(" Vl ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// An identifier leaf, a `()` leaf, or a variable list.
pub(crate) fn parse_binder<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(Node::leaf(Label::Identifier(name.clone()))),

        Some((Token::LParen, _)) => {
            if let Some((Token::RParen, _)) = tokens.peek() {
                tokens.next();

                return Ok(Node::leaf(Label::EmptyParams));
            }

            let variables = parse_variable_list(tokens)?;
            expect_token(tokens, &Token::RParen, "')'")?;

            Ok(variables)
        },

        Some((tok, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                              line:  *line, })
        },

        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses a variable list.
///
/// Grammar: `Vl := IDENTIFIER ("," IDENTIFIER)*`
///
/// Two or more names produce a `,` node over identifier leaves; a single
/// name yields the identifier leaf itself.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A `,` node or an identifier leaf.
fn parse_variable_list<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_identifier(tokens)?;
    let mut names = vec![Node::leaf(Label::Identifier(first))];

    while let Some((Token::Comma, _)) = tokens.peek() {
        tokens.next();
        let name = parse_identifier(tokens)?;
        names.push(Node::leaf(Label::Identifier(name)));
    }

    if names.len() == 1 {
        return Ok(names.remove(0));
    }
    Ok(Node::new(Label::Comma, names))
}
