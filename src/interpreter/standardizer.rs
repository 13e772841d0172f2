use crate::{
    ast::{Label, Node},
    error::StandardizeError,
};

/// Rewrites an abstract syntax tree into the standardized tree.
///
/// The transformation walks the tree bottom-up so every rewrite can assume
/// its children are already standardized. After it completes, the only
/// binding construct left is lambda application: `let`, `where`, `within`,
/// `and`, `rec`, function forms, infix `@` and `=` bindings have all been
/// re-expressed through `gamma` and `lambda` nodes.
///
/// # Parameters
/// - `node`: The root of the tree to rewrite.
///
/// # Returns
/// The standardized tree.
///
/// # Errors
/// Returns a [`StandardizeError`] if a node does not have the structure its
/// label requires. A parser-produced tree never triggers this.
///
/// # Example
/// ```
/// use rpal::interpreter::{
///     lexer::tokenize,
///     parser::core::parse,
///     standardizer::standardize,
/// };
///
/// let tokens = tokenize("let x = 5 in x").unwrap();
/// let ast = parse(&mut tokens.iter().peekable()).unwrap();
/// let st = standardize(ast).unwrap();
///
/// assert_eq!(st.to_string(), "gamma\n.lambda\n..<ID:x>\n..<ID:x>\n.<INT:5>\n");
/// ```
pub fn standardize(node: Node) -> Result<Node, StandardizeError> {
    let children = node.children
                       .into_iter()
                       .map(standardize)
                       .collect::<Result<Vec<_>, _>>()?;

    standardize_node(Node { label: node.label,
                            children })
}

/// Applies the rewrite rule for a single node whose children are already
/// standardized.
fn standardize_node(node: Node) -> Result<Node, StandardizeError> {
    match node.label {
        Label::Let => standardize_let(node),
        Label::Where => standardize_where(node),
        Label::FunctionForm => standardize_function_form(node),
        Label::Lambda => standardize_lambda(node),
        Label::Within => standardize_within(node),
        Label::At => standardize_at(node),
        Label::And => standardize_simultaneous(node),
        Label::Rec => standardize_rec(node),
        _ => Ok(node),
    }
}

/// Rewrites `let X = E in P` into `(fn X. P) E`.
///
/// ```text
///       let                 gamma
///       / \                 /   \
///      =   P    =>      lambda   E
///     / \               /   \
///    X   E             X     P
/// ```
fn standardize_let(node: Node) -> Result<Node, StandardizeError> {
    let Ok([binding, body]) = <[Node; 2]>::try_from(node.children) else {
        return Err(malformed("let", "expected a definition and a body"));
    };

    let (name, value) = split_binding(binding, "let")?;
    let lambda = Node::new(Label::Lambda, vec![name, body]);

    Ok(Node::new(Label::Gamma, vec![lambda, value]))
}

/// Rewrites `P where X = E` into `(fn X. P) E`.
///
/// The shape is the mirror image of `let`: the body comes first in the
/// source, the definition second.
fn standardize_where(node: Node) -> Result<Node, StandardizeError> {
    let Ok([body, binding]) = <[Node; 2]>::try_from(node.children) else {
        return Err(malformed("where", "expected a body and a definition"));
    };

    let (name, value) = split_binding(binding, "where")?;
    let lambda = Node::new(Label::Lambda, vec![name, body]);

    Ok(Node::new(Label::Gamma, vec![lambda, value]))
}

/// Rewrites `f V1 ... Vn = E` into `f = fn V1. fn V2. ... fn Vn. E`.
///
/// The resulting `=` node is consumed by the enclosing `let`, `where` or
/// `rec` rewrite.
fn standardize_function_form(node: Node) -> Result<Node, StandardizeError> {
    if node.children.len() < 3 {
        return Err(malformed("function_form", "expected a name, parameters and a body"));
    }

    let mut children = node.children;
    let Some(body) = children.pop() else {
        return Err(malformed("function_form", "missing body"));
    };
    let name = children.remove(0);

    let lambda = children.into_iter()
                         .rev()
                         .fold(body, |inner, parameter| {
                             Node::new(Label::Lambda, vec![parameter, inner])
                         });

    Ok(Node::new(Label::Equal, vec![name, lambda]))
}

/// Rewrites `fn V1 V2 ... Vn. E` into nested single-parameter lambdas.
///
/// A lambda that already has a single binder is left alone; in particular a
/// `,`-tuple binder stays a single lambda and is destructured by the machine
/// when applied.
fn standardize_lambda(node: Node) -> Result<Node, StandardizeError> {
    if node.children.len() < 2 {
        return Err(malformed("lambda", "expected at least one parameter and a body"));
    }
    if node.children.len() == 2 {
        return Ok(node);
    }

    let mut children = node.children;
    let Some(body) = children.pop() else {
        return Err(malformed("lambda", "missing body"));
    };

    Ok(children.into_iter()
               .rev()
               .fold(body, |inner, parameter| {
                   Node::new(Label::Lambda, vec![parameter, inner])
               }))
}

/// Rewrites `X1 = E1 within X2 = E2` into `X2 = (fn X1. E2) E1`.
///
/// ```text
///       within                      =
///      /      \                    / \
///     =        =      =>          X2  gamma
///    / \      / \                    /     \
///   X1  E1   X2  E2               lambda    E1
///                                 /    \
///                                X1    E2
/// ```
fn standardize_within(node: Node) -> Result<Node, StandardizeError> {
    let Ok([outer, inner]) = <[Node; 2]>::try_from(node.children) else {
        return Err(malformed("within", "expected two definitions"));
    };

    let (outer_name, outer_value) = split_binding(outer, "within")?;
    let (inner_name, inner_value) = split_binding(inner, "within")?;

    let lambda = Node::new(Label::Lambda, vec![outer_name, inner_value]);
    let gamma = Node::new(Label::Gamma, vec![lambda, outer_value]);

    Ok(Node::new(Label::Equal, vec![inner_name, gamma]))
}

/// Rewrites `E1 @ N E2` into `(N E1) E2`.
fn standardize_at(node: Node) -> Result<Node, StandardizeError> {
    let Ok([left, name, right]) = <[Node; 3]>::try_from(node.children) else {
        return Err(malformed("@", "expected two operands and a function name"));
    };

    let inner = Node::new(Label::Gamma, vec![name, left]);

    Ok(Node::new(Label::Gamma, vec![inner, right]))
}

/// Rewrites `X1 = E1 and ... and Xn = En` into `(X1, ..., Xn) = (E1, ..., En)`.
///
/// ```text
///       and                   =
///        |                   / \
///       =++        =>       ,   tau
///       / \                 |    |
///      X   E               X++  E++
/// ```
fn standardize_simultaneous(node: Node) -> Result<Node, StandardizeError> {
    if node.children.len() < 2 {
        return Err(malformed("and", "expected at least two definitions"));
    }

    let mut names = Vec::with_capacity(node.children.len());
    let mut values = Vec::with_capacity(node.children.len());
    for binding in node.children {
        let (name, value) = split_binding(binding, "and")?;
        names.push(name);
        values.push(value);
    }

    let name_tuple = Node::new(Label::Comma, names);
    let value_tuple = Node::new(Label::Tau, values);

    Ok(Node::new(Label::Equal, vec![name_tuple, value_tuple]))
}

/// Rewrites `rec X = E` into `X = Y* (fn X. E)`.
///
/// The `Y*` leaf is the fixed-point combinator the machine recognizes; the
/// bound name reappears as the lambda's parameter so the body's recursive
/// references resolve to the eta-closure built at run time.
fn standardize_rec(node: Node) -> Result<Node, StandardizeError> {
    let Ok([binding]) = <[Node; 1]>::try_from(node.children) else {
        return Err(malformed("rec", "expected a single definition"));
    };

    let (name, value) = split_binding(binding, "rec")?;
    let Label::Identifier(_) = name.label else {
        return Err(malformed("rec", "recursive binding must bind a single identifier"));
    };

    let lambda = Node::new(Label::Lambda, vec![name.clone(), value]);
    let gamma = Node::new(Label::Gamma, vec![Node::leaf(Label::YStar), lambda]);

    Ok(Node::new(Label::Equal, vec![name, gamma]))
}

/// Destructures an `=` node into its bound pattern and value.
fn split_binding(binding: Node, context: &str) -> Result<(Node, Node), StandardizeError> {
    if binding.label != Label::Equal {
        return Err(malformed(context,
                             &format!("expected a binding, found '{}'", binding.label)));
    }

    let Ok([name, value]) = <[Node; 2]>::try_from(binding.children) else {
        return Err(malformed(context, "binding must have a name and a value"));
    };

    Ok((name, value))
}

fn malformed(label: &str, details: &str) -> StandardizeError {
    StandardizeError::MalformedNode { label:   label.to_string(),
                                      details: details.to_string(), }
}
