use std::collections::HashSet;

use rpal::{
    ast::{Label, Node},
    get_ast, get_result_with_trace, get_st,
    interpreter::lexer::tokenize,
};

#[test]
fn ast_dump_uses_dot_notation() {
    let ast = get_ast("let x = 5 in x").unwrap();
    assert_eq!(ast.to_string(), "let\n.=\n..<ID:x>\n..<INT:5>\n.<ID:x>\n");

    let ast = get_ast("fn x y. x").unwrap();
    assert_eq!(ast.to_string(), "lambda\n.<ID:x>\n.<ID:y>\n.<ID:x>\n");

    let ast = get_ast("1, 2, 3").unwrap();
    assert_eq!(ast.to_string(), "tau\n.<INT:1>\n.<INT:2>\n.<INT:3>\n");

    let ast = get_ast("1 ls 2 -> 'a' | 'b'").unwrap();
    assert_eq!(ast.to_string(),
               "->\n.ls\n..<INT:1>\n..<INT:2>\n.<STR:'a'>\n.<STR:'b'>\n");
}

#[test]
fn function_forms_keep_their_surface_shape_in_the_ast() {
    let ast = get_ast("let Inc x = x + 1 in Inc 5").unwrap();
    assert_eq!(ast.to_string(),
               "let\n\
                .function_form\n\
                ..<ID:Inc>\n\
                ..<ID:x>\n\
                ..+\n\
                ...<ID:x>\n\
                ...<INT:1>\n\
                .gamma\n\
                ..<ID:Inc>\n\
                ..<INT:5>\n");
}

#[test]
fn st_dump_shows_only_lambda_bindings() {
    let st = get_st("let x = 5 in x").unwrap();
    assert_eq!(st.to_string(), "gamma\n.lambda\n..<ID:x>\n..<ID:x>\n.<INT:5>\n");

    let st = get_st("rec f n = n in f").unwrap();
    assert_eq!(st.to_string(),
               "gamma\n\
                .lambda\n\
                ..<ID:f>\n\
                ..<ID:f>\n\
                .gamma\n\
                ..Y*\n\
                ..lambda\n\
                ...<ID:f>\n\
                ...lambda\n\
                ....<ID:n>\n\
                ....<ID:n>\n");
}

#[test]
fn parsing_is_deterministic() {
    let sources = ["rec factorial n = n eq 0 -> 1 | n * factorial (n - 1) in \
                    Print(factorial 5)",
                   "Print(sqr_sum) where sqr_sum = x**2 + y**2 where x = 3 where y = 4",
                   "let x = 1 and y = 2 and z = 3 in Print((x, y, z))"];

    for src in sources {
        let first = get_ast(src).unwrap();
        let second = get_ast(src).unwrap();
        assert_eq!(first, second, "two parses of the same source disagree:\n{src}");
    }
}

#[test]
fn standardized_trees_contain_no_surface_labels() {
    let sources = ["let x = 5 in let y = 10 in Print(x + y)",
                   "rec factorial n = n eq 0 -> 1 | n * factorial (n - 1) in \
                    Print(factorial 5)",
                   "Print(sqr_sum) where sqr_sum = x**2 + y**2 where x = 3 where y = 4",
                   "let x = 1 and y = 2 and z = 3 in Print((x, y, z))",
                   "let a = 1 and b = 2 within c = a + b in Print(c)",
                   "let add x y = x + y in Print(2 @add 3)",
                   "let incr = (delta = 2 within incr x = x + delta) in Print(incr 40)"];

    for src in sources {
        let st = get_st(src).unwrap();
        assert_standardized(&st, src);
    }
}

fn assert_standardized(node: &Node, src: &str) {
    let surface = matches!(node.label,
                           Label::Let
                           | Label::Where
                           | Label::Within
                           | Label::And
                           | Label::Rec
                           | Label::FunctionForm
                           | Label::At
                           | Label::Equal);
    assert!(!surface,
            "surface label '{}' survived standardization of:\n{src}",
            node.label);

    for child in &node.children {
        assert_standardized(child, src);
    }
}

#[test]
fn standardization_preserves_free_variables() {
    let sources = ["rec factorial n = n eq 0 -> 1 | n * factorial (n - 1) in \
                    Print(factorial 5)",
                   "Print(sqr_sum) where sqr_sum = x**2 + y**2 where x = 3 where y = 4",
                   "let x = 3 within y = x * 2 in Print(y + z)",
                   "let a = 1 and b = a in Print(a + b)",
                   "let f (x,y) = x + y in Print(f (3,4))",
                   "fn u. u @ combine v"];

    for src in sources {
        let ast_free = free_vars(&get_ast(src).unwrap());
        let st_free = free_vars(&get_st(src).unwrap());
        assert_eq!(ast_free, st_free, "free variables changed for:\n{src}");
    }
}

#[test]
fn lexical_errors_carry_a_source_line() {
    assert!(tokenize("").unwrap().is_empty());
    assert!(tokenize("// nothing but a comment").unwrap().is_empty());

    let err = tokenize("let x = $ in x").unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");

    let err = tokenize("1 +\n 2 # 3").unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");

    let err = tokenize("'unterminated").unwrap_err();
    assert!(err.to_string().contains("Unterminated"), "{err}");
}

#[test]
fn trace_sinks_receive_one_line_per_step() {
    let mut out = Vec::new();
    let mut control_sink = Vec::new();
    let mut stack_sink = Vec::new();

    get_result_with_trace("Print(1 + 2)", &mut out, &mut control_sink, &mut stack_sink).unwrap();

    let control = String::from_utf8(control_sink).unwrap();
    let stack = String::from_utf8(stack_sink).unwrap();
    assert_eq!(control.lines().count(), stack.lines().count());
    assert!(control.lines().count() >= 5);
    assert_eq!(String::from_utf8(out).unwrap(), "3\n");
}

/// Computes the free variables of an AST or ST subtree.
///
/// Handles both surface binders (`let`, `where`, definitions) and the
/// standardized form, so the same function applies to both trees.
fn free_vars(node: &Node) -> HashSet<String> {
    match &node.label {
        Label::Identifier(name) => HashSet::from([name.clone()]),

        Label::Lambda => {
            let (body, params) = node.children.split_last().unwrap();
            let mut bound = HashSet::new();
            for param in params {
                pattern_names(param, &mut bound);
            }
            free_vars(body).difference(&bound).cloned().collect()
        },

        Label::Let => {
            let (bound, definition_free) = definition_parts(&node.children[0]);
            let body_free: HashSet<_> =
                free_vars(&node.children[1]).difference(&bound).cloned().collect();
            definition_free.union(&body_free).cloned().collect()
        },

        Label::Where => {
            let (bound, definition_free) = definition_parts(&node.children[1]);
            let body_free: HashSet<_> =
                free_vars(&node.children[0]).difference(&bound).cloned().collect();
            definition_free.union(&body_free).cloned().collect()
        },

        _ => node.children.iter().flat_map(|child| free_vars(child)).collect(),
    }
}

/// Returns the names a definition binds and the names free in its values.
fn definition_parts(node: &Node) -> (HashSet<String>, HashSet<String>) {
    match &node.label {
        Label::Equal => {
            let mut bound = HashSet::new();
            pattern_names(&node.children[0], &mut bound);
            (bound, free_vars(&node.children[1]))
        },

        Label::FunctionForm => {
            let mut bound = HashSet::new();
            pattern_names(&node.children[0], &mut bound);

            let (body, params) = node.children[1..].split_last().unwrap();
            let mut param_names = HashSet::new();
            for param in params {
                pattern_names(param, &mut param_names);
            }
            let free = free_vars(body).difference(&param_names).cloned().collect();
            (bound, free)
        },

        Label::And => {
            let mut bound = HashSet::new();
            let mut free = HashSet::new();
            for child in &node.children {
                let (child_bound, child_free) = definition_parts(child);
                bound.extend(child_bound);
                free.extend(child_free);
            }
            (bound, free)
        },

        Label::Rec => {
            let (bound, free) = definition_parts(&node.children[0]);
            let free = free.difference(&bound).cloned().collect();
            (bound, free)
        },

        Label::Within => {
            let (outer_bound, outer_free) = definition_parts(&node.children[0]);
            let (inner_bound, inner_free) = definition_parts(&node.children[1]);
            let inner_free: HashSet<_> =
                inner_free.difference(&outer_bound).cloned().collect();
            (inner_bound, outer_free.union(&inner_free).cloned().collect())
        },

        _ => (HashSet::new(), free_vars(node)),
    }
}

/// Collects the identifiers a binder pattern introduces.
fn pattern_names(node: &Node, out: &mut HashSet<String>) {
    match &node.label {
        Label::Identifier(name) => {
            out.insert(name.clone());
        },
        Label::Comma => {
            for child in &node.children {
                pattern_names(child, out);
            }
        },
        _ => {},
    }
}
