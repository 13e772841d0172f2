use std::fmt;

use crate::{
    ast::{BinaryOperator, Label, Node, UnaryOperator},
    error::StandardizeError,
};

/// A single item on the control stack.
///
/// Control items are the flattened form of the standardized tree, plus the
/// machine-internal markers: environment markers for rule 5, `beta` and the
/// branch references for conditionals, and `tau_n` for tuple formation.
#[derive(Debug, Clone)]
pub enum ControlItem {
    /// An identifier to resolve against the current environment.
    Name(String),
    /// An integer literal.
    Integer(i64),
    /// A string literal.
    Str(String),
    /// A truth value literal.
    Bool(bool),
    /// The empty tuple.
    Nil,
    /// The `dummy` constant.
    Dummy,
    /// The fixed-point combinator.
    YStar,
    /// A lambda: pushing it on the stack captures the current environment.
    Lambda {
        /// Index of the control structure holding the body.
        index:  usize,
        /// The bound parameter names, in order.
        params: Vec<String>,
    },
    /// Function application.
    Gamma,
    /// A binary operator.
    Binary(BinaryOperator),
    /// A unary operator.
    Unary(UnaryOperator),
    /// Conditional branch selection; consumes the truth value on the stack.
    Beta,
    /// Reference to the control structure of a conditional's true branch.
    DeltaTrue(usize),
    /// Reference to the control structure of a conditional's false branch.
    DeltaFalse(usize),
    /// Tuple formation from the given number of stack values.
    Tau(usize),
    /// An environment marker delimiting the extent of an application.
    Env(usize),
}

impl fmt::Display for ControlItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "'{value}'"),
            Self::Bool(true) => write!(f, "true"),
            Self::Bool(false) => write!(f, "false"),
            Self::Nil => write!(f, "nil"),
            Self::Dummy => write!(f, "dummy"),
            Self::YStar => write!(f, "Y*"),
            Self::Lambda { index, .. } => write!(f, "lambda_{index}"),
            Self::Gamma => write!(f, "gamma"),
            Self::Binary(op) => write!(f, "{op}"),
            Self::Unary(op) => write!(f, "{op}"),
            Self::Beta => write!(f, "beta"),
            Self::DeltaTrue(index) => write!(f, "delta_{index}_t"),
            Self::DeltaFalse(index) => write!(f, "delta_{index}_f"),
            Self::Tau(count) => write!(f, "tau_{count}"),
            Self::Env(index) => write!(f, "e_{index}"),
        }
    }
}

/// A numbered flat body of control items.
///
/// Structure 0 is the program body; each lambda and each conditional branch
/// gets its own structure, referenced by index from the items that activate
/// it.
#[derive(Debug)]
pub struct ControlStructure {
    /// The index of this structure.
    pub index: usize,
    /// The flattened body, in pre-order.
    pub body:  Vec<ControlItem>,
}

/// Flattens a standardized tree into numbered control structures.
///
/// Lambdas receive an index and their body becomes a separate structure;
/// conditionals become a `delta-true`/`delta-false`/`beta` prefix followed by
/// the flattened condition, with each branch in its own structure. Every
/// other node flattens to its item followed by its children, pre-order.
///
/// # Parameters
/// - `st`: The root of the standardized tree.
///
/// # Returns
/// All control structures, with the program body at index 0.
///
/// # Errors
/// Returns a [`StandardizeError`] if the tree contains a label that has no
/// place in a standardized tree, or a lambda with a malformed parameter
/// pattern.
pub fn generate_structures(st: &Node) -> Result<Vec<ControlStructure>, StandardizeError> {
    let mut generator = Generator { bodies: Vec::new() };

    let root = generator.allocate();
    let mut body = Vec::new();
    generator.walk(st, &mut body)?;
    generator.bodies[root] = body;

    Ok(generator.bodies
                .into_iter()
                .enumerate()
                .map(|(index, body)| ControlStructure { index, body })
                .collect())
}

struct Generator {
    bodies: Vec<Vec<ControlItem>>,
}

impl Generator {
    /// Reserves the next structure index.
    fn allocate(&mut self) -> usize {
        self.bodies.push(Vec::new());
        self.bodies.len() - 1
    }

    /// Flattens one subtree into a separate, freshly numbered structure.
    fn delegate(&mut self, node: &Node) -> Result<usize, StandardizeError> {
        let index = self.allocate();
        let mut body = Vec::new();
        self.walk(node, &mut body)?;
        self.bodies[index] = body;

        Ok(index)
    }

    fn walk(&mut self, node: &Node, body: &mut Vec<ControlItem>) -> Result<(), StandardizeError> {
        match &node.label {
            Label::Lambda => {
                let [parameter, lambda_body] = node.children.as_slice() else {
                    return Err(malformed("lambda", "expected one parameter and a body"));
                };
                let params = lambda_params(parameter)?;
                let index = self.delegate(lambda_body)?;
                body.push(ControlItem::Lambda { index, params });
            },

            Label::Arrow => {
                let [condition, then_branch, else_branch] = node.children.as_slice() else {
                    return Err(malformed("->", "expected exactly three children"));
                };
                let true_index = self.delegate(then_branch)?;
                let false_index = self.delegate(else_branch)?;

                body.push(ControlItem::DeltaTrue(true_index));
                body.push(ControlItem::DeltaFalse(false_index));
                body.push(ControlItem::Beta);
                self.walk(condition, body)?;
            },

            Label::Tau => {
                body.push(ControlItem::Tau(node.children.len()));
                for child in &node.children {
                    self.walk(child, body)?;
                }
            },

            Label::Gamma => {
                let [rator, rand] = node.children.as_slice() else {
                    return Err(malformed("gamma", "expected exactly two children"));
                };
                body.push(ControlItem::Gamma);
                self.walk(rator, body)?;
                self.walk(rand, body)?;
            },

            Label::Binary(op) => {
                let [left, right] = node.children.as_slice() else {
                    return Err(malformed(&op.to_string(), "expected exactly two operands"));
                };
                body.push(ControlItem::Binary(*op));
                self.walk(left, body)?;
                self.walk(right, body)?;
            },

            Label::Unary(op) => {
                let [operand] = node.children.as_slice() else {
                    return Err(malformed(&op.to_string(), "expected exactly one operand"));
                };
                body.push(ControlItem::Unary(*op));
                self.walk(operand, body)?;
            },

            Label::Identifier(name) => body.push(ControlItem::Name(name.clone())),
            Label::Integer(value) => body.push(ControlItem::Integer(*value)),
            Label::StringLit(value) => body.push(ControlItem::Str(value.clone())),
            Label::True => body.push(ControlItem::Bool(true)),
            Label::False => body.push(ControlItem::Bool(false)),
            Label::Nil => body.push(ControlItem::Nil),
            Label::Dummy => body.push(ControlItem::Dummy),
            Label::YStar => body.push(ControlItem::YStar),

            other => {
                return Err(StandardizeError::MalformedNode { label:   other.to_string(),
                                                             details:
                                                                 "label has no place in a \
                                                                  standardized tree"
                                                                        .to_string(), });
            },
        }

        Ok(())
    }
}

/// Extracts the parameter names of a lambda binder.
///
/// A plain identifier binds one name; a `,` pattern binds one name per
/// member and is destructured from a tuple argument at application time; the
/// empty parameter list binds the unreferencable name `()`.
fn lambda_params(node: &Node) -> Result<Vec<String>, StandardizeError> {
    match &node.label {
        Label::Identifier(name) => Ok(vec![name.clone()]),
        Label::EmptyParams => Ok(vec!["()".to_string()]),
        Label::Comma => {
            node.children
                .iter()
                .map(|child| match &child.label {
                    Label::Identifier(name) => Ok(name.clone()),
                    other => {
                        Err(malformed(",",
                                      &format!("tuple parameter members must be identifiers, \
                                                found '{other}'")))
                    },
                })
                .collect()
        },
        other => Err(malformed("lambda", &format!("invalid parameter pattern '{other}'"))),
    }
}

fn malformed(label: &str, details: &str) -> StandardizeError {
    StandardizeError::MalformedNode { label:   label.to_string(),
                                      details: details.to_string(), }
}
