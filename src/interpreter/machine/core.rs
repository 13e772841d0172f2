use std::{collections::HashMap, fmt, io::Write, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        machine::{
            binary::apply_binary,
            builtin,
            control::{ControlItem, ControlStructure},
            environment::Environment,
            unary::apply_unary,
        },
        value::{Closure, Value},
    },
    util::num::i64_to_usize_checked,
};

/// Result type used by the machine.
///
/// All evaluation steps return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// A single item on the value stack.
///
/// Besides proper values, the stack holds environment markers (matched with
/// the markers on the control stack when an application's extent ends) and
/// the transient fixed-point combinator consumed by the recursion rule.
#[derive(Debug)]
pub enum StackItem {
    /// A runtime value.
    Value(Value),
    /// An environment marker.
    Env(usize),
    /// The fixed-point combinator, waiting to be applied.
    YStar,
}

impl fmt::Display for StackItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => write!(f, "{value}"),
            Self::Env(index) => write!(f, "e_{index}"),
            Self::YStar => write!(f, "Y*"),
        }
    }
}

/// Sinks receiving the serialized machine state after every rule application.
pub struct TraceSinks<'a> {
    /// Receives one line per step with the control stack contents.
    pub control: &'a mut dyn Write,
    /// Receives one line per step with the value stack contents.
    pub stack:   &'a mut dyn Write,
}

/// The Control-Stack-Environment machine.
///
/// The machine state is a control stack of pending work (top at the end), a
/// value stack of intermediate results, and a stack of active environments
/// whose top is the environment identifiers currently resolve in. One rule
/// fires per step, selected by the control stack top and, for applications,
/// the value stack top; evaluation ends when the control stack drains,
/// leaving the program's result as the single remaining stack value.
pub struct CseMachine<'a> {
    control:        Vec<ControlItem>,
    stack:          Vec<StackItem>,
    env_stack:      Vec<Rc<Environment>>,
    structures:     Vec<ControlStructure>,
    next_env_index: usize,
    out:            &'a mut dyn Write,
    trace:          Option<TraceSinks<'a>>,
}

impl<'a> CseMachine<'a> {
    /// Creates a machine ready to run the given control structures.
    ///
    /// The initial state loads the program body (structure 0) onto the
    /// control stack between environment markers for the primitive
    /// environment, mirroring a top-level application in environment 0.
    ///
    /// # Parameters
    /// - `structures`: The control structures generated from the
    ///   standardized tree.
    /// - `out`: The sink `Print` writes to.
    #[must_use]
    pub fn new(structures: Vec<ControlStructure>, out: &'a mut dyn Write) -> Self {
        let mut machine = Self { control: Vec::new(),
                                 stack: Vec::new(),
                                 env_stack: vec![Environment::primitive()],
                                 structures,
                                 next_env_index: 0,
                                 out,
                                 trace: None };

        machine.control.push(ControlItem::Env(0));
        if let Some(program) = machine.structures.first() {
            machine.control.extend(program.body.iter().cloned());
        }
        machine.stack.push(StackItem::Env(0));

        machine
    }

    /// Enables state tracing.
    ///
    /// After every rule application the machine writes one line per sink:
    /// the control stack and the value stack, bottom to top, items separated
    /// by single spaces.
    pub fn set_trace(&mut self, sinks: TraceSinks<'a>) {
        self.trace = Some(sinks);
    }

    /// Runs the machine to completion.
    ///
    /// # Returns
    /// The program's result value.
    ///
    /// # Errors
    /// Returns the first [`RuntimeError`] raised by a rule, or a state error
    /// if the machine terminates without reducing to exactly one value.
    pub fn evaluate(&mut self) -> EvalResult<Value> {
        while let Some(item) = self.control.pop() {
            self.apply_rule(item)?;
            self.write_trace()?;
        }

        if self.stack.len() != 1 {
            return Err(RuntimeError::StateError { details: format!("evaluation finished with \
                                                                    {} items on the value stack",
                                                                   self.stack.len()), });
        }
        match self.stack.pop() {
            Some(StackItem::Value(value)) => Ok(value),
            _ => {
                Err(RuntimeError::StateError { details: "evaluation did not produce a value"
                                                            .to_string(), })
            },
        }
    }

    /// Applies the rule selected by the popped control item.
    fn apply_rule(&mut self, item: ControlItem) -> EvalResult<()> {
        match item {
            // Rule 1: names resolve in the current environment, literals
            // push their value.
            ControlItem::Name(name) => {
                let value = self.current_env()?
                                .lookup(&name)
                                .ok_or(RuntimeError::UnboundIdentifier { name })?;
                self.stack.push(StackItem::Value(value));
            },
            ControlItem::Integer(value) => self.stack.push(StackItem::Value(Value::Integer(value))),
            ControlItem::Str(value) => self.stack.push(StackItem::Value(Value::Str(value))),
            ControlItem::Bool(value) => self.stack.push(StackItem::Value(Value::Bool(value))),
            ControlItem::Nil => self.stack.push(StackItem::Value(Value::Nil)),
            ControlItem::Dummy => self.stack.push(StackItem::Value(Value::Dummy)),
            ControlItem::YStar => self.stack.push(StackItem::YStar),

            // Rule 2: a lambda captures the current environment.
            ControlItem::Lambda { index, params } => {
                let env = self.current_env()?.clone();
                self.stack
                    .push(StackItem::Value(Value::Closure(Closure { index, params, env })));
            },

            // Rules 3, 4, 10, 11, 12 and 13 all fire on gamma; the stack top
            // decides which.
            ControlItem::Gamma => self.apply_gamma()?,

            // Rule 5: an application's extent ended; drop its environment.
            ControlItem::Env(index) => self.exit_environment(index)?,

            // Rule 6.
            ControlItem::Binary(op) => {
                let left = self.pop_value()?;
                let right = self.pop_value()?;
                let result = apply_binary(op, left, right)?;
                self.stack.push(StackItem::Value(result));
            },

            // Rule 7.
            ControlItem::Unary(op) => {
                let operand = self.pop_value()?;
                let result = apply_unary(op, operand)?;
                self.stack.push(StackItem::Value(result));
            },

            // Rule 8: the condition has been evaluated; select a branch.
            ControlItem::Beta => self.select_branch()?,

            ControlItem::DeltaTrue(_) | ControlItem::DeltaFalse(_) => {
                return Err(RuntimeError::StateError { details:
                                                          "conditional branch reference \
                                                           encountered outside beta"
                                                                 .to_string(), });
            },

            // Rule 9: tuple formation.
            ControlItem::Tau(count) => {
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(self.pop_value()?);
                }
                self.stack.push(StackItem::Value(Value::Tuple(values)));
            },
        }

        Ok(())
    }

    /// Dispatches a `gamma` according to the value stack top.
    fn apply_gamma(&mut self) -> EvalResult<()> {
        let Some(rator) = self.stack.pop() else {
            return Err(RuntimeError::StateError { details: "gamma with an empty value stack"
                                                               .to_string(), });
        };

        match rator {
            // Rule 3: builtins take one argument per gamma and apply once
            // saturated.
            StackItem::Value(Value::Builtin(mut builtin)) => {
                let argument = self.pop_value()?;
                builtin.args.push(argument);

                if builtin.args.len() == builtin.kind.arity() {
                    let result = builtin::apply(builtin.kind, &builtin.args, self.out)?;
                    self.stack.push(StackItem::Value(result));
                } else {
                    self.stack.push(StackItem::Value(Value::Builtin(builtin)));
                }
            },

            // Rules 4 and 11: closure application opens a new environment.
            StackItem::Value(Value::Closure(closure)) => {
                let argument = self.pop_value()?;
                let bindings = bind_parameters(&closure.params, argument)?;

                self.next_env_index += 1;
                let env = Environment::child(closure.env.clone(), self.next_env_index, bindings);
                let index = env.index;

                self.env_stack.push(env);
                self.stack.push(StackItem::Env(index));
                self.control.push(ControlItem::Env(index));
                let body = self.structure_body(closure.index)?;
                self.control.extend(body);
            },

            // Rule 10: tuple selection, 1-indexed.
            StackItem::Value(Value::Tuple(mut values)) => {
                let index = match self.pop_value()? {
                    Value::Integer(i) => i,
                    other => {
                        return Err(RuntimeError::TypeError { details:
                                                                 format!("a tuple must be \
                                                                          applied to an integer \
                                                                          index, found {}",
                                                                         other.kind()),
                                                             rule:    10, });
                    },
                };

                let out_of_bounds = RuntimeError::IndexOutOfBounds { index,
                                                                     length: values.len() };
                let position = i64_to_usize_checked(index, out_of_bounds)?;
                if position < 1 || position > values.len() {
                    return Err(RuntimeError::IndexOutOfBounds { index,
                                                                length: values.len() });
                }
                let selected = values.swap_remove(position - 1);
                self.stack.push(StackItem::Value(selected));
            },

            // Rule 12: Y* applied to a closure yields an eta-closure.
            StackItem::YStar => {
                match self.pop_value()? {
                    Value::Closure(closure) => {
                        self.stack.push(StackItem::Value(Value::Eta(closure)));
                    },
                    other => {
                        return Err(RuntimeError::TypeError { details:
                                                                 format!("Y* must be applied to \
                                                                          a lambda closure, \
                                                                          found {}",
                                                                         other.kind()),
                                                             rule:    12, });
                    },
                }
            },

            // Rule 13: applying an eta-closure unrolls one recursion step.
            // The underlying closure is applied to the eta-closure itself,
            // and the result to the original argument, so two gammas go back
            // on the control stack.
            StackItem::Value(Value::Eta(closure)) => {
                self.control.push(ControlItem::Gamma);
                self.control.push(ControlItem::Gamma);
                self.stack.push(StackItem::Value(Value::Eta(closure.clone())));
                self.stack.push(StackItem::Value(Value::Closure(closure)));
            },

            StackItem::Value(other) => {
                return Err(RuntimeError::TypeError { details: format!("{} is not applicable",
                                                                      other.kind()),
                                                     rule:    4, });
            },

            StackItem::Env(_) => {
                return Err(RuntimeError::StateError { details:
                                                          "gamma applied to an environment marker"
                                                              .to_string(), });
            },
        }

        Ok(())
    }

    /// Rule 5: removes the environment marker below the stack top and
    /// restores the previous environment.
    fn exit_environment(&mut self, index: usize) -> EvalResult<()> {
        match self.env_stack.pop() {
            Some(env) if env.index == index => {},
            _ => {
                return Err(RuntimeError::StateError { details: format!("environment marker \
                                                                        e_{index} does not \
                                                                        match the active \
                                                                        environment"), });
            },
        }

        let top = self.stack.pop();
        let marker = self.stack.pop();
        match (top, marker) {
            (Some(StackItem::Value(value)), Some(StackItem::Env(found))) if found == index => {
                self.stack.push(StackItem::Value(value));
                Ok(())
            },
            _ => {
                Err(RuntimeError::StateError { details: format!("no environment marker e_{index} \
                                                                 below the value stack top"), })
            },
        }
    }

    /// Rule 8: consumes the evaluated condition and keeps exactly one of the
    /// two branch structures.
    fn select_branch(&mut self) -> EvalResult<()> {
        let condition = self.pop_value()?.as_truthvalue(8)?;

        let false_branch = self.control.pop();
        let true_branch = self.control.pop();
        match (true_branch, false_branch) {
            (Some(ControlItem::DeltaTrue(true_index)), Some(ControlItem::DeltaFalse(false_index))) => {
                let chosen = if condition { true_index } else { false_index };
                let body = self.structure_body(chosen)?;
                self.control.extend(body);
                Ok(())
            },
            _ => {
                Err(RuntimeError::StateError { details: "beta without adjacent branch references"
                                                            .to_string(), })
            },
        }
    }

    fn current_env(&self) -> EvalResult<&Rc<Environment>> {
        self.env_stack
            .last()
            .ok_or_else(|| RuntimeError::StateError { details: "no active environment".to_string() })
    }

    fn pop_value(&mut self) -> EvalResult<Value> {
        match self.stack.pop() {
            Some(StackItem::Value(value)) => Ok(value),
            Some(other) => {
                Err(RuntimeError::StateError { details: format!("expected a value on the stack, \
                                                                 found {other}"), })
            },
            None => {
                Err(RuntimeError::StateError { details: "the value stack is empty".to_string() })
            },
        }
    }

    fn structure_body(&self, index: usize) -> EvalResult<Vec<ControlItem>> {
        self.structures
            .get(index)
            .map(|structure| structure.body.clone())
            .ok_or_else(|| RuntimeError::StateError { details: format!("no control structure \
                                                                        with index {index}"), })
    }

    /// Serializes the machine state to the trace sinks, if tracing is on.
    fn write_trace(&mut self) -> EvalResult<()> {
        if self.trace.is_none() {
            return Ok(());
        }

        let control_line = self.control
                               .iter()
                               .map(ToString::to_string)
                               .collect::<Vec<_>>()
                               .join(" ");
        let stack_line = self.stack
                             .iter()
                             .map(ToString::to_string)
                             .collect::<Vec<_>>()
                             .join(" ");

        if let Some(sinks) = self.trace.as_mut() {
            writeln!(sinks.control, "{control_line}").map_err(output_error)?;
            writeln!(sinks.stack, "{stack_line}").map_err(output_error)?;
        }
        Ok(())
    }
}

/// Binds a closure's parameters to an argument, destructuring tuples for
/// multi-name parameter lists.
///
/// # Errors
/// - `ArityError` when a multi-name list receives a tuple of the wrong
///   length.
/// - `TypeError` when a multi-name list receives a non-tuple.
fn bind_parameters(params: &[String], argument: Value) -> EvalResult<HashMap<String, Value>> {
    match params {
        [single] => Ok(HashMap::from([(single.clone(), argument)])),

        many => {
            match argument {
                Value::Tuple(values) if values.len() == many.len() => {
                    Ok(many.iter().cloned().zip(values).collect())
                },
                Value::Tuple(values) => {
                    Err(RuntimeError::ArityError { expected: many.len(),
                                                   found:    values.len(), })
                },
                other => {
                    Err(RuntimeError::TypeError { details: format!("a function binding {} names \
                                                                    must be applied to a tuple, \
                                                                    found {}",
                                                                   many.len(),
                                                                   other.kind()),
                                                  rule:    11, })
                },
            }
        },
    }
}

pub(crate) fn output_error(error: std::io::Error) -> RuntimeError {
    RuntimeError::OutputError { details: error.to_string() }
}
