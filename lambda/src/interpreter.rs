use thiserror::Error;

use crate::{
    ast::TermRef,
    eval::{self, Reduction, TraceSink},
    lexer::{self, LexicalError},
    parser::{self, ParseError},
};

/// Everything [`Interpreter::evaluate`] can fail with. Lexer and parser
/// failures pass through with their own messages.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error(transparent)]
    Lex(#[from] LexicalError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("Reduction exceeded the step budget")]
    ReductionExceeded,
}

/// A `let` binding as entered: the space-folded name and the raw source
/// text to the right of the `=`.
#[derive(PartialEq, Eq, Debug)]
pub struct BindingEntry {
    pub name: String,
    pub expr: String,
}

enum Input {
    Expression,
    Binding { name: String, expr: String },
    InvalidBinding,
}

/// A line is a binding candidate iff it starts with `let ` after leading
/// spaces. The name is everything before the first `=` (trimmed, interior
/// spaces folded to `-`), the right-hand side everything after it, kept
/// verbatim.
fn classify(line: &str) -> Input {
    let trimmed = line.trim_start_matches(' ');
    let rest = match trimmed.strip_prefix("let ") {
        Some(rest) => rest,
        None => return Input::Expression,
    };
    match rest.find('=') {
        Some(eq) => Input::Binding {
            name: rest[..eq].trim().replace(' ', "-"),
            expr: rest[eq + 1..].to_string(),
        },
        None => Input::InvalidBinding,
    }
}

/// One interpreter session: the ordered binding store plus an optional
/// reduction budget. Created empty and dropped with the session.
#[derive(Default)]
pub struct Interpreter {
    bindings: Vec<BindingEntry>,
    step_budget: Option<usize>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of reduction passes per evaluation. Without a cap,
    /// a divergent term makes evaluation loop forever.
    pub fn with_step_budget(mut self, budget: usize) -> Self {
        self.step_budget = Some(budget);
        self
    }

    /// The binding store, in definition order.
    pub fn bindings(&self) -> &[BindingEntry] {
        &self.bindings
    }

    /// Run one line of input and fold the outcome into a user-facing
    /// line of text; errors never escape.
    ///
    /// A valid binding is appended to the store before its right-hand
    /// side is evaluated, and rolled back if that evaluation fails. The
    /// right-hand side resolves against the entries defined before it,
    /// never against the entry it is defining, so the definition echo
    /// prints exactly what later uses of the name substitute.
    pub fn interpret(&mut self, line: &str, trace: &mut impl TraceSink) -> String {
        match classify(line) {
            Input::Binding { name, expr } => {
                self.bindings.push(BindingEntry {
                    name: name.clone(),
                    expr: expr.clone(),
                });
                let earlier = &self.bindings[..self.bindings.len() - 1];
                match Self::evaluate_with(earlier, self.step_budget, &expr, trace) {
                    Ok(value) => format!("<{name}> {value}"),
                    Err(e) => {
                        self.bindings.pop();
                        format!("Error: {e}")
                    }
                }
            }
            Input::Expression => match self.evaluate(line, trace) {
                Ok(value) => value,
                Err(e) => format!("Error: {e}"),
            },
            Input::InvalidBinding => "Invalid Syntax".to_string(),
        }
    }

    /// Tokenize, parse, resolve names against the binding store, reduce,
    /// render.
    pub fn evaluate(&self, source: &str, trace: &mut impl TraceSink) -> Result<String, EvalError> {
        Self::evaluate_with(&self.bindings, self.step_budget, source, trace)
    }

    fn evaluate_with(
        bindings: &[BindingEntry],
        budget: Option<usize>,
        source: &str,
        trace: &mut impl TraceSink,
    ) -> Result<String, EvalError> {
        let tokens = lexer::tokenize(source)?;
        let term = parser::parse(tokens)?;
        let term = resolve(bindings, term)?;
        match eval::beta_reduce(term, budget, trace) {
            Reduction::Normalized(term) => Ok(term.to_string()),
            Reduction::Exceeded(_) => Err(EvalError::ReductionExceeded),
        }
    }
}

/// Substitute stored bindings into `term`, newest first. Each entry's
/// right-hand side is itself resolved against the entries before it only,
/// so an entry sees the store as of its own definition, later entries
/// shadow earlier ones of the same name, and a self-referential binding
/// cannot recurse.
fn resolve(bindings: &[BindingEntry], mut term: TermRef) -> Result<TermRef, EvalError> {
    for (i, entry) in bindings.iter().enumerate().rev() {
        if !eval::occurs_in(&entry.name, &term) {
            continue;
        }
        let value = parser::parse(lexer::tokenize(&entry.expr)?)?;
        let value = resolve(&bindings[..i], value)?;
        term = eval::substitute(&term, &entry.name, &value);
    }
    Ok(term)
}
