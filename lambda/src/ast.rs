use std::rc::Rc;

pub type TermRef = Rc<Term>;

#[derive(PartialEq, Eq, Debug)]
pub enum Term {
    /// `x`
    Var(String),
    /// `λx.t`
    Abs(String, TermRef),
    /// `t t`
    Apply(TermRef, TermRef),
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Term::Var(name) => f.write_str(name),
            Term::Abs(param, body) => write!(f, "λ{param}.{body}"),
            Term::Apply(func, arg) => write!(f, "({func} {arg})"),
        }
    }
}
