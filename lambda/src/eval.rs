use std::rc::Rc;

use crate::ast::{Term, TermRef};

/// One redex contraction as reported on the trace channel: the parameter
/// that was bound and the rendered argument that replaced it.
#[derive(derive_more::Display, Debug)]
#[display(fmt = "↪ β-reduce: {param} <- {argument}")]
pub struct Contraction {
    pub param: String,
    pub argument: String,
}

/// Receiver for [`Contraction`] events. Any `FnMut(Contraction)` closure
/// qualifies, so callers can print the events, collect them, or drop them.
pub trait TraceSink {
    fn emit(&mut self, event: Contraction);
}

impl<F: FnMut(Contraction)> TraceSink for F {
    fn emit(&mut self, event: Contraction) {
        self(event)
    }
}

/// Whether `name` appears anywhere in `term`, as a variable or as an
/// abstraction parameter. Broader than free-variable occurrence on
/// purpose: a name that passes this check is safe to introduce as a
/// binder.
pub fn occurs_in(name: &str, term: &Term) -> bool {
    match term {
        Term::Var(n) => n == name,
        Term::Abs(param, body) => param == name || occurs_in(name, body),
        Term::Apply(func, arg) => occurs_in(name, func) || occurs_in(name, arg),
    }
}

/// First of `base`, `base0`, `base1`, … that does not occur in `context`.
pub fn fresh_name(base: &str, context: &Term) -> String {
    let mut name = base.to_string();
    let mut suffix = 0;
    while occurs_in(&name, context) {
        name = format!("{base}{suffix}");
        suffix += 1;
    }
    name
}

/// Rename `old` to `new` throughout `term`: free occurrences, binders of
/// that name, and occurrences under such binders alike.
pub fn alpha_convert(term: &TermRef, old: &str, new: &str) -> TermRef {
    match term.as_ref() {
        Term::Var(name) if name == old => Rc::new(Term::Var(new.to_string())),
        Term::Var(_) => term.clone(),
        Term::Abs(param, body) => {
            let param = if param == old { new } else { param.as_str() };
            Rc::new(Term::Abs(param.to_string(), alpha_convert(body, old, new)))
        }
        Term::Apply(func, arg) => Rc::new(Term::Apply(
            alpha_convert(func, old, new),
            alpha_convert(arg, old, new),
        )),
    }
}

/// Capture-avoiding substitution `term[var_name := value]`. Untouched
/// subtrees are shared with the input, and `value` is spliced in by
/// reference rather than copied.
pub fn substitute(term: &TermRef, var_name: &str, value: &TermRef) -> TermRef {
    match term.as_ref() {
        Term::Var(name) if name == var_name => value.clone(),
        Term::Var(_) => term.clone(),
        // The binder shadows `var_name`, so nothing below refers to it.
        Term::Abs(param, _) if param == var_name => term.clone(),
        Term::Abs(param, body) => {
            if occurs_in(param, value) {
                // `value` has a free use of this binder's name. Rename the
                // binder first so the spliced-in occurrences stay free.
                let renamed = fresh_name(param, value);
                let body = alpha_convert(body, param, &renamed);
                Rc::new(Term::Abs(renamed, substitute(&body, var_name, value)))
            } else {
                Rc::new(Term::Abs(param.clone(), substitute(body, var_name, value)))
            }
        }
        Term::Apply(func, arg) => Rc::new(Term::Apply(
            substitute(func, var_name, value),
            substitute(arg, var_name, value),
        )),
    }
}

/// One reduction pass. An application whose function is an abstraction is
/// contracted (and traced); any other application recurses into both
/// sides, an abstraction into its body. A single pass can therefore
/// contract several redexes at once.
pub fn beta_reduce_step(term: &TermRef, trace: &mut impl TraceSink) -> TermRef {
    match term.as_ref() {
        Term::Apply(func, arg) => match func.as_ref() {
            Term::Abs(param, body) => {
                trace.emit(Contraction {
                    param: param.clone(),
                    argument: arg.to_string(),
                });
                substitute(body, param, arg)
            }
            _ => Rc::new(Term::Apply(
                beta_reduce_step(func, trace),
                beta_reduce_step(arg, trace),
            )),
        },
        Term::Abs(param, body) => Rc::new(Term::Abs(
            param.clone(),
            beta_reduce_step(body, trace),
        )),
        Term::Var(_) => term.clone(),
    }
}

/// Normal-form check: no application anywhere in `term` has an
/// abstraction in function position.
pub fn is_reduced(term: &Term) -> bool {
    match term {
        Term::Var(_) => true,
        Term::Abs(_, body) => is_reduced(body),
        Term::Apply(func, arg) => {
            !matches!(func.as_ref(), Term::Abs(_, _)) && is_reduced(func) && is_reduced(arg)
        }
    }
}

/// Outcome of driving a term towards normal form.
#[derive(PartialEq, Eq, Debug)]
pub enum Reduction {
    Normalized(TermRef),
    /// The pass budget ran out first; carries the term as far as it got.
    Exceeded(TermRef),
}

/// Run [`beta_reduce_step`] passes until no redex is left. With
/// `budget = None` the loop is unbounded and a divergent term never
/// returns; with `Some(n)` at most `n` passes are made before giving up.
pub fn beta_reduce(
    mut term: TermRef,
    budget: Option<usize>,
    trace: &mut impl TraceSink,
) -> Reduction {
    let mut passes = 0;
    while !is_reduced(&term) {
        if let Some(limit) = budget {
            if passes >= limit {
                return Reduction::Exceeded(term);
            }
        }
        term = beta_reduce_step(&term, trace);
        passes += 1;
    }
    Reduction::Normalized(term)
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! var {
        ($name:expr) => {
            Rc::new(Term::Var($name.to_string()))
        };
    }
    macro_rules! lambda {
        ($param:expr, $body:expr) => {
            Rc::new(Term::Abs($param.to_string(), $body))
        };
    }
    macro_rules! apply {
        ($lhs:expr, $rhs:expr) => {
            Rc::new(Term::Apply($lhs, $rhs))
        };
    }

    fn reduce(term: TermRef) -> TermRef {
        match beta_reduce(term, None, &mut |_: Contraction| {}) {
            Reduction::Normalized(term) => term,
            Reduction::Exceeded(term) => panic!("reduction exceeded on {term}"),
        }
    }

    fn trace_of(term: TermRef) -> (TermRef, Vec<String>) {
        let mut events = Vec::new();
        let reduced = match beta_reduce(term, Some(100), &mut |e: Contraction| {
            events.push(e.to_string())
        }) {
            Reduction::Normalized(term) => term,
            Reduction::Exceeded(term) => panic!("reduction exceeded on {term}"),
        };
        (reduced, events)
    }

    #[test]
    fn occurs_in_sees_variables_and_binders() {
        let term = lambda!("x", apply!(var!("y"), var!("x")));
        assert!(occurs_in("x", &term));
        assert!(occurs_in("y", &term));
        assert!(!occurs_in("z", &term));
        // The binder alone counts, even with no use in the body.
        assert!(occurs_in("w", &lambda!("w", var!("v"))));
    }

    #[test]
    fn fresh_name_appends_increasing_suffixes() {
        let context = apply!(var!("x"), var!("x0"));
        assert_eq!(fresh_name("x", &context), "x1");
        assert_eq!(fresh_name("y", &context), "y");
    }

    #[test]
    fn alpha_convert_renames_binders_and_variables() {
        let term = lambda!("x", apply!(var!("x"), var!("y")));
        assert_eq!(
            alpha_convert(&term, "x", "w"),
            lambda!("w", apply!(var!("w"), var!("y"))),
        );
    }

    #[test]
    fn substitute_replaces_free_occurrences() {
        let term = apply!(var!("x"), lambda!("y", var!("x")));
        assert_eq!(
            substitute(&term, "x", &var!("z")),
            apply!(var!("z"), lambda!("y", var!("z"))),
        );
    }

    #[test]
    fn substitute_stops_at_a_shadowing_binder() {
        let term = lambda!("x", var!("x"));
        assert_eq!(substitute(&term, "x", &var!("z")), term);
    }

    #[test]
    fn substitute_renames_a_binder_that_would_capture() {
        // (λx.y)[y := x] must not turn into λx.x.
        let term = lambda!("x", var!("y"));
        assert_eq!(
            substitute(&term, "y", &var!("x")),
            lambda!("x0", var!("x")),
        );
    }

    #[test]
    fn reduction_avoids_capturing_a_free_argument() {
        let term = apply!(lambda!("y", lambda!("x", var!("y"))), var!("x"));
        let (reduced, events) = trace_of(term);
        assert_eq!(reduced, lambda!("x0", var!("x")));
        assert_eq!(events, vec!["↪ β-reduce: y <- x"]);
    }

    #[test]
    fn one_pass_contracts_parallel_redexes() {
        let term = apply!(
            apply!(lambda!("x", var!("x")), var!("a")),
            apply!(lambda!("y", var!("y")), var!("b"))
        );
        let mut events = Vec::new();
        let stepped = beta_reduce_step(&term, &mut |e: Contraction| events.push(e));
        assert_eq!(stepped, apply!(var!("a"), var!("b")));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn currying_applies_arguments_one_pass_each() {
        let term = apply!(
            apply!(lambda!("x", lambda!("y", var!("x"))), var!("a")),
            var!("b")
        );
        let (reduced, events) = trace_of(term);
        assert_eq!(reduced, var!("a"));
        assert_eq!(events, vec!["↪ β-reduce: x <- a", "↪ β-reduce: y <- b"]);
    }

    #[test]
    fn trace_renders_abstraction_arguments_in_full() {
        let term = apply!(lambda!("f", var!("f")), lambda!("x", var!("x")));
        let (reduced, events) = trace_of(term);
        assert_eq!(reduced, lambda!("x", var!("x")));
        assert_eq!(events, vec!["↪ β-reduce: f <- λx.x"]);
    }

    #[test]
    fn is_reduced_rejects_redexes_under_binders() {
        assert!(is_reduced(&lambda!("x", var!("x"))));
        assert!(is_reduced(&apply!(var!("a"), lambda!("x", var!("x")))));
        assert!(!is_reduced(&apply!(lambda!("x", var!("x")), var!("a"))));
        assert!(!is_reduced(&lambda!(
            "x",
            apply!(lambda!("y", var!("y")), var!("x"))
        )));
    }

    #[test]
    fn normal_forms_reduce_to_themselves() {
        for term in [
            var!("x"),
            lambda!("x", apply!(var!("x"), var!("y"))),
            apply!(var!("a"), apply!(var!("b"), var!("c"))),
        ] {
            assert_eq!(reduce(term.clone()), term);
        }
    }

    #[test]
    fn budget_stops_a_divergent_term() {
        let omega = apply!(
            lambda!("x", apply!(var!("x"), var!("x"))),
            lambda!("x", apply!(var!("x"), var!("x")))
        );
        let outcome = beta_reduce(omega.clone(), Some(10), &mut |_: Contraction| {});
        assert_eq!(outcome, Reduction::Exceeded(omega));
    }

    #[test]
    fn budget_large_enough_still_normalizes() {
        let term = apply!(lambda!("x", var!("x")), var!("a"));
        let outcome = beta_reduce(term, Some(10), &mut |_: Contraction| {});
        assert_eq!(outcome, Reduction::Normalized(var!("a")));
    }
}
