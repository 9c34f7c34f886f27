//! Abstract transfer functions for expressions and statements.
//!
//! | Statement              | Effect                                        |
//! |------------------------|-----------------------------------------------|
//! | `x := e`               | `x` gets the property of `e`                  |
//! | `x := [e1, ..., en]`   | `x` gets `arr[n, n]`                          |
//! | `x := new Array[e]`    | `x` gets `arr` of `e`'s interval, or unknown  |
//! | `x := a[e]`            | `x` gets unknown                              |
//! | `a[e] := v`            | no change                                     |
//! | `delete x`             | `x` is removed                                |
//! | `while` / `if`         | no change (control flow lives in the CFG)     |

use log::debug;

use crate::ast::{Expr, Stmt};
use crate::config::UndefinedPolicy;
use crate::error::{AnalysisError, Result};
use crate::interval::Interval;
use crate::property::Property;
use crate::state::State;
use crate::types::Var;

/// Transfer functions, parameterised by the undefined-variable policy.
#[derive(Debug, Copy, Clone, Default)]
pub struct Transfer {
    pub policy: UndefinedPolicy,
}

impl Transfer {
    pub fn new(policy: UndefinedPolicy) -> Self {
        Self { policy }
    }

    fn lookup(&self, state: &State, var: Var) -> Result<Property> {
        match state.get(var) {
            Some(prop) => Ok(prop.clone()),
            None => match self.policy {
                UndefinedPolicy::Strict => Err(AnalysisError::UndefinedVariable { var }),
                UndefinedPolicy::Unknown => {
                    debug!("read of undefined variable {}, assuming unknown", var);
                    Ok(Property::Unknown)
                }
            },
        }
    }

    /// Abstract value of `expr` in `state`.
    pub fn analyze_expression(&self, state: &State, expr: &Expr<Var>) -> Result<Property> {
        let prop = match expr {
            Expr::Var(x) => self.lookup(state, *x)?,
            Expr::Int(n) => Property::Num(Interval::constant(n.clone())),
            // An undefined array has no length either.
            Expr::Len(x) => state.get(*x).map_or(Property::Unknown, Property::length),
            Expr::Neg(e) => self.analyze_expression(state, e)?.neg(),
            Expr::Add(a, b) => {
                let (a, b) = self.operands(state, a, b)?;
                a.add(&b)
            }
            Expr::Sub(a, b) => {
                let (a, b) = self.operands(state, a, b)?;
                a.sub(&b)
            }
            Expr::Mul(a, b) => {
                let (a, b) = self.operands(state, a, b)?;
                a.mul(&b)
            }
            Expr::Div(a, b) => {
                let (a, b) = self.operands(state, a, b)?;
                a.div(&b)
            }
            Expr::Not(_)
            | Expr::And(_, _)
            | Expr::Or(_, _)
            | Expr::Eq(_, _)
            | Expr::Lt(_, _)
            | Expr::Gt(_, _) => Property::Unknown,
        };
        Ok(prop)
    }

    fn operands(&self, state: &State, a: &Expr<Var>, b: &Expr<Var>) -> Result<(Property, Property)> {
        Ok((self.analyze_expression(state, a)?, self.analyze_expression(state, b)?))
    }

    /// State after executing `stmt` from `state`.
    pub fn analyze_statement(&self, state: &State, stmt: &Stmt<Var>) -> Result<State> {
        let mut result = state.clone();
        match stmt {
            Stmt::Assign(x, e) => {
                let prop = self.analyze_expression(state, e)?;
                result.set(*x, prop);
            }
            Stmt::ArrayInit(x, elems) => {
                result.set(*x, Property::Arr(Interval::constant(elems.len())));
            }
            Stmt::NewArray(x, len) => {
                let prop = match self.analyze_expression(state, len)? {
                    Property::Num(iv) => Property::Arr(iv),
                    _ => Property::Unknown,
                };
                result.set(*x, prop);
            }
            Stmt::Read(x, _, _) => {
                result.set(*x, Property::Unknown);
            }
            Stmt::Delete(x) => {
                result.remove(*x);
            }
            Stmt::Write(_, _, _) | Stmt::While(_, _) | Stmt::If(_, _, _) => {}
        }
        Ok(result)
    }
}

/// [`Transfer::analyze_expression`] under the strict policy.
pub fn analyze_expression(state: &State, expr: &Expr<Var>) -> Result<Property> {
    Transfer::default().analyze_expression(state, expr)
}

/// [`Transfer::analyze_statement`] under the strict policy.
pub fn analyze_statement(state: &State, stmt: &Stmt<Var>) -> Result<State> {
    Transfer::default().analyze_statement(state, stmt)
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::types::Vars;

    fn setup() -> (Vars, Var, Var, Var) {
        let mut vars = Vars::new();
        let x = vars.intern("x");
        let y = vars.intern("y");
        let a = vars.intern("a");
        (vars, x, y, a)
    }

    #[test]
    fn test_assign_constant() {
        let (_, x, _, _) = setup();
        let result = analyze_statement(&State::new(), &Stmt::Assign(x, Expr::int(42))).unwrap();
        let expected: State = [(x, Property::constant(42))].into_iter().collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn test_assign_arith() {
        let (_, x, y, _) = setup();
        let mut state = State::new();
        state.set(x, Property::num(Interval::new(0, 10)));

        // y := (x + 1) * 2
        let e = Expr::Var(x).add(Expr::int(1)).mul(Expr::int(2));
        let result = analyze_statement(&state, &Stmt::Assign(y, e)).unwrap();
        assert_eq!(result.get(y), Some(&Property::num(Interval::new(2, 22))));
        assert_eq!(result.get(x), state.get(x));
    }

    #[test]
    fn test_sub_and_neg() {
        let (_, x, _, _) = setup();
        let mut state = State::new();
        state.set(x, Property::num(Interval::new(2, 3)));

        let sub = analyze_expression(&state, &Expr::int(10).sub(Expr::Var(x))).unwrap();
        assert_eq!(sub, Property::num(Interval::new(8, 7)));

        let neg = analyze_expression(&state, &Expr::Var(x).neg()).unwrap();
        assert_eq!(neg, Property::num(Interval::new(-2, -3)));
    }

    #[test]
    fn test_div_by_literal_zero() {
        let (_, x, _, _) = setup();
        let mut state = State::new();
        state.set(x, Property::num(Interval::new(1, 9)));
        let e = Expr::Var(x).div(Expr::int(0));
        assert_eq!(analyze_expression(&state, &e).unwrap(), Property::Unknown);
    }

    #[test]
    fn test_boolean_ops_are_unknown() {
        let (_, x, _, _) = setup();
        let mut state = State::new();
        state.set(x, Property::constant(1));
        let exprs = [
            Expr::Var(x).lt(Expr::int(5)),
            Expr::Var(x).gt(Expr::int(5)),
            Expr::Var(x).eq(Expr::int(5)),
            Expr::Var(x).lt(Expr::int(5)).not(),
            Expr::Var(x).lt(Expr::int(5)).and(Expr::Var(x).gt(Expr::int(0))),
            Expr::Var(x).lt(Expr::int(5)).or(Expr::Var(x).gt(Expr::int(0))),
        ];
        for e in &exprs {
            assert_eq!(analyze_expression(&state, e).unwrap(), Property::Unknown, "{}", e);
        }
    }

    #[test]
    fn test_array_length_roundtrip() {
        let (_, _, _, a) = setup();
        let state = analyze_statement(&State::new(), &Stmt::NewArray(a, Expr::int(5))).unwrap();
        assert_eq!(state.get(a), Some(&Property::arr(Interval::constant(5))));
        assert_eq!(analyze_expression(&state, &Expr::Len(a)).unwrap(), Property::constant(5));
    }

    #[test]
    fn test_new_array_unknown_length() {
        let (_, _, y, a) = setup();
        let mut state = State::new();
        state.set(y, Property::arr(Interval::constant(2)));
        let result = analyze_statement(&state, &Stmt::NewArray(a, Expr::Var(y))).unwrap();
        assert_eq!(result.get(a), Some(&Property::Unknown));
    }

    #[test]
    fn test_len_of_scalar_is_unknown() {
        let (_, x, _, _) = setup();
        let mut state = State::new();
        state.set(x, Property::constant(3));
        assert_eq!(analyze_expression(&state, &Expr::Len(x)).unwrap(), Property::Unknown);
    }

    #[test]
    fn test_array_init() {
        let (_, _, _, a) = setup();
        let stmt = Stmt::ArrayInit(a, vec![Expr::int(1), Expr::int(2), Expr::int(3)]);
        let result = analyze_statement(&State::new(), &stmt).unwrap();
        assert_eq!(result.get(a), Some(&Property::arr(Interval::constant(3))));
    }

    #[test]
    fn test_read_write() {
        let (_, x, _, a) = setup();
        let mut state = State::new();
        state.set(a, Property::arr(Interval::constant(4)));
        state.set(x, Property::constant(1));

        let read = analyze_statement(&state, &Stmt::Read(x, a, Expr::int(0))).unwrap();
        assert_eq!(read.get(x), Some(&Property::Unknown));

        let write = analyze_statement(&state, &Stmt::Write(a, Expr::int(0), Expr::int(9))).unwrap();
        assert_eq!(write, state);
    }

    #[test]
    fn test_control_statements_are_noops() {
        let (_, x, _, _) = setup();
        let mut state = State::new();
        state.set(x, Property::constant(0));
        let cond = Expr::Var(x).lt(Expr::int(5));
        let body = vec![Stmt::Assign(x, Expr::Var(x).add(Expr::int(1)))];

        let w = analyze_statement(&state, &Stmt::While(cond.clone(), body.clone())).unwrap();
        assert_eq!(w, state);
        let i = analyze_statement(&state, &Stmt::If(cond, body, vec![])).unwrap();
        assert_eq!(i, state);
    }

    #[test]
    fn test_delete_removes_key() {
        let (_, x, y, _) = setup();
        let mut state = State::new();
        state.set(x, Property::constant(1));
        let result = analyze_statement(&state, &Stmt::Delete(x)).unwrap();
        assert!(!result.contains(x));

        // A later read is a contract violation, not `Unknown`.
        let err = analyze_statement(&result, &Stmt::Assign(y, Expr::Var(x))).unwrap_err();
        assert_eq!(err, AnalysisError::UndefinedVariable { var: x });
    }

    #[test]
    fn test_undefined_policy_unknown() {
        let (_, x, y, _) = setup();
        let transfer = Transfer::new(UndefinedPolicy::Unknown);
        let result = transfer
            .analyze_statement(&State::new(), &Stmt::Assign(y, Expr::Var(x).add(Expr::int(1))))
            .unwrap();
        assert_eq!(result.get(y), Some(&Property::Unknown));
        assert!(!result.contains(x));
    }
}
