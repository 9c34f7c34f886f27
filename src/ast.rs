//! Statements and expressions of the array language.
//!
//! Both trees are generic over the identifier type `I`: the parser produces
//! `Expr<String>` / `Stmt<String>`, and resolution turns them into
//! `Expr<Var>` / `Stmt<Var>`, which is the only form the analysis consumes.

use std::fmt;

use crate::num::Num;
use crate::types::{Var, Vars};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr<I> {
    /// Variable reference
    Var(I),
    /// Array length: len(a)
    Len(I),
    /// Integer literal
    Int(Num),
    /// Negation: -e
    Neg(Box<Expr<I>>),
    /// Addition: e1 + e2
    Add(Box<Expr<I>>, Box<Expr<I>>),
    /// Subtraction: e1 - e2
    Sub(Box<Expr<I>>, Box<Expr<I>>),
    /// Multiplication: e1 * e2
    Mul(Box<Expr<I>>, Box<Expr<I>>),
    /// Division: e1 / e2
    Div(Box<Expr<I>>, Box<Expr<I>>),
    /// Boolean negation: !e
    Not(Box<Expr<I>>),
    /// Conjunction: e1 && e2
    And(Box<Expr<I>>, Box<Expr<I>>),
    /// Disjunction: e1 || e2
    Or(Box<Expr<I>>, Box<Expr<I>>),
    /// Equality: e1 == e2
    Eq(Box<Expr<I>>, Box<Expr<I>>),
    /// Less than: e1 < e2
    Lt(Box<Expr<I>>, Box<Expr<I>>),
    /// Greater than: e1 > e2
    Gt(Box<Expr<I>>, Box<Expr<I>>),
}

impl<I> Expr<I> {
    pub fn var(id: impl Into<I>) -> Self {
        Expr::Var(id.into())
    }

    pub fn len(id: impl Into<I>) -> Self {
        Expr::Len(id.into())
    }

    pub fn int(value: impl Into<Num>) -> Self {
        Expr::Int(value.into())
    }

    pub fn neg(self) -> Self {
        Expr::Neg(Box::new(self))
    }

    pub fn add(self, other: Self) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }

    pub fn sub(self, other: Self) -> Self {
        Expr::Sub(Box::new(self), Box::new(other))
    }

    pub fn mul(self, other: Self) -> Self {
        Expr::Mul(Box::new(self), Box::new(other))
    }

    pub fn div(self, other: Self) -> Self {
        Expr::Div(Box::new(self), Box::new(other))
    }

    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    pub fn and(self, other: Self) -> Self {
        Expr::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Self) -> Self {
        Expr::Or(Box::new(self), Box::new(other))
    }

    pub fn eq(self, other: Self) -> Self {
        Expr::Eq(Box::new(self), Box::new(other))
    }

    pub fn lt(self, other: Self) -> Self {
        Expr::Lt(Box::new(self), Box::new(other))
    }

    pub fn gt(self, other: Self) -> Self {
        Expr::Gt(Box::new(self), Box::new(other))
    }
}

impl<A> Expr<A> {
    /// Rebuilds the tree with every identifier passed through `f`.
    pub fn map_ident<B, F>(&self, f: &mut F) -> Expr<B>
    where
        F: FnMut(&A) -> B,
    {
        match self.try_map_ident(&mut |a: &A| Ok::<B, std::convert::Infallible>(f(a))) {
            Ok(expr) => expr,
            Err(never) => match never {},
        }
    }

    /// Fallible [`map_ident`][Expr::map_ident]: stops at the first error.
    pub fn try_map_ident<B, E, F>(&self, f: &mut F) -> Result<Expr<B>, E>
    where
        F: FnMut(&A) -> Result<B, E>,
    {
        let bin = |a: &Expr<A>, b: &Expr<A>, f: &mut F| -> Result<(Box<Expr<B>>, Box<Expr<B>>), E> {
            Ok((Box::new(a.try_map_ident(f)?), Box::new(b.try_map_ident(f)?)))
        };
        Ok(match self {
            Expr::Var(a) => Expr::Var(f(a)?),
            Expr::Len(a) => Expr::Len(f(a)?),
            Expr::Int(n) => Expr::Int(n.clone()),
            Expr::Neg(e) => Expr::Neg(Box::new(e.try_map_ident(f)?)),
            Expr::Not(e) => Expr::Not(Box::new(e.try_map_ident(f)?)),
            Expr::Add(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Add(a, b)
            }
            Expr::Sub(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Sub(a, b)
            }
            Expr::Mul(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Mul(a, b)
            }
            Expr::Div(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Div(a, b)
            }
            Expr::And(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::And(a, b)
            }
            Expr::Or(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Or(a, b)
            }
            Expr::Eq(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Eq(a, b)
            }
            Expr::Lt(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Lt(a, b)
            }
            Expr::Gt(a, b) => {
                let (a, b) = bin(a, b, f)?;
                Expr::Gt(a, b)
            }
        })
    }
}

/// Program statements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt<I> {
    /// Assignment: x := e
    Assign(I, Expr<I>),
    /// Loop: while (cond) { body }
    While(Expr<I>, Vec<Stmt<I>>),
    /// Conditional: if (cond) { then } else { else }
    If(Expr<I>, Vec<Stmt<I>>, Vec<Stmt<I>>),
    /// Array allocation: x := new Array[len]
    NewArray(I, Expr<I>),
    /// Array literal: x := [e1, ..., en]
    ArrayInit(I, Vec<Expr<I>>),
    /// Array read: x := a[i]
    Read(I, I, Expr<I>),
    /// Array write: a[i] := v
    Write(I, Expr<I>, Expr<I>),
    /// Deletion: delete x
    Delete(I),
}

impl<A> Stmt<A> {
    pub fn map_ident<B, F>(&self, f: &mut F) -> Stmt<B>
    where
        F: FnMut(&A) -> B,
    {
        match self.try_map_ident(&mut |a: &A| Ok::<B, std::convert::Infallible>(f(a))) {
            Ok(stmt) => stmt,
            Err(never) => match never {},
        }
    }

    pub fn try_map_ident<B, E, F>(&self, f: &mut F) -> Result<Stmt<B>, E>
    where
        F: FnMut(&A) -> Result<B, E>,
    {
        let block = |body: &[Stmt<A>], f: &mut F| -> Result<Vec<Stmt<B>>, E> {
            body.iter().map(|s| s.try_map_ident(f)).collect()
        };
        Ok(match self {
            Stmt::Assign(x, e) => Stmt::Assign(f(x)?, e.try_map_ident(f)?),
            Stmt::While(cond, body) => Stmt::While(cond.try_map_ident(f)?, block(body, f)?),
            Stmt::If(cond, then, else_) => {
                let cond = cond.try_map_ident(f)?;
                let then = block(then, f)?;
                Stmt::If(cond, then, block(else_, f)?)
            }
            Stmt::NewArray(x, len) => Stmt::NewArray(f(x)?, len.try_map_ident(f)?),
            Stmt::ArrayInit(x, elems) => {
                let x = f(x)?;
                let elems = elems.iter().map(|e| e.try_map_ident(f)).collect::<Result<_, _>>()?;
                Stmt::ArrayInit(x, elems)
            }
            Stmt::Read(x, a, i) => {
                let x = f(x)?;
                Stmt::Read(x, f(a)?, i.try_map_ident(f)?)
            }
            Stmt::Write(a, i, v) => {
                let a = f(a)?;
                let i = i.try_map_ident(f)?;
                Stmt::Write(a, i, v.try_map_ident(f)?)
            }
            Stmt::Delete(x) => Stmt::Delete(f(x)?),
        })
    }
}

impl Vars {
    /// Resolves a name-keyed expression, interning unseen names.
    pub fn resolve_expr(&mut self, expr: &Expr<String>) -> Expr<Var> {
        expr.map_ident(&mut |name: &String| self.intern(name))
    }

    /// Resolves a name-keyed statement, interning unseen names.
    pub fn resolve_stmt(&mut self, stmt: &Stmt<String>) -> Stmt<Var> {
        stmt.map_ident(&mut |name: &String| self.intern(name))
    }
}

impl<I: fmt::Display> fmt::Display for Expr<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Var(x) => write!(f, "{}", x),
            Expr::Len(x) => write!(f, "len({})", x),
            Expr::Int(n) => write!(f, "{}", n),
            Expr::Neg(e) => write!(f, "-{}", e),
            Expr::Add(a, b) => write!(f, "({} + {})", a, b),
            Expr::Sub(a, b) => write!(f, "({} - {})", a, b),
            Expr::Mul(a, b) => write!(f, "({} * {})", a, b),
            Expr::Div(a, b) => write!(f, "({} / {})", a, b),
            Expr::Not(e) => write!(f, "!{}", e),
            Expr::And(a, b) => write!(f, "({} && {})", a, b),
            Expr::Or(a, b) => write!(f, "({} || {})", a, b),
            Expr::Eq(a, b) => write!(f, "({} == {})", a, b),
            Expr::Lt(a, b) => write!(f, "({} < {})", a, b),
            Expr::Gt(a, b) => write!(f, "({} > {})", a, b),
        }
    }
}

impl<I: fmt::Display> fmt::Display for Stmt<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Assign(x, e) => write!(f, "{} := {}", x, e),
            Stmt::While(cond, body) => write!(f, "while {} {{ {} stmts }}", cond, body.len()),
            Stmt::If(cond, then, else_) => {
                write!(f, "if {} {{ {} stmts }} else {{ {} stmts }}", cond, then.len(), else_.len())
            }
            Stmt::NewArray(x, len) => write!(f, "{} := new Array[{}]", x, len),
            Stmt::ArrayInit(x, elems) => {
                write!(f, "{} := [", x)?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e)?;
                }
                write!(f, "]")
            }
            Stmt::Read(x, a, i) => write!(f, "{} := {}[{}]", x, a, i),
            Stmt::Write(a, i, v) => write!(f, "{}[{}] := {}", a, i, v),
            Stmt::Delete(x) => write!(f, "delete {}", x),
        }
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn name(s: &str) -> String {
        s.to_string()
    }

    #[test]
    fn test_display_expr() {
        let e: Expr<String> = Expr::var(name("x")).add(Expr::int(1)).mul(Expr::len(name("a")));
        assert_eq!(e.to_string(), "((x + 1) * len(a))");
    }

    #[test]
    fn test_display_stmt() {
        let s: Stmt<String> = Stmt::ArrayInit(name("a"), vec![Expr::int(1), Expr::int(2)]);
        assert_eq!(s.to_string(), "a := [1, 2]");
        let s: Stmt<String> = Stmt::Write(name("a"), Expr::int(0), Expr::var(name("x")).neg());
        assert_eq!(s.to_string(), "a[0] := -x");
    }

    #[test]
    fn test_resolve_stmt() {
        let mut vars = Vars::new();
        let src: Stmt<String> = Stmt::Read(name("y"), name("a"), Expr::var(name("y")).sub(Expr::int(1)));
        let resolved = vars.resolve_stmt(&src);

        let y = vars.get("y").unwrap();
        let a = vars.get("a").unwrap();
        assert_eq!(resolved, Stmt::Read(y, a, Expr::Var(y).sub(Expr::int(1))));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_resolve_expr_shares_slots() {
        let mut vars = Vars::new();
        let src: Expr<String> = Expr::var(name("x")).div(Expr::var(name("x")).add(Expr::len(name("b"))));
        let resolved = vars.resolve_expr(&src);

        let x = vars.get("x").unwrap();
        let b = vars.get("b").unwrap();
        assert_eq!(resolved, Expr::Var(x).div(Expr::Var(x).add(Expr::Len(b))));
        assert_eq!(resolved.to_string(), "(v0 / (v0 + len(v1)))");
    }

    #[test]
    fn test_resolve_nested_bodies() {
        let mut vars = Vars::new();
        let src: Stmt<String> = Stmt::While(
            Expr::var(name("i")).lt(Expr::len(name("a"))),
            vec![Stmt::Assign(name("i"), Expr::var(name("i")).add(Expr::int(1)))],
        );
        let resolved = vars.resolve_stmt(&src);
        let back = resolved.map_ident(&mut |v: &Var| vars.name(*v).unwrap().to_string());
        assert_eq!(back, src);
    }

    #[test]
    fn test_try_map_ident_fails_fast() {
        let vars = Vars::new();
        let src: Expr<String> = Expr::var(name("missing")).add(Expr::int(2));
        let res = src.try_map_ident(&mut |n: &String| vars.get(n).ok_or_else(|| n.clone()));
        assert_eq!(res, Err(name("missing")));
    }
}
