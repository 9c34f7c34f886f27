//! # arrayflow: interval analysis for a small array language
//!
//! **`arrayflow`** computes, for every point of a program's control-flow graph,
//! an over-approximation of each variable's value (an integer interval) and of
//! each array's length (also an interval). It is a classic forward dataflow
//! analysis: abstract transfer functions per statement, a lattice join at merge
//! points, and a worklist fixpoint bounded by a fixed number of passes.
//!
//! ## The domain
//!
//! Every variable maps to a [`Property`][crate::property::Property]:
//!
//! - `Num([l, h])`: a scalar in `l..=h`,
//! - `Arr([l, h])`: an array whose length is in `l..=h`,
//! - `Unknown`: nothing is known (mixed kinds, division by zero, comparisons).
//!
//! A variable absent from a [`State`][crate::state::State] is undefined at that point.
//!
//! ## Basic Usage
//!
//! ```rust
//! use arrayflow::ast::{Expr, Stmt};
//! use arrayflow::cfg::Cfg;
//! use arrayflow::fixpoint::FixpointEngine;
//! use arrayflow::interval::Interval;
//! use arrayflow::property::Property;
//! use arrayflow::types::Vars;
//!
//! let mut vars = Vars::new();
//! let a = vars.intern("a");
//! let n = vars.intern("n");
//!
//! // 0: a := new Array[5]
//! // 1: n := len(a) - 1
//! let nodes = vec![
//!     Stmt::NewArray(a, Expr::int(5)),
//!     Stmt::Assign(n, Expr::Len(a).sub(Expr::int(1))),
//! ];
//! let cfg = Cfg::with_edges(nodes, [(0, 1), (1, 2)]).unwrap();
//!
//! let trace = FixpointEngine::default().run(&cfg).unwrap();
//! assert!(trace.converged());
//!
//! let exit = trace.latest().exit(1).unwrap();
//! assert_eq!(exit.get(a), Some(&Property::arr(Interval::constant(5))));
//! assert_eq!(exit.get(n), Some(&Property::constant(4)));
//! ```
//!
//! ## Core Components
//!
//! - **[`ast`]**: statements and expressions, generic over identifiers.
//! - **[`property`]** and **[`state`]**: the lattice and its pointwise lifting.
//! - **[`transfer`]**: abstract semantics of expressions and statements.
//! - **[`fixpoint`]**: the worklist engine and its convergence trace.

pub mod ast;
pub mod cfg;
pub mod config;
pub mod error;
pub mod fixpoint;
pub mod interval;
pub mod num;
pub mod property;
pub mod state;
pub mod transfer;
pub mod types;

pub use error::AnalysisError;
pub use fixpoint::analysis;
