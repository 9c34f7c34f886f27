//! Control-flow graphs consumed by the fixpoint engine.
//!
//! Node `i` holds statement `nodes()[i]`. Index `0` is the program entry and
//! index `nodes().len()` is a *virtual exit* with no statement of its own.
//! Loops appear only as edges: a `while` node has an edge to the first node of
//! its body, the last body node has a back edge to the `while` node, and the
//! `while` node also has an edge to whatever follows the loop.

use crate::ast::Stmt;
use crate::error::{AnalysisError, Result};
use crate::types::Var;

/// Interface of a control-flow graph over resolved statements.
pub trait ControlFlowGraph {
    /// Statements, indexed by node.
    fn nodes(&self) -> &[Stmt<Var>];

    /// Predecessors of node `index` (valid for `0..=nodes().len()`).
    fn predecessors(&self, index: usize) -> &[usize];

    /// Successors of node `index` (valid for `0..=nodes().len()`).
    fn successors(&self, index: usize) -> &[usize];

    /// Index of the virtual exit node.
    fn exit(&self) -> usize {
        self.nodes().len()
    }
}

/// Adjacency-list CFG.
#[derive(Debug, Clone, Default)]
pub struct Cfg {
    nodes: Vec<Stmt<Var>>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,
}

impl Cfg {
    /// Creates a graph over `nodes` with no edges yet.
    pub fn new(nodes: Vec<Stmt<Var>>) -> Self {
        let n = nodes.len() + 1;
        Self {
            nodes,
            preds: vec![Vec::new(); n],
            succs: vec![Vec::new(); n],
        }
    }

    /// Adds the edge `from -> to`. Duplicate edges are ignored.
    pub fn add_edge(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.nodes.len();
        for index in [from, to] {
            if index > len {
                return Err(AnalysisError::NodeOutOfRange { index, len });
            }
        }
        if !self.succs[from].contains(&to) {
            self.succs[from].push(to);
        }
        if !self.preds[to].contains(&from) {
            self.preds[to].push(from);
        }
        Ok(())
    }

    /// Builds a graph and adds all `edges`.
    pub fn with_edges<E>(nodes: Vec<Stmt<Var>>, edges: E) -> Result<Self>
    where
        E: IntoIterator<Item = (usize, usize)>,
    {
        let mut cfg = Self::new(nodes);
        for (from, to) in edges {
            cfg.add_edge(from, to)?;
        }
        Ok(cfg)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl ControlFlowGraph for Cfg {
    fn nodes(&self) -> &[Stmt<Var>] {
        &self.nodes
    }

    fn predecessors(&self, index: usize) -> &[usize] {
        self.preds.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn successors(&self, index: usize) -> &[usize] {
        self.succs.get(index).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;
    use crate::ast::Expr;

    #[test]
    fn test_edges() {
        let x = Var::new(0);
        let nodes = vec![Stmt::Assign(x, Expr::int(0)), Stmt::Delete(x)];
        let cfg = Cfg::with_edges(nodes, [(0, 1), (1, 2), (0, 1)]).unwrap();

        assert_eq!(cfg.exit(), 2);
        assert_eq!(cfg.successors(0), &[1]);
        assert_eq!(cfg.predecessors(1), &[0]);
        assert_eq!(cfg.predecessors(2), &[1]);
        assert!(cfg.successors(2).is_empty());
        assert!(cfg.predecessors(0).is_empty());
    }

    #[test]
    fn test_edge_out_of_range() {
        let mut cfg = Cfg::new(vec![]);
        assert_eq!(cfg.exit(), 0);
        assert_eq!(cfg.add_edge(0, 1), Err(AnalysisError::NodeOutOfRange { index: 1, len: 0 }));
    }

    #[test]
    fn test_out_of_range_queries_are_empty() {
        let cfg = Cfg::new(vec![]);
        assert!(cfg.predecessors(7).is_empty());
        assert!(cfg.successors(7).is_empty());
    }
}
