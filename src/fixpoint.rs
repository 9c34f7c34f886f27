//! Worklist fixpoint over a control-flow graph.
//!
//! One *pass* walks the graph breadth-first from node 0, visiting each node at
//! most once: its entry is the join of its predecessors' exits and its exit is
//! the transfer of its statement. Node 0 is the program entry and always starts
//! from the empty state, even when a back edge leads into it. A pass starts from the previous snapshot, so
//! a predecessor not yet visited in this pass (the source of a back edge)
//! contributes its exit from the previous pass.
//!
//! Passes are repeated until two consecutive snapshots are equal or the fuel
//! runs out. There is no widening: a counter incremented in a loop grows by one
//! step per pass, and the reported bound is whatever the last pass reached.

use std::collections::{BTreeMap, HashSet, VecDeque};

use log::{debug, trace, warn};

use crate::cfg::ControlFlowGraph;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::state::State;
use crate::transfer::Transfer;

/// States before and after one node.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Block {
    pub entry: State,
    pub exit: State,
}

/// One snapshot: a [`Block`] per node index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Analysis {
    blocks: BTreeMap<usize, Block>,
}

impl Analysis {
    /// All-empty blocks for every node, the virtual exit included.
    pub fn initial<G: ControlFlowGraph + ?Sized>(cfg: &G) -> Self {
        let blocks = (0..=cfg.exit()).map(|i| (i, Block::default())).collect();
        Self { blocks }
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(&index)
    }

    pub fn entry(&self, index: usize) -> Option<&State> {
        self.get(index).map(|b| &b.entry)
    }

    pub fn exit(&self, index: usize) -> Option<&State> {
        self.get(index).map(|b| &b.exit)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Block)> {
        self.blocks.iter().map(|(&i, b)| (i, b))
    }
}

/// Outcome of [`FixpointEngine::run`].
#[derive(Debug, Clone)]
pub struct Trace {
    initial: Analysis,
    snapshots: Vec<Analysis>,
    converged: bool,
    passes: usize,
}

impl Trace {
    /// Recorded snapshots, most recent first.
    pub fn snapshots(&self) -> &[Analysis] {
        &self.snapshots
    }

    pub fn into_snapshots(self) -> Vec<Analysis> {
        self.snapshots
    }

    /// The most recent snapshot, or the initial analysis if nothing changed.
    pub fn latest(&self) -> &Analysis {
        self.snapshots.first().unwrap_or(&self.initial)
    }

    /// Whether the last pass reproduced the previous snapshot.
    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Number of passes executed, including the final one that was not recorded.
    pub fn passes(&self) -> usize {
        self.passes
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixpointEngine {
    pub config: AnalysisConfig,
}

impl FixpointEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    fn transfer(&self) -> Transfer {
        Transfer::new(self.config.undefined)
    }

    /// Runs one pass starting from `previous`.
    pub fn pass<G: ControlFlowGraph + ?Sized>(&self, cfg: &G, previous: &Analysis) -> Result<Analysis> {
        let transfer = self.transfer();
        let nodes = cfg.nodes();

        let mut current = previous.clone();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut queue: VecDeque<usize> = VecDeque::from([0]);

        while let Some(i) = queue.pop_front() {
            if !visited.insert(i) {
                continue;
            }

            let entry = if i == 0 {
                State::new()
            } else {
                Self::join_predecessors(cfg, &current, i)
            };
            let exit = match nodes.get(i) {
                Some(stmt) => transfer.analyze_statement(&entry, stmt)?,
                None => State::new(),
            };
            trace!("node {}: entry = {}, exit = {}", i, entry, exit);

            current.blocks.insert(i, Block { entry, exit });
            queue.extend(cfg.successors(i).iter().copied());
        }

        debug!("Pass visited {} nodes", visited.len());
        Ok(current)
    }

    /// Join of the exits of `i`'s predecessors in `current`.
    fn join_predecessors<G: ControlFlowGraph + ?Sized>(cfg: &G, current: &Analysis, i: usize) -> State {
        State::join_all(cfg.predecessors(i).iter().filter_map(|&p| {
            let exit = current.exit(p);
            if exit.is_none() {
                warn!("Ignoring edge {} -> {}: no block for node {}", p, i, p);
            }
            exit
        }))
    }

    /// Iterates passes until two consecutive snapshots agree or fuel runs out.
    pub fn run<G: ControlFlowGraph + ?Sized>(&self, cfg: &G) -> Result<Trace> {
        let initial = Analysis::initial(cfg);
        let mut previous = initial.clone();
        let mut snapshots = Vec::new();
        let mut fuel = self.config.fuel;
        let mut passes = 0;

        let converged = loop {
            let next = self.pass(cfg, &previous)?;
            passes += 1;

            if next == previous {
                debug!("Fixpoint converged after {} passes", passes);
                break true;
            }
            if fuel == 0 {
                warn!("Fixpoint did not converge within {} iterations", self.config.fuel);
                break false;
            }

            fuel -= 1;
            debug!("Pass {} changed the analysis, fuel left: {}", passes, fuel);
            snapshots.push(next.clone());
            previous = next;
        };

        snapshots.reverse();
        Ok(Trace {
            initial,
            snapshots,
            converged,
            passes,
        })
    }
}

/// Snapshots of the default engine, most recent first.
pub fn analysis<G: ControlFlowGraph + ?Sized>(cfg: &G) -> Result<Vec<Analysis>> {
    Ok(FixpointEngine::default().run(cfg)?.into_snapshots())
}
