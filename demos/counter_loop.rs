use clap::Parser;

use arrayflow::ast::{Expr, Stmt};
use arrayflow::cfg::{Cfg, ControlFlowGraph};
use arrayflow::config::{AnalysisConfig, UndefinedPolicy};
use arrayflow::fixpoint::FixpointEngine;
use arrayflow::types::Vars;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Loop bound `n` in `while (i < n)`.
    #[arg(value_name = "INT", default_value = "5")]
    bound: i64,

    /// Maximum number of recorded outer iterations.
    #[clap(long, value_name = "INT", default_value = "10")]
    fuel: usize,

    /// Treat reads of undefined variables as unknown instead of failing.
    #[clap(long)]
    lenient: bool,

    /// Print every snapshot, not just the latest one.
    #[clap(long)]
    all: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    println!("args = {:?}", args);

    // 0: a := new Array[n]
    // 1: i := 0
    // 2: while (i < len(a))
    // 3:   a[i] := i * 2
    // 4:   i := i + 1
    let mut vars = Vars::new();
    let a = vars.intern("a");
    let i = vars.intern("i");
    let nodes = vec![
        Stmt::NewArray(a, Expr::int(args.bound)),
        Stmt::Assign(i, Expr::int(0)),
        Stmt::While(Expr::Var(i).lt(Expr::Len(a)), vec![]),
        Stmt::Write(a, Expr::Var(i), Expr::Var(i).mul(Expr::int(2))),
        Stmt::Assign(i, Expr::Var(i).add(Expr::int(1))),
    ];
    let cfg = Cfg::with_edges(nodes, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 2), (2, 5)])?;

    for (index, stmt) in cfg.nodes().iter().enumerate() {
        println!("{:>2}: {}", index, stmt);
    }

    let config = AnalysisConfig {
        fuel: args.fuel,
        undefined: if args.lenient {
            UndefinedPolicy::Unknown
        } else {
            UndefinedPolicy::Strict
        },
    };
    let trace = FixpointEngine::new(config).run(&cfg)?;
    println!(
        "passes = {}, snapshots = {}, converged = {}",
        trace.passes(),
        trace.snapshots().len(),
        trace.converged()
    );

    let shown = if args.all { trace.snapshots().len() } else { 1 };
    for (k, snapshot) in trace.snapshots().iter().take(shown).enumerate() {
        println!("snapshot -{}:", k);
        for (index, block) in snapshot.iter() {
            println!("  {:>2}: entry = {}, exit = {}", index, block.entry, block.exit);
        }
    }

    for var in [a, i] {
        println!("{} = {}", vars.name(var).unwrap_or("?"), var);
    }

    Ok(())
}
