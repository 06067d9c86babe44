//! Synthesize diagnostic strategies for a small fault tree.
//!
//! Builds `Top = OR(A, AND(B, C))`, runs every synthesis algorithm, and
//! prints the resulting metrics side by side. Optionally dumps the chosen
//! strategy's diagram in DOT format.
//!
//! Run with:
//!   cargo run --example diagnose
//!   cargo run --example diagnose -- --dot cuda-prob

use clap::{Parser, ValueEnum};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use ddt_rs::bottom_up::{buda, buda_cost};
use ddt_rs::ddt::Ddt;
use ddt_rs::exact::{eda, eda_cost};
use ddt_rs::greedy::{cuda_cost, cuda_prob, cuda_size, pada_cost, pada_prob, pada_size};
use ddt_rs::tree::FaultTree;

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Strategy {
    Eda,
    EdaCost,
    Buda,
    BudaCost,
    CudaProb,
    CudaSize,
    CudaCost,
    PadaProb,
    PadaSize,
    PadaCost,
}

#[derive(Debug, Parser)]
struct Args {
    /// Print the DOT diagram of this strategy's output.
    #[arg(long, value_enum)]
    dot: Option<Strategy>,

    /// Verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

fn synthesize(strategy: Strategy, ft: &FaultTree) -> color_eyre::Result<Ddt> {
    let ddt = match strategy {
        Strategy::Eda => eda(&ft.to_expr()?, &ft.variables(), &ft.probabilities(), &ft.costs())?,
        Strategy::EdaCost => {
            eda_cost(&ft.to_expr()?, &ft.variables(), &ft.probabilities(), &ft.costs())?
        }
        Strategy::Buda => buda(ft)?,
        Strategy::BudaCost => buda_cost(ft)?,
        Strategy::CudaProb => cuda_prob(ft)?,
        Strategy::CudaSize => cuda_size(ft)?,
        Strategy::CudaCost => cuda_cost(ft)?,
        Strategy::PadaProb => pada_prob(ft)?,
        Strategy::PadaSize => pada_size(ft)?,
        Strategy::PadaCost => pada_cost(ft)?,
    };
    Ok(ddt.compress())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let mut ft = FaultTree::new();
    let a = ft.basic_event("A", 0.1, 1.0)?;
    let b = ft.basic_event("B", 0.2, 2.0)?;
    let c = ft.basic_event("C", 0.3, 1.0)?;
    let g1 = ft.and_gate("G1", [b, c])?;
    ft.or_gate("Top", [a, g1])?;

    println!("=== Fault tree ===");
    print!("{ft}");
    println!("unreliability: {}", ft.unreliability()?);
    println!("minimal cut sets:  {}", ft.cut_sets()?.len());
    println!("minimal path sets: {}", ft.path_sets()?.len());
    println!();

    println!("=== Strategies ===");
    println!(
        "{:<10} {:>10} {:>10} {:>10} {:>12}",
        "strategy", "fail prob", "E[height]", "E[cost]", "E[cost|fail]"
    );
    let strategies = [
        Strategy::Eda,
        Strategy::EdaCost,
        Strategy::Buda,
        Strategy::BudaCost,
        Strategy::CudaProb,
        Strategy::CudaSize,
        Strategy::CudaCost,
        Strategy::PadaProb,
        Strategy::PadaSize,
        Strategy::PadaCost,
    ];
    for strategy in strategies {
        let ddt = synthesize(strategy, &ft)?;
        println!(
            "{:<10} {:>10.4} {:>10.4} {:>10.4} {:>12.4}",
            format!("{strategy:?}"),
            ddt.failure_probability(),
            ddt.expected_height(),
            ddt.expected_cost(),
            ddt.expected_cost_given_failure(),
        );
    }

    if let Some(strategy) = args.dot {
        let ddt = synthesize(strategy, &ft)?;
        println!("\n=== DOT ({strategy:?}) ===");
        println!("{}", ddt.to_dot(ft.var_table())?);
    }

    Ok(())
}
