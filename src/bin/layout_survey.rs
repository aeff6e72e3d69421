use clap::Parser;
use log::warn;
use peg_solitaire_solver::engine::Board;
use peg_solitaire_solver::solver::{solve_with, SolveOptions};
use peg_solitaire_solver::topology::{Layout, Topology};
use peg_solitaire_solver::SearchStatus;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve every catalogue layout and summarise the results", long_about = None)]
struct Args {
    /// Search deadline per layout in seconds
    #[clap(short, long, default_value_t = 3)]
    deadline: u64,

    /// Only survey layouts of this topology (cross, octagon or triangle)
    #[clap(short, long)]
    topology: Option<Topology>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    let options = SolveOptions::for_playback(Duration::from_secs(args.deadline));

    let layouts: Vec<Layout> = Layout::ALL
        .into_iter()
        .filter(|layout| args.topology.map_or(true, |t| layout.topology() == t))
        .collect();

    println!("Surveying {} layouts with a {}s deadline...\n", layouts.len(), args.deadline);
    println!(
        "{:<16} {:<9} {:>6} {:>5} {:>8} {:>10} {:>9}",
        "Layout", "Topology", "Start", "Min", "Status", "States", "Elapsed"
    );

    let mut solved = 0;
    let mut unknown = 0;
    for layout in &layouts {
        let mut board = Board::from_layout(*layout);
        let result = match solve_with(&mut board, layout.topology(), &options) {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping {}: {}", layout, e);
                continue;
            }
        };
        let status = match result.status {
            SearchStatus::Solved => {
                solved += 1;
                "solved"
            }
            SearchStatus::Unknown => {
                unknown += 1;
                "unknown"
            }
        };
        println!(
            "{:<16} {:<9} {:>6} {:>5} {:>8} {:>10} {:>8.3}s",
            layout.name(),
            layout.topology().name(),
            result.start_peg_count,
            result.minimum_peg_count,
            status,
            result.states_visited,
            result.elapsed.as_secs_f64()
        );
    }

    println!("\n--- Survey Complete ---");
    println!("Solved exactly: {}", solved);
    println!("Ran out of time: {}", unknown);
}
