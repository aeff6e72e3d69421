use clap::Parser;
use log::info;
use peg_solitaire_solver::engine::Board;
use peg_solitaire_solver::solver::{solve_with, SolveOptions};
use peg_solitaire_solver::topology::{Layout, Topology};
use peg_solitaire_solver::utils::{parse_board, random_playout, replay_boards};
use peg_solitaire_solver::{SearchResult, Solvability};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Catalogue layout to solve, used when no board file is given
    #[clap(short, long, default_value = "solitaire")]
    layout: Layout,

    /// Search deadline in seconds
    #[clap(short, long, default_value_t = 3)]
    deadline: u64,

    /// Always search, even when the Solitaire shortcut would answer
    #[clap(long)]
    playback: bool,

    /// Give triangle boards a fixed 3 second deadline
    #[clap(long)]
    fixed_triangle_deadline: bool,

    /// Play this many random moves from the layout before solving
    #[clap(long, default_value_t = 0)]
    scramble: usize,

    /// Seed for the random scramble
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// Path to a board file (7x7 grid of 'O', '.' and '#')
    board_file: Option<PathBuf>,
}

fn read_board_file(path: &PathBuf) -> Result<(Board, Topology), String> {
    let content = fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;
    parse_board(&content).map_err(|e| format!("Invalid board format: {}", e))
}

fn load_board(args: &Args) -> Result<(Board, Topology), String> {
    if let Some(path) = &args.board_file {
        if args.scramble > 0 {
            return Err("--scramble only applies to catalogue layouts".to_string());
        }
        let loaded = read_board_file(path)?;
        println!("Loaded board from {}\n", path.display());
        return Ok(loaded);
    }

    let topology = args.layout.topology();
    if args.scramble == 0 {
        return Ok((Board::from_layout(args.layout), topology));
    }
    let mut rng = SmallRng::seed_from_u64(args.seed);
    let (board, played) = random_playout(args.layout, args.scramble, &mut rng);
    println!("Scrambled {} with {} random move(s) (seed {}):", args.layout, played.len(), args.seed);
    for mv in &played {
        println!("  {}", mv);
    }
    println!();
    Ok((board, topology))
}

fn print_result(result: &SearchResult) {
    match result.solvability() {
        Solvability::Solvable => println!("Solvable: one peg can remain."),
        Solvability::Unsolvable(pegs) => println!("Unsolvable: at least {} pegs remain.", pegs),
        Solvability::Unknown => println!("Unknown: the deadline passed before the search finished."),
    }
    println!("Start pegs: {}", result.start_peg_count);
    println!("Minimum pegs: {}", result.minimum_peg_count);
    println!("States visited: {}", result.states_visited);
    println!("Search nodes: {}", result.nodes);
    println!("Elapsed: {:.3}s\n", result.elapsed.as_secs_f64());
}

fn run(args: &Args) -> Result<(), String> {
    let (mut board, topology) = load_board(args)?;
    println!("Initial board state ({}):\n{}\n", topology, board);

    let mut options = if args.playback {
        SolveOptions::for_playback(Duration::from_secs(args.deadline))
    } else {
        SolveOptions::with_deadline(Duration::from_secs(args.deadline))
    };
    options.fixed_triangle_deadline = args.fixed_triangle_deadline;
    println!(
        "Searching with a deadline of {:?}...\n",
        options.effective_deadline(topology)
    );

    let result = solve_with(&mut board, topology, &options).map_err(|e| format!("Solver failed: {}", e))?;
    info!(
        "Search finished: {:?}, {} pegs, {} nodes",
        result.status, result.minimum_peg_count, result.nodes
    );
    print_result(&result);

    if result.move_path.is_empty() {
        if result.solvability() == Solvability::Solvable && !result.has_full_path() {
            println!("No moves recorded; rerun with --playback for the full line.");
        } else {
            println!("No moves made.");
        }
        return Ok(());
    }

    let boards = replay_boards(&board, topology, &result.move_path).map_err(|e| format!("Replay failed: {}", e))?;
    println!("Moves ({}):", result.move_path.len());
    for (i, (mv, step)) in result.move_path.iter().zip(boards.iter().skip(1)).enumerate() {
        println!("  Move {}: {}", i + 1, mv);
        println!("{}\n", step.to_string_with_highlight(Some(mv.to)));
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
