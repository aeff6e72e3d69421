use clap::Parser;
use log::info;
use peg_solitaire_solver::config::{HintDeadline, Settings, ANIMATION_START_DELAY};
use peg_solitaire_solver::engine::{Game, Outcome};
use peg_solitaire_solver::topology::Layout;
use peg_solitaire_solver::utils::replay_boards;
use peg_solitaire_solver::{SearchResult, Solvability};
use std::io::{self, Write};
use std::thread;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play peg solitaire in the terminal", long_about = None)]
struct Args {
    /// Starting layout, e.g. solitaire, diamond, x-it, tri-hole-2-1
    #[clap(short, long, default_value = "solitaire")]
    layout: Layout,

    /// Check solvability after every move
    #[clap(long)]
    hint: bool,

    /// Hint search deadline in seconds (1, 3, 5 or 7)
    #[clap(short, long, default_value_t = 3)]
    deadline: u64,

    /// Playback speed from 0 (paused) to 40
    #[clap(short, long, default_value_t = 20)]
    speed: u32,
}

fn hint_message(result: &SearchResult) -> String {
    match result.solvability() {
        Solvability::Solvable => "Hint: this board can still be solved to one peg.".to_string(),
        Solvability::Unsolvable(pegs) => format!(
            "Hint: one peg is out of reach; the best is {} pegs.",
            pegs
        ),
        Solvability::Unknown => "Hint: unknown, the search ran out of time.".to_string(),
    }
}

fn show_hint(game: &Game, settings: &Settings) {
    if !settings.hint || game.is_game_over() {
        return;
    }
    println!("Thinking...");
    match game.analyze(&settings.solve_options()) {
        Ok(result) => println!("{}", hint_message(&result)),
        Err(e) => println!("Hint unavailable: {}", e),
    }
}

/// Solves the current position and plays the solution back step by step.
fn play_back_solution(game: &Game, settings: &Settings) {
    println!("Searching for a solution ({})...", settings.deadline);
    let result = match game.analyze(&settings.playback_options()) {
        Ok(result) => result,
        Err(e) => {
            println!("Cannot solve this board: {}", e);
            return;
        }
    };
    if result.solvability() == Solvability::Unknown {
        println!("The solution is unknown.");
        return;
    }
    println!(
        "The board can be solved to a minimum of {} peg(s) in {} move(s).",
        result.minimum_peg_count,
        result.move_path.len()
    );

    let boards = match replay_boards(game.board(), game.topology(), &result.move_path) {
        Ok(boards) => boards,
        Err(e) => {
            println!("Playback failed: {}", e);
            return;
        }
    };
    let Some(delay) = settings.animation_delay() else {
        println!("Playback is paused (speed 0).");
        return;
    };
    thread::sleep(ANIMATION_START_DELAY);
    for (step, (mv, board)) in result.move_path.iter().zip(boards.iter().skip(1)).enumerate() {
        println!("Step {}: {}", step + 1, mv);
        println!("{}\n", board.to_string_with_highlight(Some(mv.to)));
        thread::sleep(delay);
    }
}

fn parse_position(row: &str, col: &str) -> Option<(usize, usize)> {
    Some((row.parse().ok()?, col.parse().ok()?))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut settings = match Settings::new(args.hint, args.deadline, args.speed) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };
    let mut game = Game::new(args.layout);
    info!("Starting {} on the {} board", game.layout(), game.topology());
    println!("Welcome to Peg Solitaire!");

    loop {
        println!("---------------------");
        println!(
            "{}: {} pegs, {} moves",
            game.layout(),
            game.board().peg_count(),
            game.history().len()
        );
        println!("{}", game.board());

        if let Some(outcome) = game.outcome() {
            println!("---------------------");
            match outcome {
                Outcome::Win => println!("You Win!"),
                Outcome::Lose => println!("You Lose! {} pegs remain.", game.board().peg_count()),
            }
            println!("Enter 'u' to undo, 'n' for a new game, or 'q' to quit.");
        }

        print!("Move (row col row col), 'u' undo, 'h' hints, 't N' deadline, 's' solve, 'n' new, 'q' quit: ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["q"] => {
                println!("Thanks for playing!");
                break;
            }
            ["u"] => match game.undo_last_move() {
                Some(mv) => {
                    println!("Undid {}.", mv);
                    show_hint(&game, &settings);
                }
                None => println!("Nothing to undo."),
            },
            ["n"] => game.restart(),
            ["h"] => {
                settings.hint = !settings.hint;
                println!("Hints {}.", if settings.hint { "on" } else { "off" });
                show_hint(&game, &settings);
            }
            ["t", seconds] => match seconds.parse::<u64>().map(HintDeadline::try_from) {
                Ok(Ok(deadline)) => {
                    settings.deadline = deadline;
                    println!("Hint deadline set to {}.", deadline);
                }
                Ok(Err(e)) => println!("{}", e),
                Err(_) => println!("Deadline must be a number of seconds."),
            },
            ["s"] => play_back_solution(&game, &settings),
            [r1, c1, r2, c2] => match (parse_position(r1, c1), parse_position(r2, c2)) {
                (Some(from), Some(to)) => match game.process_move(from, to) {
                    Ok(mv) => {
                        println!("Moved {}.", mv);
                        show_hint(&game, &settings);
                    }
                    Err(e) => println!("Invalid move: {}", e),
                },
                _ => println!("Invalid input: positions must be numbers, e.g. '1 3 3 3'."),
            },
            _ => println!("Invalid input format."),
        }
    }
}
