use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rivergate::board::{Board, Side};
use rivergate::dark::board::{DarkBoard, DarkStatus};
use rivergate::dark::movegen::dark_status;
use rivergate::dark::search::DarkEngine;
use rivergate::dark::DarkDifficulty;
use rivergate::logger::init_logging;
use rivergate::moves::execute::make_move;
use rivergate::moves::perft::perft;
use rivergate::search::Difficulty;
use rivergate::search::search::Engine;
use rivergate::status::{GameStatus, position_status};
use std::time::Instant;
use tracing::info;

fn main() {
    init_logging("logs/rivergate.log", "rivergate=debug");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("selfplay");

    match command {
        "selfplay" => {
            let difficulty = args.get(1).map_or(Difficulty::Medium, |s| parse_difficulty(s));
            let max_moves = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .unwrap_or(60usize);
            selfplay(difficulty, max_moves);
        }
        "dark" => {
            let difficulty = args
                .get(1)
                .map_or(DarkDifficulty::Medium, |s| parse_dark_difficulty(s));
            let max_actions = args
                .get(2)
                .and_then(|s| s.parse().ok())
                .unwrap_or(80usize);
            dark_selfplay(difficulty, max_actions);
        }
        "perft" => {
            let depth = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3u32);
            run_perft(depth);
        }
        _ => {
            eprintln!("usage: rivergate [selfplay|dark|perft] [difficulty|depth] [moves]");
        }
    }
}

fn parse_difficulty(s: &str) -> Difficulty {
    match s {
        "beginner" => Difficulty::Beginner,
        "easy" => Difficulty::Easy,
        "medium" => Difficulty::Medium,
        "hard" => Difficulty::Hard,
        "master" => Difficulty::Master,
        _ => Difficulty::Medium,
    }
}

fn parse_dark_difficulty(s: &str) -> DarkDifficulty {
    match s {
        "beginner" => DarkDifficulty::Beginner,
        "easy" => DarkDifficulty::Easy,
        "medium" => DarkDifficulty::Medium,
        "hard" => DarkDifficulty::Hard,
        _ => DarkDifficulty::Medium,
    }
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );
    bar
}

fn selfplay(difficulty: Difficulty, max_moves: usize) {
    let config = difficulty.config();
    let mut board = Board::new_game();
    let mut engine = Engine::new();
    let mut side = Side::Red;

    println!("self-play at {difficulty:?}, up to {max_moves} moves\n{board}\n");
    let bar = progress_bar(max_moves as u64);

    for ply in 0..max_moves {
        let Some(mv) = engine.find_best_move(&mut board, side, &config) else {
            bar.finish_and_clear();
            println!("{:?} has no move; {:?} wins", side, side.opposite());
            return;
        };
        make_move(&mut board, mv);
        info!(
            ply,
            %mv,
            side = ?side,
            nodes = engine.nodes_searched(),
            depth = engine.last_iteration_depth(),
            "played"
        );
        bar.set_message(format!("{side:?} {mv}"));
        bar.inc(1);
        side = side.opposite();

        if let GameStatus::Won(winner) = position_status(&mut board, side) {
            bar.finish_and_clear();
            println!("{board}\n{winner:?} wins after {} plies", ply + 1);
            return;
        }
    }

    bar.finish_and_clear();
    println!("{board}\nstopped after {max_moves} moves");
}

fn dark_selfplay(difficulty: DarkDifficulty, max_actions: usize) {
    let config = difficulty.config();
    let mut rng = SmallRng::from_os_rng();
    let mut board = DarkBoard::shuffled(&mut rng);
    let mut engine = DarkEngine::new();
    let mut side = Side::Red;

    println!("dark-chess self-play at {difficulty:?}\n{board}");
    let bar = progress_bar(max_actions as u64);

    for n in 0..max_actions {
        match dark_status(&board, side) {
            DarkStatus::Won(winner) => {
                bar.finish_and_clear();
                println!("{board}\n{winner:?} wins after {n} actions");
                return;
            }
            DarkStatus::Draw => {
                bar.finish_and_clear();
                println!("{board}\ndraw after {n} actions");
                return;
            }
            DarkStatus::InPlay => {}
        }

        let Some(action) = engine.find_best_action(&mut board, side, &config) else {
            break;
        };
        board.apply(action);
        info!(n, ?action, side = ?side, nodes = engine.nodes_searched(), "dark action");
        bar.inc(1);
        side = side.opposite();
    }

    bar.finish_and_clear();
    println!("{board}\nstopped after {max_actions} actions");
}

fn run_perft(depth: u32) {
    let mut board = Board::new_game();
    for d in 1..=depth {
        let start = Instant::now();
        let nodes = perft(&mut board, Side::Red, d);
        println!("perft({d}) = {nodes} ({} ms)", start.elapsed().as_millis());
    }
}
