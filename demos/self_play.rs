//! Self-play example for the Hex agents
//!
//! Pits two search variants against each other and prints the game.
//!
//! ```text
//! cargo run --example self_play -- [white] [black] [size] [millis]
//! cargo run --example self_play -- rave qb 7 500
//! ```

use std::env;
use std::time::Duration;

use hex_mcts::{AgentKind, BestMove, GameState, MctsConfig, Player};

fn main() {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let white_kind = parse_kind(args.first(), AgentKind::Rave);
    let black_kind = parse_kind(args.get(1), AgentKind::Uct);
    let size = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(6);
    let think = Duration::from_millis(args.get(3).and_then(|s| s.parse().ok()).unwrap_or(300));

    println!("Hex Self-Play Example");
    println!("=====================");
    println!("{} (white) vs {} (black) on {}x{}", white_kind, black_kind, size, size);
    println!();

    let mut game = GameState::new(size);
    let config = MctsConfig::default();
    let mut white = white_kind
        .build(&game, config.clone())
        .expect("default configuration is valid");
    let mut black = black_kind
        .build(&game, config)
        .expect("default configuration is valid");

    while !game.is_terminal() {
        let mover = if game.turn() == Player::White {
            &mut white
        } else {
            &mut black
        };

        mover.search(think).expect("search on a legal position");
        let stats = mover.statistics();
        let cell = match mover.best_move() {
            BestMove::Play(cell) => cell,
            BestMove::GameOver => break,
        };

        println!(
            "{} plays {} ({} rollouts, {} nodes)",
            game.turn(),
            cell,
            stats.rollouts,
            stats.node_count
        );

        game.play(cell).expect("agents only suggest empty cells");
        white.play_move(cell).expect("white mirrors the game");
        black.play_move(cell).expect("black mirrors the game");
    }

    println!();
    println!("{}", game);
    println!();
    let winner = match game.winner() {
        Player::White => white_kind,
        _ => black_kind,
    };
    println!("{} wins ({})", game.winner(), winner);
}

fn parse_kind(arg: Option<&String>, default: AgentKind) -> AgentKind {
    match arg {
        Some(name) => name.parse().unwrap_or_else(|err| {
            eprintln!("{}; using {}", err, default);
            default
        }),
        None => default,
    }
}
