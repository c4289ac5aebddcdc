//! # hex-mcts
//!
//! Monte Carlo Tree Search agents for the connection game Hex.
//!
//! The crate has two halves:
//!
//! - A Hex board model ([`GameState`]) that detects wins incrementally with a
//!   pair of union-find structures, one per player, each wired to that
//!   player's two board edges.
//! - A family of MCTS agents ([`MctsAgent`]) sharing one select / expand /
//!   rollout / backup skeleton and differing only in their
//!   [`SearchPolicy`](policy::SearchPolicy).
//!
//! ## Features
//!
//! - Plain UCT, RAVE, Decisive-Move, Last-Good-Reply, Pool-RAVE,
//!   UCB1-Tuned and Quality-Based search variants
//! - Arena-allocated search tree with cheap re-rooting on committed moves
//! - Wall-clock or rollout-count search budgets
//! - Seedable random source for reproducible searches
//!
//! ## Basic Usage
//!
//! ```
//! use hex_mcts::{BestMove, GameState, MctsConfig, UctAgent};
//!
//! fn main() -> Result<(), hex_mcts::HexError> {
//!     let mut game = GameState::new(4);
//!     let config = MctsConfig::default().with_seed(7);
//!     let mut agent = UctAgent::new(&game, config)?;
//!
//!     while game.winner().is_none() {
//!         agent.search_rollouts(50)?;
//!         match agent.best_move() {
//!             BestMove::Play(cell) => {
//!                 game.play(cell)?;
//!                 agent.play_move(cell)?;
//!             }
//!             BestMove::GameOver => break,
//!         }
//!     }
//!
//!     println!("{}", game);
//!     println!("winner: {}", game.winner());
//!     Ok(())
//! }
//! ```
//!
//! ## Choosing a variant at runtime
//!
//! ```
//! use hex_mcts::{AgentKind, GameState, MctsConfig};
//!
//! let game = GameState::new(5);
//! let kind: AgentKind = "rave".parse().unwrap();
//! let mut agent = kind.build(&game, MctsConfig::default().with_seed(1)).unwrap();
//! agent.search_rollouts(20).unwrap();
//! let stats = agent.statistics();
//! assert_eq!(stats.rollouts, 20);
//! ```

pub mod config;
pub mod game_state;
pub mod mcts;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod union_find;
pub mod utils;

pub use config::MctsConfig;
pub use game_state::{Cell, GameState, Player, Point};
pub use mcts::{
    Agent, AgentKind, BestMove, DecisiveMoveAgent, LgrAgent, MctsAgent, PoolRaveAgent, QbAgent,
    RaveAgent, SearchBudget, SearchRng, Ucb1TunedAgent, UctAgent,
};
pub use policy::SearchPolicy;
pub use stats::SearchStatistics;
pub use tree::{Node, NodeId, Tree};
pub use union_find::UnionFind;

/// Error types for board mutation, agent construction and search
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum HexError {
    /// A stone was placed on a cell that already holds one
    #[error("Cell occupied: {cell}")]
    CellOccupied { cell: Cell },

    /// A cell lies outside the board
    #[error("Cell {cell} is outside a {size}x{size} board")]
    OutOfBounds { cell: Cell, size: usize },

    /// `set_turn` was given something other than white or black
    #[error("Invalid turn: {0}")]
    InvalidTurn(u8),

    /// A numeric player id outside {0, 1, 2}
    #[error("Invalid player id: {0}")]
    InvalidPlayer(u8),

    /// A cell string that is not in letter-number form
    #[error("Invalid cell: {0}")]
    InvalidCell(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An agent name that no variant answers to
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),
}

/// Result type for board and search operations
pub type Result<T> = std::result::Result<T, HexError>;
