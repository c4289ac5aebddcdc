//! Rollout policies
//!
//! A rollout plays a scratch copy of the position to the end and reports
//! the winner. RAVE-family policies also report every cell each colour
//! owns on the final board.

use std::collections::HashMap;

use rand::Rng;

use crate::{
    game_state::{Cell, GameState, Player},
    mcts::SearchRng,
    Result,
};

/// Outcome of one simulated game
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rollout {
    /// Player whose edges ended up connected
    pub winner: Player,

    /// White stones on the final board (empty unless RAVE points were requested)
    pub white_points: Vec<Cell>,

    /// Black stones on the final board (empty unless RAVE points were requested)
    pub black_points: Vec<Cell>,

    /// White stones placed over the whole game, rollout included
    pub white_played: usize,

    /// Black stones placed over the whole game, rollout included
    pub black_played: usize,
}

impl Rollout {
    /// Records the result of a finished game
    pub fn finished(state: &GameState) -> Self {
        Rollout {
            winner: state.winner(),
            white_points: Vec::new(),
            black_points: Vec::new(),
            white_played: state.num_played(Player::White),
            black_played: state.num_played(Player::Black),
        }
    }

    /// Records the result together with each colour's final stones
    pub fn with_rave_points(state: &GameState) -> Self {
        Rollout {
            white_points: state.stones(Player::White),
            black_points: state.stones(Player::Black),
            ..Self::finished(state)
        }
    }

    /// Stones on the final board belonging to `color`
    pub fn points(&self, color: Player) -> &[Cell] {
        match color {
            Player::White => &self.white_points,
            Player::Black => &self.black_points,
            Player::None => &[],
        }
    }
}

fn take_random(moves: &mut Vec<Cell>, rng: &mut SearchRng) -> Option<Cell> {
    if moves.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..moves.len());
    Some(moves.swap_remove(index))
}

fn remove_move(moves: &mut Vec<Cell>, cell: Cell) -> bool {
    match moves.iter().position(|&m| m == cell) {
        Some(index) => {
            moves.swap_remove(index);
            true
        }
        None => false,
    }
}

fn is_empty_cell(state: &GameState, cell: Cell) -> bool {
    state.owner(cell) == Some(Player::None)
}

/// Plays uniformly random moves until someone wins
pub fn random_rollout(state: &mut GameState, rng: &mut SearchRng) -> Result<()> {
    let mut moves = state.moves();
    while state.winner().is_none() {
        let Some(cell) = take_random(&mut moves, rng) else {
            break;
        };
        state.play(cell)?;
    }
    Ok(())
}

/// Random rollout drawing from per-player "good move" pools.
///
/// Each ply draws from the current pool until it finds a cell for which
/// `would_lose` is false for the player who was on move when the rollout
/// started; drawn cells leave the pool either way. An exhausted pool falls
/// back to a uniform move. The two pools swap every ply.
pub fn decisive_move_rollout(state: &mut GameState, rng: &mut SearchRng) -> Result<()> {
    let mut moves = state.moves();
    let mut good_moves = moves.clone();
    let mut good_opponent_moves = moves.clone();
    let to_play = state.turn();

    while state.winner().is_none() {
        let mut chosen = None;
        while chosen.is_none() {
            let Some(candidate) = take_random(&mut good_moves, rng) else {
                break;
            };
            if !state.would_lose(candidate, to_play) {
                chosen = Some(candidate);
            }
        }

        let cell = match chosen {
            Some(cell) => {
                remove_move(&mut moves, cell);
                cell
            }
            None => match take_random(&mut moves, rng) {
                Some(cell) => cell,
                None => break,
            },
        };

        state.play(cell)?;
        remove_move(&mut good_opponent_moves, cell);
        std::mem::swap(&mut good_moves, &mut good_opponent_moves);
    }
    Ok(())
}

/// Last-Good-Reply tables: for each colour, the opponent's move mapped to
/// the reply that last won a rollout.
#[derive(Debug, Clone, Default)]
pub struct ReplyTables {
    pub white: HashMap<Cell, Cell>,
    pub black: HashMap<Cell, Cell>,
}

impl ReplyTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }

    fn table(&self, color: Player) -> &HashMap<Cell, Cell> {
        match color {
            Player::Black => &self.black,
            _ => &self.white,
        }
    }

    /// Plays a rollout that answers the previous move with the stored reply
    /// with probability `randomness`, then learns from the winner's moves.
    pub fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut SearchRng,
        randomness: f64,
    ) -> Result<()> {
        let mut moves = state.moves();
        let first = state.turn();
        let mut current = first;
        let mut white_moves = Vec::new();
        let mut black_moves = Vec::new();
        let mut last_move: Option<Cell> = None;

        while state.winner().is_none() {
            let reply = last_move.and_then(|m| self.table(current).get(&m).copied());
            let cell = match reply {
                Some(r) if is_empty_cell(state, r) && rng.gen::<f64>() <= randomness => {
                    remove_move(&mut moves, r);
                    r
                }
                _ => match take_random(&mut moves, rng) {
                    Some(cell) => cell,
                    None => break,
                },
            };

            if state.turn() == Player::Black {
                black_moves.push(cell);
            } else {
                white_moves.push(cell);
            }
            current = current.opponent();
            state.play(cell)?;
            last_move = Some(cell);
        }

        self.record(state.winner(), first, state.turn(), &white_moves, &black_moves);
        Ok(())
    }

    /// Stores the winner's replies to the loser's moves.
    ///
    /// `offset` shifts the winner's list by one when the winner moved
    /// first; `skip` drops the loser's last move when the winner is still
    /// on turn after the game ended.
    pub fn record(
        &mut self,
        winner: Player,
        first: Player,
        final_turn: Player,
        white_moves: &[Cell],
        black_moves: &[Cell],
    ) {
        let (table, winner_moves, loser_moves) = match winner {
            Player::Black => (&mut self.black, black_moves, white_moves),
            Player::White => (&mut self.white, white_moves, black_moves),
            Player::None => return,
        };
        let offset = usize::from(first == winner);
        let skip = usize::from(final_turn == winner);

        for (i, &opponent_move) in loser_moves
            .iter()
            .enumerate()
            .take(loser_moves.len().saturating_sub(skip))
        {
            if let Some(&reply) = winner_moves.get(i + offset) {
                table.insert(opponent_move, reply);
            }
        }
    }
}

/// Pool-RAVE scores: a running win/loss tally per cell for each colour.
#[derive(Debug, Clone, Default)]
pub struct RavePools {
    pub white: HashMap<Cell, i64>,
    pub black: HashMap<Cell, i64>,
}

impl RavePools {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }

    /// The `capacity` highest-scoring cells of `color` that are still empty.
    pub fn pool(&self, color: Player, state: &GameState, capacity: usize) -> Vec<Cell> {
        let scores = match color {
            Player::Black => &self.black,
            _ => &self.white,
        };
        let mut ranked: Vec<(Cell, i64)> = scores.iter().map(|(&c, &s)| (c, s)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked
            .into_iter()
            .map(|(cell, _)| cell)
            .filter(|&cell| is_empty_cell(state, cell))
            .take(capacity)
            .collect()
    }

    /// Plays a rollout that picks from the mover's pool with probability
    /// `randomness`, then scores every stone on the final board.
    pub fn rollout(
        &mut self,
        state: &mut GameState,
        rng: &mut SearchRng,
        randomness: f64,
        capacity: usize,
    ) -> Result<()> {
        let mut moves = state.moves();
        let white_pool = self.pool(Player::White, state, capacity);
        let black_pool = self.pool(Player::Black, state, capacity);

        while state.winner().is_none() {
            let pool = if state.turn() == Player::Black {
                &black_pool
            } else {
                &white_pool
            };
            let candidate = if pool.is_empty() {
                None
            } else {
                Some(pool[rng.gen_range(0..pool.len())])
            };

            let cell = match candidate {
                Some(c) if rng.gen::<f64>() <= randomness && is_empty_cell(state, c) => {
                    remove_move(&mut moves, c);
                    c
                }
                _ => match take_random(&mut moves, rng) {
                    Some(cell) => cell,
                    None => break,
                },
            };
            state.play(cell)?;
        }

        self.update_scores(state);
        Ok(())
    }

    /// +1 for each stone of the winner, -1 for each stone of the loser.
    pub fn update_scores(&mut self, state: &GameState) {
        let winner = state.winner();
        for (color, scores) in [(Player::White, &mut self.white), (Player::Black, &mut self.black)] {
            let delta = if winner == color { 1 } else { -1 };
            for cell in state.stones(color) {
                *scores.entry(cell).or_insert(0) += delta;
            }
        }
    }
}
