//! Backup rules
//!
//! Rewards are always credited to the player who moved *into* a node.
//! `turn` is the player on move at the simulated node, so a rollout won by
//! `turn` is a loss for the node itself. The perspective flips at every
//! step towards the root.

use std::collections::VecDeque;

use rand::Rng;

use crate::{
    game_state::{GameState, Player},
    mcts::SearchRng,
    policy::simulation::Rollout,
    tree::{NodeId, Tree},
    utils::{mean_and_std, sigmoid_bonus},
};

/// Win = 1, loss = 0.
pub fn standard_backup(tree: &mut Tree, node: NodeId, turn: Player, winner: Player) {
    let mut reward = if winner == turn { 0.0 } else { 1.0 };
    let mut current = Some(node);
    while let Some(id) = current {
        let n = tree.get_mut(id);
        n.visits += 1;
        n.reward += reward;
        reward = 1.0 - reward;
        current = n.parent;
    }
}

/// Win = +1, loss = -1, with AMAF credit for the rollout's stones.
///
/// At every node on the path, each child whose move is a stone of the
/// player on move there gets `N_RAVE += 1` and `Q_RAVE` credited from that
/// player's point of view.
pub fn rave_backup(tree: &mut Tree, node: NodeId, mut turn: Player, rollout: &Rollout) {
    let mut reward = if rollout.winner == turn { -1.0 } else { 1.0 };
    let mut current = Some(node);
    while let Some(id) = current {
        for &point in rollout.points(turn) {
            if let Some(child) = tree.child(id, point) {
                let c = tree.get_mut(child);
                c.rave_reward += -reward;
                c.rave_visits += 1;
            }
        }

        let n = tree.get_mut(id);
        n.visits += 1;
        n.reward += reward;
        turn = turn.opponent();
        reward = -reward;
        current = n.parent;
    }
}

/// Rolling record of how many stones each colour had placed when past
/// rollouts ended.
#[derive(Debug, Clone)]
pub struct QualityHistory {
    lengths: VecDeque<(f64, f64)>,
    capacity: usize,
}

impl QualityHistory {
    pub fn new(capacity: usize) -> Self {
        QualityHistory {
            lengths: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Forgets everything and seeds one synthetic entry, drawn uniformly
    /// from `[moves / size, moves / 2)`, for both colours.
    pub fn reseed(&mut self, state: &GameState, rng: &mut SearchRng) {
        let moves = state.moves().len();
        let low = moves / state.size();
        let high = moves / 2;
        let initial = if high > low {
            rng.gen_range(low..high)
        } else {
            low
        };
        self.lengths.clear();
        self.lengths.push_back((initial as f64, initial as f64));
    }

    pub fn push(&mut self, white: usize, black: usize) {
        if self.lengths.len() == self.capacity {
            self.lengths.pop_front();
        }
        self.lengths.push_back((white as f64, black as f64));
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Bonus in (-1, 1) per colour, `(white, black)`.
    ///
    /// Rollouts shorter than the historical mean score positive, longer
    /// ones negative, scaled by the standard deviation.
    pub fn bonus(&self, white: usize, black: usize, k: f64) -> (f64, f64) {
        let (white_mean, white_std) = mean_and_std(self.lengths.iter().map(|l| l.0));
        let (black_mean, black_std) = mean_and_std(self.lengths.iter().map(|l| l.1));

        let lambda = |mean: f64, std: f64, length: usize| {
            if std == 0.0 {
                0.0
            } else {
                (mean - length as f64) / std
            }
        };
        (
            sigmoid_bonus(lambda(white_mean, white_std, white), k),
            sigmoid_bonus(lambda(black_mean, black_std, black), k),
        )
    }
}

/// Parameters of the quality-based reward adjustment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityBonus {
    /// `(white, black)` bonus from [`QualityHistory::bonus`]
    pub bonus: (f64, f64),
    /// Scale of the bonus
    pub a_const: f64,
    /// Whether enough moves were played for the bonus to apply
    pub active: bool,
}

/// Win = +1, loss = -1, adjusted by `reward * a * bonus` for the colour on
/// move at each node once the bonus is active.
pub fn quality_backup(
    tree: &mut Tree,
    node: NodeId,
    mut turn: Player,
    winner: Player,
    quality: QualityBonus,
) {
    let mut reward = if winner == turn { -1.0 } else { 1.0 };
    let mut current = Some(node);
    while let Some(id) = current {
        let bonus = match turn {
            Player::Black => quality.bonus.1,
            _ => quality.bonus.0,
        };
        let adjusted = if quality.active {
            reward + reward * quality.a_const * bonus
        } else {
            reward
        };

        let n = tree.get_mut(id);
        n.visits += 1;
        n.reward += adjusted;
        turn = turn.opponent();
        reward = -reward;
        current = n.parent;
    }
}
