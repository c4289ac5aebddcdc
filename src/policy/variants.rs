//! The seven search variants

use crate::{
    config::MctsConfig,
    game_state::{GameState, Player},
    mcts::SearchRng,
    policy::{
        backpropagation::{
            quality_backup, rave_backup, standard_backup, QualityBonus, QualityHistory,
        },
        selection::{rave_value, ucb1_tuned_value, uct_value},
        simulation::{decisive_move_rollout, random_rollout, RavePools, ReplyTables, Rollout},
        SearchPolicy,
    },
    tree::{Node, NodeId, Tree},
    Result,
};

/// Plain UCT with uniform rollouts and 0/1 rewards
#[derive(Debug, Clone, Default)]
pub struct UctPolicy;

impl SearchPolicy for UctPolicy {
    fn from_config(_config: &MctsConfig) -> Self {
        UctPolicy
    }

    fn name(&self) -> &'static str {
        "uct"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        uct_value(node, parent_visits, explore)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        random_rollout(state, rng)?;
        Ok(Rollout::finished(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        standard_backup(tree, node, turn, rollout.winner);
    }
}

/// UCT whose value formula swaps the exploration term for the
/// variance-aware UCB1-Tuned bound
#[derive(Debug, Clone, Default)]
pub struct Ucb1TunedPolicy;

impl SearchPolicy for Ucb1TunedPolicy {
    fn from_config(_config: &MctsConfig) -> Self {
        Ucb1TunedPolicy
    }

    fn name(&self) -> &'static str {
        "ucb1tuned"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        ucb1_tuned_value(node, parent_visits, explore)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        random_rollout(state, rng)?;
        Ok(Rollout::finished(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        standard_backup(tree, node, turn, rollout.winner);
    }
}

/// Rapid Action Value Estimation
#[derive(Debug, Clone)]
pub struct RavePolicy {
    pub rave_const: f64,
}

impl SearchPolicy for RavePolicy {
    fn from_config(config: &MctsConfig) -> Self {
        RavePolicy {
            rave_const: config.rave_const,
        }
    }

    fn name(&self) -> &'static str {
        "rave"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        rave_value(node, parent_visits, explore, self.rave_const)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        random_rollout(state, rng)?;
        Ok(Rollout::with_rave_points(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        rave_backup(tree, node, turn, rollout);
    }
}

/// RAVE with rollouts drawn from shrinking per-player "good move" pools
#[derive(Debug, Clone)]
pub struct DecisiveMovePolicy {
    pub rave_const: f64,
}

impl SearchPolicy for DecisiveMovePolicy {
    fn from_config(config: &MctsConfig) -> Self {
        DecisiveMovePolicy {
            rave_const: config.rave_const,
        }
    }

    fn name(&self) -> &'static str {
        "decisive"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        rave_value(node, parent_visits, explore, self.rave_const)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        decisive_move_rollout(state, rng)?;
        Ok(Rollout::with_rave_points(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        rave_backup(tree, node, turn, rollout);
    }
}

/// RAVE with Last-Good-Reply rollouts
///
/// The reply tables persist across searches and committed moves and are
/// only cleared when the agent is bound to a new position.
#[derive(Debug, Clone)]
pub struct LgrPolicy {
    pub rave_const: f64,
    pub randomness: f64,
    pub replies: ReplyTables,
}

impl SearchPolicy for LgrPolicy {
    fn from_config(config: &MctsConfig) -> Self {
        LgrPolicy {
            rave_const: config.rave_const,
            randomness: config.randomness,
            replies: ReplyTables::new(),
        }
    }

    fn name(&self) -> &'static str {
        "lgr"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        rave_value(node, parent_visits, explore, self.rave_const)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        self.replies.rollout(state, rng, self.randomness)?;
        Ok(Rollout::with_rave_points(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        rave_backup(tree, node, turn, rollout);
    }

    fn reset(&mut self, _state: &GameState, _rng: &mut SearchRng) {
        self.replies.clear();
    }
}

/// RAVE with rollouts biased towards historically winning cells
#[derive(Debug, Clone)]
pub struct PoolRavePolicy {
    pub rave_const: f64,
    pub randomness: f64,
    pub capacity: usize,
    pub pools: RavePools,
}

impl SearchPolicy for PoolRavePolicy {
    fn from_config(config: &MctsConfig) -> Self {
        PoolRavePolicy {
            rave_const: config.rave_const,
            randomness: config.randomness,
            capacity: config.pool_rave_capacity,
            pools: RavePools::new(),
        }
    }

    fn name(&self) -> &'static str {
        "poolrave"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        rave_value(node, parent_visits, explore, self.rave_const)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        self.pools
            .rollout(state, rng, self.randomness, self.capacity)?;
        Ok(Rollout::with_rave_points(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        rave_backup(tree, node, turn, rollout);
    }

    fn reset(&mut self, _state: &GameState, _rng: &mut SearchRng) {
        self.pools.clear();
    }
}

/// UCT with quality-based rewards: short wins are worth more than long
/// ones, judged against the recent history of rollout lengths.
#[derive(Debug, Clone)]
pub struct QbPolicy {
    pub a_const: f64,
    pub k_const: f64,
    pub warmup: usize,
    pub history: QualityHistory,
}

impl SearchPolicy for QbPolicy {
    fn from_config(config: &MctsConfig) -> Self {
        QbPolicy {
            a_const: config.a_const,
            k_const: config.k_const,
            warmup: config.warmup_rollouts,
            history: QualityHistory::new(config.quality_history_capacity),
        }
    }

    fn name(&self) -> &'static str {
        "qb"
    }

    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64 {
        uct_value(node, parent_visits, explore)
    }

    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout> {
        random_rollout(state, rng)?;
        Ok(Rollout::finished(state))
    }

    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout) {
        self.history.push(rollout.white_played, rollout.black_played);
        let bonus = self
            .history
            .bonus(rollout.white_played, rollout.black_played, self.k_const);
        let quality = QualityBonus {
            bonus,
            a_const: self.a_const,
            active: rollout.white_played.max(rollout.black_played) >= self.warmup,
        };
        quality_backup(tree, node, turn, rollout.winner, quality);
    }

    fn reset(&mut self, state: &GameState, rng: &mut SearchRng) {
        self.history.reseed(state, rng);
    }

    fn on_commit(&mut self, state: &GameState, rng: &mut SearchRng) {
        self.history.reseed(state, rng);
    }
}
