//! Search policies
//!
//! Every agent runs the same select / expand / rollout / backup loop. What
//! differs between variants is captured by [`SearchPolicy`]:
//! - Selection: the value formula used to rank children
//! - Simulation: how a rollout chooses its moves
//! - Backpropagation: how a rollout's outcome is written into the tree
//!
//! The agent is generic over the policy, so the value formula on the hot
//! selection path is statically dispatched.

pub mod backpropagation;
pub mod selection;
pub mod simulation;
pub mod variants;

pub use simulation::Rollout;
pub use variants::{
    DecisiveMovePolicy, LgrPolicy, PoolRavePolicy, QbPolicy, RavePolicy, Ucb1TunedPolicy,
    UctPolicy,
};

use crate::{
    config::MctsConfig,
    game_state::{GameState, Player},
    mcts::SearchRng,
    tree::{Node, NodeId, Tree},
    Result,
};

/// The capabilities that distinguish one search variant from another
pub trait SearchPolicy: Send {
    /// Builds the policy from the agent's configuration
    fn from_config(config: &MctsConfig) -> Self
    where
        Self: Sized;

    /// Short lowercase name, also accepted by [`AgentKind`](crate::AgentKind)
    fn name(&self) -> &'static str;

    /// Value of `node` for selection, given its parent's visit count
    fn value(&self, node: &Node, parent_visits: u32, explore: f64) -> f64;

    /// Plays `state` out to the end and reports the result
    fn rollout(&mut self, state: &mut GameState, rng: &mut SearchRng) -> Result<Rollout>;

    /// Writes a rollout's result from `node` up to the root.
    ///
    /// `turn` is the player on move at `node`.
    fn backup(&mut self, tree: &mut Tree, node: NodeId, turn: Player, rollout: &Rollout);

    /// Called when the agent is bound to a new position
    fn reset(&mut self, _state: &GameState, _rng: &mut SearchRng) {}

    /// Called after a move has been committed to the root
    fn on_commit(&mut self, _state: &GameState, _rng: &mut SearchRng) {}
}
