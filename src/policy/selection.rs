//! Selection-phase value formulas
//!
//! Each formula ranks a child relative to its parent's visit count. An
//! unvisited child is worth `+inf` whenever exploration is enabled, so every
//! child is tried once before any is tried twice, and `0` when exploration
//! is disabled so that final-move comparisons never see infinities.

use rand::seq::SliceRandom;

use crate::{
    mcts::SearchRng,
    policy::SearchPolicy,
    tree::{Node, NodeId, Tree},
    utils::{exploitation_term, exploration_term, rave_alpha},
};

fn unvisited_value(explore: f64) -> f64 {
    if explore == 0.0 {
        0.0
    } else {
        f64::INFINITY
    }
}

/// Plain UCT:
///
/// ```text
/// Q/N + explore * sqrt(2 ln(parent_N) / N)
/// ```
pub fn uct_value(node: &Node, parent_visits: u32, explore: f64) -> f64 {
    if node.visits == 0 {
        return unvisited_value(explore);
    }
    exploitation_term(node.reward, node.visits)
        + explore * exploration_term(parent_visits, node.visits)
}

/// UCT blended with the all-moves-as-first estimate.
///
/// The AMAF share `alpha` starts at 1 and reaches 0 once the node has
/// `rave_const` real visits.
pub fn rave_value(node: &Node, parent_visits: u32, explore: f64, rave_const: f64) -> f64 {
    if node.visits == 0 {
        return unvisited_value(explore);
    }
    let alpha = rave_alpha(node.visits, rave_const);
    let uct = uct_value(node, parent_visits, explore);
    (1.0 - alpha) * uct + alpha * node.amaf()
}

/// UCB1-Tuned with the Bernoulli variance bound `avg * (1 - avg)`.
///
/// Only meaningful for rewards in `[0, 1]`.
pub fn ucb1_tuned_value(node: &Node, parent_visits: u32, explore: f64) -> f64 {
    if node.visits == 0 {
        return unvisited_value(explore);
    }
    let n = node.visits as f64;
    let ln_parent = (parent_visits as f64).ln();
    let avg = node.mean();
    let variance = avg * (1.0 - avg);
    let bound = f64::min(0.25, variance + (2.0 * ln_parent / n).sqrt());
    avg + explore * (ln_parent / n).sqrt() * bound
}

/// Child of `parent` with the highest policy value, ties broken uniformly
/// at random. Returns `None` for a leaf.
pub fn select_child<P: SearchPolicy + ?Sized>(
    policy: &P,
    tree: &Tree,
    parent: NodeId,
    explore: f64,
    rng: &mut SearchRng,
) -> Option<NodeId> {
    let parent_node = tree.get(parent);
    let parent_visits = parent_node.visits;

    let mut best_value = f64::NEG_INFINITY;
    let mut best: Vec<NodeId> = Vec::new();
    for &child in parent_node.children.values() {
        let value = policy.value(tree.get(child), parent_visits, explore);
        if value > best_value {
            best_value = value;
            best.clear();
            best.push(child);
        } else if value == best_value {
            best.push(child);
        }
    }
    best.choose(rng).copied()
}

/// Child of `parent` with the most visits, ties broken uniformly at random.
pub fn most_visited_child(tree: &Tree, parent: NodeId, rng: &mut SearchRng) -> Option<NodeId> {
    let children = &tree.get(parent).children;
    let max_visits = children.values().map(|&id| tree.get(id).visits).max()?;
    let best: Vec<NodeId> = children
        .values()
        .copied()
        .filter(|&id| tree.get(id).visits == max_visits)
        .collect();
    best.choose(rng).copied()
}
