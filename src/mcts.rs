//! The search agent
//!
//! [`MctsAgent`] owns a private copy of the position, the search tree and
//! a [`SearchPolicy`]. Each iteration selects a node, expands it, plays a
//! rollout from it and backs the result up to the root.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::{
    config::MctsConfig,
    game_state::{Cell, GameState},
    policy::{
        selection::{most_visited_child, select_child},
        DecisiveMovePolicy, LgrPolicy, PoolRavePolicy, QbPolicy, RavePolicy, SearchPolicy,
        Ucb1TunedPolicy, UctPolicy,
    },
    stats::SearchStatistics,
    tree::{Node, NodeId, Tree},
    HexError, Result,
};

/// Random source used for tie-breaking and rollouts
pub type SearchRng = ChaCha20Rng;

pub type UctAgent = MctsAgent<UctPolicy>;
pub type RaveAgent = MctsAgent<RavePolicy>;
pub type DecisiveMoveAgent = MctsAgent<DecisiveMovePolicy>;
pub type LgrAgent = MctsAgent<LgrPolicy>;
pub type PoolRaveAgent = MctsAgent<PoolRavePolicy>;
pub type Ucb1TunedAgent = MctsAgent<Ucb1TunedPolicy>;
pub type QbAgent = MctsAgent<QbPolicy>;

/// When a search stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchBudget {
    /// Stop once this much wall time has elapsed. A rollout in flight
    /// always finishes first.
    Time(Duration),
    /// Stop after exactly this many rollouts
    Rollouts(usize),
}

/// Move suggested by [`MctsAgent::best_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BestMove {
    Play(Cell),
    /// The root position is already decided
    GameOver,
}

impl fmt::Display for BestMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BestMove::Play(cell) => write!(f, "{}", cell),
            BestMove::GameOver => f.write_str("game over"),
        }
    }
}

/// Monte Carlo Tree Search agent for Hex
pub struct MctsAgent<P: SearchPolicy> {
    root_state: GameState,
    tree: Tree,
    policy: P,
    config: MctsConfig,
    rng: SearchRng,
    statistics: SearchStatistics,
}

impl<P: SearchPolicy> MctsAgent<P> {
    /// Creates an agent bound to a copy of `state`
    pub fn new(state: &GameState, config: MctsConfig) -> Result<Self> {
        let policy = P::from_config(&config);
        Self::with_policy(state, config, policy)
    }

    /// Creates an agent with an explicitly constructed policy
    pub fn with_policy(state: &GameState, config: MctsConfig, mut policy: P) -> Result<Self> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => SearchRng::seed_from_u64(seed),
            None => SearchRng::from_entropy(),
        };
        policy.reset(state, &mut rng);

        Ok(MctsAgent {
            root_state: state.clone(),
            tree: Tree::new(),
            policy,
            config,
            rng,
            statistics: SearchStatistics::new(),
        })
    }

    /// Grows the tree until `time_budget` has elapsed
    pub fn search(&mut self, time_budget: Duration) -> Result<()> {
        self.search_with_budget(SearchBudget::Time(time_budget))
    }

    /// Grows the tree by exactly `rollouts` rollouts
    pub fn search_rollouts(&mut self, rollouts: usize) -> Result<()> {
        self.search_with_budget(SearchBudget::Rollouts(rollouts))
    }

    /// Runs select / expand / rollout / backup until the budget is spent
    pub fn search_with_budget(&mut self, budget: SearchBudget) -> Result<()> {
        let start = Instant::now();
        let mut rollouts = 0;
        let mut max_depth = 0;

        loop {
            let done = match budget {
                SearchBudget::Time(limit) => start.elapsed() >= limit,
                SearchBudget::Rollouts(limit) => rollouts >= limit,
            };
            if done {
                break;
            }

            let (node, mut state) = self.select_node()?;
            max_depth = max_depth.max(self.tree.depth(node));
            let turn = state.turn();
            let rollout = self.policy.rollout(&mut state, &mut self.rng)?;
            self.policy.backup(&mut self.tree, node, turn, &rollout);
            rollouts += 1;
        }

        self.statistics = SearchStatistics {
            rollouts,
            node_count: self.tree.size(),
            elapsed: start.elapsed(),
            max_depth,
        };
        debug!(
            "{} search: {} rollouts, {} nodes, {:.3}s",
            self.policy.name(),
            self.statistics.rollouts,
            self.statistics.node_count,
            self.statistics.elapsed.as_secs_f64()
        );
        Ok(())
    }

    /// Selection phase: walk down to a node to simulate from, replaying the
    /// chosen moves on a scratch copy of the root position
    fn select_node(&mut self) -> Result<(NodeId, GameState)> {
        let mut node = self.tree.root();
        let mut state = self.root_state.clone();

        while !self.tree.get(node).is_leaf() {
            let Some(next) = select_child(
                &self.policy,
                &self.tree,
                node,
                self.config.exploration,
                &mut self.rng,
            ) else {
                // Already expanded, so it must not be expanded again
                return Ok((node, state));
            };
            node = next;
            if let Some(cell) = self.tree.get(node).action {
                state.play(cell)?;
            }

            // Unvisited children are simulated before anything below them
            if self.tree.get(node).visits == 0 {
                return Ok((node, state));
            }
        }

        if self.expand(node, &state) {
            let children: Vec<NodeId> = self.tree.get(node).children.values().copied().collect();
            if let Some(&child) = children.choose(&mut self.rng) {
                node = child;
                if let Some(cell) = self.tree.get(node).action {
                    state.play(cell)?;
                }
            }
        }
        Ok((node, state))
    }

    /// Expansion phase: one child per legal move. Returns false for a
    /// decided position, which stays childless.
    fn expand(&mut self, node: NodeId, state: &GameState) -> bool {
        if state.is_terminal() {
            return false;
        }
        self.tree.add_children(node, &state.moves());
        true
    }

    /// Most visited root child, ties broken at random.
    ///
    /// Returns [`BestMove::GameOver`] once the root position is decided. If
    /// no search has expanded the root yet, a random legal move is returned.
    pub fn best_move(&mut self) -> BestMove {
        if self.root_state.is_terminal() {
            return BestMove::GameOver;
        }

        let root = self.tree.root();
        if let Some(child) = most_visited_child(&self.tree, root, &mut self.rng) {
            if let Some(cell) = self.tree.get(child).action {
                return BestMove::Play(cell);
            }
        }

        warn!("best_move called before the root was expanded; choosing a random move");
        match self.root_state.moves().choose(&mut self.rng) {
            Some(&cell) => BestMove::Play(cell),
            None => BestMove::GameOver,
        }
    }

    /// Commits `action` as the next move.
    ///
    /// A known root child becomes the new root with all of its statistics;
    /// any other move discards the tree.
    pub fn play_move(&mut self, action: Cell) -> Result<()> {
        self.root_state.play(action)?;

        let root = self.tree.root();
        match self.tree.child(root, action) {
            Some(child) => {
                self.tree.reroot(child);
                trace!("re-rooted at {} with {} visits", action, self.root_visits());
            }
            None => {
                self.tree = Tree::new();
                trace!("{} is not in the tree; starting a fresh tree", action);
            }
        }
        self.policy.on_commit(&self.root_state, &mut self.rng);
        Ok(())
    }

    /// Binds the agent to a copy of `state` and discards the tree
    pub fn set_gamestate(&mut self, state: &GameState) {
        self.root_state = state.clone();
        self.tree = Tree::new();
        self.policy.reset(&self.root_state, &mut self.rng);
    }

    /// Statistics of the most recent search
    pub fn statistics(&self) -> SearchStatistics {
        self.statistics
    }

    pub fn root_state(&self) -> &GameState {
        &self.root_state
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Visit count of the root
    pub fn root_visits(&self) -> u32 {
        self.tree.get(self.tree.root()).visits
    }

    /// Statistics of the root child reached by `action`
    pub fn child_stats(&self, action: Cell) -> Option<&Node> {
        self.tree
            .child(self.tree.root(), action)
            .map(|id| self.tree.get(id))
    }

    /// Returns a visualization of the search tree
    pub fn visualize_tree(&self, max_depth: usize) -> String {
        self.tree.visualize(max_depth)
    }
}

/// Object-safe view of an agent, for callers that pick the variant at runtime
pub trait Agent {
    fn name(&self) -> &'static str;
    fn set_gamestate(&mut self, state: &GameState);
    fn search(&mut self, time_budget: Duration) -> Result<()>;
    fn search_rollouts(&mut self, rollouts: usize) -> Result<()>;
    fn best_move(&mut self) -> BestMove;
    fn play_move(&mut self, action: Cell) -> Result<()>;
    fn statistics(&self) -> SearchStatistics;
    fn root_state(&self) -> &GameState;
}

impl<P: SearchPolicy> Agent for MctsAgent<P> {
    fn name(&self) -> &'static str {
        self.policy.name()
    }

    fn set_gamestate(&mut self, state: &GameState) {
        MctsAgent::set_gamestate(self, state)
    }

    fn search(&mut self, time_budget: Duration) -> Result<()> {
        MctsAgent::search(self, time_budget)
    }

    fn search_rollouts(&mut self, rollouts: usize) -> Result<()> {
        MctsAgent::search_rollouts(self, rollouts)
    }

    fn best_move(&mut self) -> BestMove {
        MctsAgent::best_move(self)
    }

    fn play_move(&mut self, action: Cell) -> Result<()> {
        MctsAgent::play_move(self, action)
    }

    fn statistics(&self) -> SearchStatistics {
        MctsAgent::statistics(self)
    }

    fn root_state(&self) -> &GameState {
        MctsAgent::root_state(self)
    }
}

/// The available search variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    Uct,
    Rave,
    DecisiveMove,
    LastGoodReply,
    PoolRave,
    Ucb1Tuned,
    QualityBased,
}

impl AgentKind {
    pub const ALL: [AgentKind; 7] = [
        AgentKind::Uct,
        AgentKind::Rave,
        AgentKind::DecisiveMove,
        AgentKind::LastGoodReply,
        AgentKind::PoolRave,
        AgentKind::Ucb1Tuned,
        AgentKind::QualityBased,
    ];

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            AgentKind::Uct => "uct",
            AgentKind::Rave => "rave",
            AgentKind::DecisiveMove => "decisive",
            AgentKind::LastGoodReply => "lgr",
            AgentKind::PoolRave => "poolrave",
            AgentKind::Ucb1Tuned => "ucb1tuned",
            AgentKind::QualityBased => "qb",
        }
    }

    /// Creates an agent of this kind bound to a copy of `state`
    pub fn build(self, state: &GameState, config: MctsConfig) -> Result<Box<dyn Agent>> {
        Ok(match self {
            AgentKind::Uct => Box::new(UctAgent::new(state, config)?),
            AgentKind::Rave => Box::new(RaveAgent::new(state, config)?),
            AgentKind::DecisiveMove => Box::new(DecisiveMoveAgent::new(state, config)?),
            AgentKind::LastGoodReply => Box::new(LgrAgent::new(state, config)?),
            AgentKind::PoolRave => Box::new(PoolRaveAgent::new(state, config)?),
            AgentKind::Ucb1Tuned => Box::new(Ucb1TunedAgent::new(state, config)?),
            AgentKind::QualityBased => Box::new(QbAgent::new(state, config)?),
        })
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = HexError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect();
        match normalized.as_str() {
            "uct" => Ok(AgentKind::Uct),
            "rave" => Ok(AgentKind::Rave),
            "decisive" | "decisivemove" | "dm" => Ok(AgentKind::DecisiveMove),
            "lgr" | "lastgoodreply" => Ok(AgentKind::LastGoodReply),
            "poolrave" => Ok(AgentKind::PoolRave),
            "ucb1tuned" => Ok(AgentKind::Ucb1Tuned),
            "qb" | "qualitybased" => Ok(AgentKind::QualityBased),
            _ => Err(HexError::UnknownAgent(s.to_string())),
        }
    }
}
