use hex_mcts::{
    policy::{
        simulation::{decisive_move_rollout, random_rollout, RavePools, ReplyTables},
        LgrPolicy, PoolRavePolicy, QbPolicy,
    },
    Cell, GameState, MctsConfig, Player, SearchPolicy, SearchRng,
};
use rand::SeedableRng;

fn rng(seed: u64) -> SearchRng {
    SearchRng::seed_from_u64(seed)
}

#[test]
fn test_random_rollout_finishes_the_game() {
    let mut rng = rng(1);
    for _ in 0..20 {
        let mut state = GameState::new(6);
        state.play(Cell::new(2, 2)).unwrap();
        random_rollout(&mut state, &mut rng).unwrap();
        assert!(state.is_terminal());
        assert_eq!(state.owner(Cell::new(2, 2)), Some(Player::White));
    }
}

#[test]
fn test_decisive_move_rollout_finishes_the_game() {
    let mut rng = rng(2);
    for _ in 0..20 {
        let mut state = GameState::new(5);
        decisive_move_rollout(&mut state, &mut rng).unwrap();
        assert!(state.is_terminal());
    }
}

#[test]
fn test_rollout_on_a_decided_position_is_a_no_op() {
    let mut state = GameState::new(2);
    state.place_black(Cell::new(0, 0)).unwrap();
    state.place_black(Cell::new(0, 1)).unwrap();
    assert_eq!(state.winner(), Player::Black);

    random_rollout(&mut state, &mut rng(3)).unwrap();
    assert_eq!(state.moves().len(), 2);
}

#[test]
fn test_lgr_learns_replies_from_rollouts() {
    let mut replies = ReplyTables::new();
    let mut rng = rng(4);
    for _ in 0..10 {
        let mut state = GameState::new(5);
        replies.rollout(&mut state, &mut rng, 0.5).unwrap();
        assert!(state.is_terminal());
    }
    assert!(!replies.white.is_empty() || !replies.black.is_empty());
}

#[test]
fn test_lgr_records_the_winners_replies() {
    let (a, b, c) = (Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0));
    let (x, y) = (Cell::new(0, 2), Cell::new(1, 2));

    // W a, B x, W b, B y, W c: white moved first and last
    let mut replies = ReplyTables::new();
    replies.record(Player::White, Player::White, Player::Black, &[a, b, c], &[x, y]);
    assert_eq!(replies.white.get(&x), Some(&b));
    assert_eq!(replies.white.get(&y), Some(&c));
    assert!(replies.black.is_empty());

    // Nothing is learned without a winner
    let mut replies = ReplyTables::new();
    replies.record(Player::None, Player::White, Player::Black, &[a, b, c], &[x, y]);
    assert!(replies.white.is_empty() && replies.black.is_empty());
}

#[test]
fn test_lgr_policy_rollout_reports_rave_points() {
    let config = MctsConfig::default().with_randomness(1.0);
    let mut policy = LgrPolicy::from_config(&config);
    let mut rng = rng(5);
    for _ in 0..10 {
        let mut state = GameState::new(4);
        let rollout = policy.rollout(&mut state, &mut rng).unwrap();
        assert_eq!(rollout.winner, state.winner());
        assert_eq!(rollout.white_points, state.stones(Player::White));
        assert_eq!(rollout.black_points, state.stones(Player::Black));
    }
}

#[test]
fn test_lgr_reset_clears_tables() {
    let config = MctsConfig::default();
    let mut policy = LgrPolicy::from_config(&config);
    policy.replies.white.insert(Cell::new(0, 0), Cell::new(1, 1));
    policy.reset(&GameState::new(3), &mut rng(6));
    assert!(policy.replies.white.is_empty());
}

#[test]
fn test_pool_rave_scores_and_pools() {
    let mut pools = RavePools::new();
    let mut state = GameState::new(3);
    for row in 0..3 {
        state.place_white(Cell::new(row, 1)).unwrap();
    }
    state.place_black(Cell::new(0, 0)).unwrap();
    pools.update_scores(&state);

    assert_eq!(pools.white.get(&Cell::new(1, 1)), Some(&1));
    assert_eq!(pools.black.get(&Cell::new(0, 0)), Some(&-1));

    // Only empty cells make it into a pool
    let empty = GameState::new(3);
    let white_pool = pools.pool(Player::White, &empty, 2);
    assert_eq!(white_pool, vec![Cell::new(0, 1), Cell::new(1, 1)]);
    assert!(pools.pool(Player::White, &state, 10).is_empty());
}

#[test]
fn test_pool_rave_policy_rollouts_build_scores() {
    let config = MctsConfig::default().with_pool_rave_capacity(3);
    let mut policy = PoolRavePolicy::from_config(&config);
    let mut rng = rng(7);
    for _ in 0..10 {
        let mut state = GameState::new(4);
        let rollout = policy.rollout(&mut state, &mut rng).unwrap();
        assert!(!rollout.winner.is_none());
        assert_eq!(
            rollout.white_points.len() + rollout.black_points.len(),
            rollout.white_played + rollout.black_played
        );
    }
    assert!(!policy.pools.white.is_empty());
    policy.reset(&GameState::new(4), &mut rng);
    assert!(policy.pools.white.is_empty() && policy.pools.black.is_empty());
}

#[test]
fn test_quality_policy_reseeds_its_history() {
    let config = MctsConfig::default().with_quality_history_capacity(5);
    let mut policy = QbPolicy::from_config(&config);
    let mut rng = rng(8);
    policy.reset(&GameState::new(5), &mut rng);
    assert_eq!(policy.history.len(), 1);

    for _ in 0..10 {
        let mut state = GameState::new(5);
        let rollout = policy.rollout(&mut state, &mut rng).unwrap();
        policy.history.push(rollout.white_played, rollout.black_played);
    }
    assert_eq!(policy.history.len(), 5);

    policy.on_commit(&GameState::new(5), &mut rng);
    assert_eq!(policy.history.len(), 1);
}

#[test]
fn test_decisive_move_rollout_skips_completing_cells() {
    for seed in 0..50 {
        let mut state = GameState::new(3);
        state.place_white(Cell::new(0, 0)).unwrap();
        state.place_white(Cell::new(1, 0)).unwrap();
        for cell in [(0, 1), (0, 2), (1, 1), (1, 2), (2, 1)] {
            state.place_black(Cell::new(cell.0, cell.1)).unwrap();
        }
        state.set_turn(Player::White).unwrap();
        assert!(state.would_lose(Cell::new(2, 0), Player::White));
        assert!(!state.would_lose(Cell::new(2, 2), Player::White));

        decisive_move_rollout(&mut state, &mut rng(seed)).unwrap();

        // White passes over (2, 0), black gets it from the fallback
        assert_eq!(state.owner(Cell::new(2, 2)), Some(Player::White));
        assert_eq!(state.owner(Cell::new(2, 0)), Some(Player::Black));
    }
}

#[test]
fn test_lgr_plays_the_stored_reply_when_fully_greedy() {
    let target = Cell::new(3, 3);
    let mut black_took_target = 0;
    for seed in 0..50 {
        let mut state = GameState::new(4);
        let mut replies = ReplyTables::new();
        for cell in state.moves() {
            replies.black.insert(cell, target);
        }

        replies.rollout(&mut state, &mut rng(seed), 1.0).unwrap();

        // Only white's opening can beat black to the reply
        match state.owner(target) {
            Some(Player::Black) => black_took_target += 1,
            Some(Player::White) => {}
            other => panic!("reply cell left as {:?}", other),
        }
    }
    assert!(black_took_target >= 40, "black took the reply {} times", black_took_target);
}

#[test]
fn test_pool_rave_draws_from_the_movers_pool_when_fully_greedy() {
    let favourite = Cell::new(2, 2);
    for seed in 0..50 {
        let mut pools = RavePools::new();
        pools.white.insert(favourite, 5);
        pools.black.insert(Cell::new(0, 0), 5);
        let mut state = GameState::new(4);

        pools.rollout(&mut state, &mut rng(seed), 1.0, 1).unwrap();

        assert_eq!(state.owner(favourite), Some(Player::White));
        assert_eq!(state.owner(Cell::new(0, 0)), Some(Player::Black));
    }
}
