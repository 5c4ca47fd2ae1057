//! Random rollout tests: liveness over reachable states and parallel copies.

mod common;

use proptest::prelude::*;

use rust_fm::core::{GameParameters, GameRng, PlayerId};
use rust_fm::forward::ForwardModel;
use rust_fm::games::duel::Duel;
use rust_fm::games::skirmish::Skirmish;
use rust_fm::rollout::RandomRollout;
use rust_fm::stack::ExtendedSequence;
use rust_fm::{GameAction, GameState, RulesEngine};

/// Walk a game step by step, checking after every action that there is a
/// resolvable owner with something to do, and that every sequence finishes
/// within a bounded number of decisions.
fn walk<R: RulesEngine>(model: &ForwardModel<R>, state: &mut GameState<R>, agent: &mut GameRng, max_steps: usize) {
    const SEQUENCE_BOUND: usize = 64;
    let mut pending_for = 0;

    for _ in 0..max_steps {
        if state.is_terminal() {
            return;
        }
        let actions = model.legal_actions(state).unwrap();
        assert!(!actions.is_empty());

        let owner = state.current_player();
        assert!(owner.index() < state.player_count());
        if let Some(top) = state.stack().top() {
            assert_eq!(top.current_player(state), owner);
            assert!(!top.is_complete(state));
        } else {
            assert!(state.is_playing(owner));
            assert_eq!(owner, state.turn_owner());
        }
        assert!(actions.iter().all(|a| a.actor() == owner));

        let action = agent.choose(&actions).unwrap().clone();
        model.apply(state, &action).unwrap();

        pending_for = if state.stack().is_empty() { 0 } else { pending_for + 1 };
        assert!(pending_for < SEQUENCE_BOUND);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn skirmish_rollouts_stay_live(seed in any::<u64>(), agent in any::<u64>(), players in 2usize..=4) {
        let model = ForwardModel::new(Skirmish::woodland().unwrap()).with_strict_legality(true);
        let params = GameParameters::new(players).with_seed(seed).with_max_rounds(12);
        let mut state = model.setup(&params).unwrap();

        walk(&model, &mut state, &mut GameRng::new(agent), 5_000);

        prop_assert!(state.is_terminal());
        prop_assert!(state.round() <= 12);
        prop_assert_eq!(state.tick() as usize, state.history().len());
    }

    #[test]
    fn duel_rollouts_stay_live(seed in any::<u64>(), agent in any::<u64>(), players in 2usize..=4) {
        let model = ForwardModel::new(Duel::standard()).with_strict_legality(true);
        let params = GameParameters::new(players).with_seed(seed).with_max_rounds(20);
        let mut state = model.setup(&params).unwrap();

        walk(&model, &mut state, &mut GameRng::new(agent), 5_000);

        prop_assert!(state.is_terminal());
        prop_assert!(state.game_result().is_some());
    }

    #[test]
    fn redacted_copies_stay_live(seed in any::<u64>(), observer in 0u8..3) {
        let model = ForwardModel::new(Skirmish::woodland().unwrap());
        let mut state = model.setup(&GameParameters::new(3).with_seed(seed).with_max_rounds(4)).unwrap();
        RandomRollout::new(25).run(&model, &mut state, &mut GameRng::new(seed)).unwrap();

        let mut view = model.copy_for(&state, Some(PlayerId::new(observer)));
        walk(&model, &mut view, &mut GameRng::new(seed ^ 1), 5_000);
        prop_assert!(view.is_terminal());
    }
}

/// Independent rollouts from copies of one state on several threads.
#[test]
fn test_parallel_rollouts_on_copies() {
    common::init_tracing();
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let root = model
        .setup(&GameParameters::new(4).with_seed(5).with_max_rounds(10))
        .unwrap();
    let root_bytes = root.snapshot_bytes().unwrap();

    let reports: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4u64)
            .map(|worker| {
                let mut copy = root.copy();
                let model = &model;
                scope.spawn(move || {
                    let mut agent = GameRng::new(worker);
                    let report = RandomRollout::default().run(model, &mut copy, &mut agent).unwrap();
                    (report, copy.snapshot_bytes().unwrap())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(root.snapshot_bytes().unwrap(), root_bytes);
    for (report, _) in &reports {
        assert!(report.terminal);
    }
    // Same root, same agent seed: identical result regardless of thread.
    let mut again = root.copy();
    RandomRollout::default()
        .run(&model, &mut again, &mut GameRng::new(0))
        .unwrap();
    assert_eq!(again.snapshot_bytes().unwrap(), reports[0].1);
}

#[test]
fn test_rollout_reports_nesting() {
    let model = ForwardModel::new(common::ring_with_birds());
    let mut deepest = 0;
    for seed in 0..16 {
        let mut state = model
            .setup(&GameParameters::new(3).with_seed(seed).with_max_rounds(6))
            .unwrap();
        let report = RandomRollout::default()
            .run(&model, &mut state, &mut GameRng::new(seed))
            .unwrap();
        assert!(report.terminal);
        deepest = deepest.max(report.max_stack_depth);
    }
    // Campaigns with marches inside are reached.
    assert_eq!(deepest, 2);
}
