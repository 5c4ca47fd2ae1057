//! Turn order tests: coverage, elimination skipping, rosters and round limits.

mod common;

use rust_fm::core::{GameParameters, GameRng, PlayerId, PlayerResult};
use rust_fm::forward::ForwardModel;
use rust_fm::games::duel::{active_unit, Duel, DuelAction};
use rust_fm::games::skirmish::{Skirmish, SkirmishAction};
use rust_fm::rollout::RandomRollout;
use rust_fm::RosterTurnOrder;

fn pass(model: &ForwardModel<Skirmish>, state: &mut rust_fm::GameState<Skirmish>) -> PlayerId {
    let player = state.current_player();
    model.apply(state, &SkirmishAction::Pass { player }).unwrap();
    player
}

/// Every participant owns exactly one turn per round.
#[test]
fn test_round_covers_every_participant() {
    common::init_tracing();
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model
        .setup(&GameParameters::new(4).with_first_player(PlayerId::new(2)))
        .unwrap();

    let order: Vec<u8> = (0..8).map(|_| pass(&model, &mut state).0).collect();
    assert_eq!(order, vec![2, 3, 0, 1, 2, 3, 0, 1]);
    assert_eq!(state.round(), 2);
    assert_eq!(state.turn(), 0);
}

/// Four participants, 1 and 2 eliminated: passing from 0 visits 0, 3, 0, 3...
#[test]
fn test_eliminated_participants_are_skipped() {
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model.setup(&GameParameters::new(4)).unwrap();
    state.eliminate(PlayerId::new(1));
    state.eliminate(PlayerId::new(2));
    assert_eq!(state.alive_players(), vec![PlayerId::new(0), PlayerId::new(3)]);

    let order: Vec<u8> = (0..6).map(|_| pass(&model, &mut state).0).collect();
    assert_eq!(order, vec![0, 3, 0, 3, 0, 3]);
    assert_eq!(state.round(), 3);
    assert_eq!(state.result(PlayerId::new(1)), PlayerResult::Lose);
}

#[test]
fn test_elimination_of_the_next_participant() {
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model.setup(&GameParameters::new(4)).unwrap();

    assert_eq!(pass(&model, &mut state).0, 0);
    state.eliminate(PlayerId::new(2));
    assert_eq!(pass(&model, &mut state).0, 1);
    // 2 is skipped, and the round still ends after the last live participant.
    assert_eq!(pass(&model, &mut state).0, 3);
    assert_eq!(state.round(), 1);
    assert_eq!(state.current_player(), PlayerId::new(0));
}

/// A participant eliminated after acting does not cut the round short.
#[test]
fn test_elimination_after_acting_keeps_round_open() {
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model.setup(&GameParameters::new(3)).unwrap();

    let mut order = vec![pass(&model, &mut state).0];
    state.eliminate(PlayerId::new(0));
    order.push(pass(&model, &mut state).0);
    assert_eq!(state.round(), 0);
    order.push(pass(&model, &mut state).0);

    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(state.round(), 1);
    assert_eq!(state.current_player(), PlayerId::new(1));
}

/// Every live participant owns a turn in every round, whoever drops out.
#[test]
fn test_every_live_participant_covered_each_round() {
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model.setup(&GameParameters::new(4)).unwrap();
    let drops = [(1, 3), (2, 0)];

    for round in 0..4u32 {
        let mut owners = Vec::new();
        while state.round() == round && !state.is_terminal() {
            owners.push(pass(&model, &mut state));
            if let Some(&(_, victim)) = drops.iter().find(|&&(r, _)| r == round) {
                if owners.len() == 2 {
                    state.eliminate(PlayerId::new(victim));
                }
            }
        }
        for player in state.alive_players() {
            assert!(owners.contains(&player), "round {round}: {player} never owned a turn");
        }
    }
    assert_eq!(state.alive_players(), vec![PlayerId::new(1), PlayerId::new(2)]);
}

#[test]
fn test_last_participant_standing_ends_game() {
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model.setup(&GameParameters::new(3)).unwrap();
    state.eliminate(PlayerId::new(1));
    state.eliminate(PlayerId::new(2));

    pass(&model, &mut state);
    assert!(state.is_terminal());
    assert_eq!(state.result(PlayerId::new(0)), PlayerResult::Win);
    assert_eq!(state.game_result(), Some(rust_fm::GameResult::Winner(PlayerId::new(0))));
}

#[test]
fn test_round_limit_ends_game_with_ranking() {
    let model = ForwardModel::new(Skirmish::woodland().unwrap());
    let mut state = model
        .setup(&GameParameters::new(2).with_max_rounds(3))
        .unwrap();
    for _ in 0..6 {
        pass(&model, &mut state);
    }

    assert!(state.is_terminal());
    assert_eq!(state.round(), 3);
    // Each side rules only its home.
    assert_eq!(state.game_result(), Some(rust_fm::GameResult::Draw));
    assert_eq!(state.result(PlayerId::new(0)), PlayerResult::Draw);
    assert_eq!(state.result(PlayerId::new(1)), PlayerResult::Draw);
}

/// Each participant activates all of its units before the next group.
#[test]
fn test_roster_order_groups_units() {
    let model = ForwardModel::new(Duel::standard());
    let mut state = model.setup(&GameParameters::new(3)).unwrap();

    let mut trace = Vec::new();
    for _ in 0..9 {
        let owner = state.current_player();
        let unit = active_unit(&state).unwrap();
        let order: &RosterTurnOrder = state.turn_order();
        trace.push((owner.0, order.active_unit(), unit.0));
        model
            .apply(&mut state, &DuelAction::Guard { player: owner, unit })
            .unwrap();
    }

    let expected = vec![
        (0, 0, 0),
        (0, 1, 1),
        (0, 2, 2),
        (1, 0, 3),
        (1, 1, 4),
        (1, 2, 5),
        (2, 0, 6),
        (2, 1, 7),
        (2, 2, 8),
    ];
    assert_eq!(trace, expected);
    assert_eq!(state.round(), 1);
    assert_eq!(state.current_player(), PlayerId::new(0));
}

/// A duel played out to the end leaves exactly one winner.
#[test]
fn test_duel_rollout_ends_with_one_winner() {
    common::init_tracing();
    let model = ForwardModel::new(Duel::standard());
    let mut state = model.setup(&GameParameters::new(2).with_seed(31)).unwrap();

    let report = RandomRollout::default()
        .run(&model, &mut state, &mut GameRng::new(31))
        .unwrap();
    assert!(report.terminal);

    let winners: Vec<PlayerId> = PlayerId::all(2)
        .filter(|&p| state.result(p) == PlayerResult::Win)
        .collect();
    assert_eq!(winners.len(), 1);
    let loser = PlayerId::new(1 - winners[0].0);
    assert_eq!(state.result(loser), PlayerResult::Lose);
    assert!(state.data().live_units(loser).is_empty());
    assert_eq!(state.game_result(), Some(rust_fm::GameResult::Winner(winners[0])));
}

/// Eliminated groups are passed over without breaking the round.
#[test]
fn test_roster_skips_eliminated_groups() {
    let model = ForwardModel::new(Duel::standard());
    let mut state = model.setup(&GameParameters::new(4)).unwrap();
    for loser in [1, 3] {
        state.eliminate(PlayerId::new(loser));
    }
    let mut owners = Vec::new();
    for _ in 0..6 {
        let owner = state.current_player();
        let unit = active_unit(&state).unwrap();
        owners.push(owner.0);
        model
            .apply(&mut state, &DuelAction::Guard { player: owner, unit })
            .unwrap();
    }
    assert_eq!(owners, vec![0, 0, 0, 2, 2, 2]);
    assert_eq!(state.round(), 1);
}
