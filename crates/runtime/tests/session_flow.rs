//! Turn-cycle scenarios driven against the bundled content.

mod common;

use battle_core::{AttackModifiers, StatusKind, TurnStage};
use battle_runtime::{AttackRequest, RuntimeError};

#[test]
fn identical_seeds_replay_identical_battles() {
    let run = |seed| {
        let mut session = common::session("replay", seed);
        let goblin = session.add_enemy("goblin").unwrap();
        let orc = session.add_enemy("orc").unwrap();
        let first = session.enemy_turn(goblin.as_str()).unwrap();
        session.next();
        let second = session.enemy_turn(orc.as_str()).unwrap();
        (session.to_payload().enemies, first, second)
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn a_round_passes_the_turn_through_the_order() {
    let mut session = common::session("round", 3);
    let goblin = session.add_enemy("goblin").unwrap();
    let cultist = session.add_enemy("cultist").unwrap();
    let player = session.add_player().unwrap();
    session.select(goblin.as_str()).unwrap();

    session.enemy_turn(goblin.as_str()).unwrap();
    assert!(matches!(
        session.enemy_turn(cultist.as_str()),
        Err(RuntimeError::AnotherTurnActive { active }) if active == goblin
    ));

    let next = session.next();
    assert_eq!(next.selected.as_ref(), Some(&cultist));
    assert!(next.closed.is_some());
    assert_eq!(session.stage_of(goblin.as_str()), TurnStage::Idle);

    session.enemy_turn(cultist.as_str()).unwrap();
    session.end_turn(cultist.as_str()).unwrap();

    let next = session.next();
    assert_eq!(next.selected.as_ref(), Some(&player));
    assert!(next.closed.is_none());
    assert!(matches!(
        session.enemy_turn(player.as_str()),
        Err(RuntimeError::PlayerHasNoTurn(_))
    ));
}

#[test]
fn burning_enemy_goes_down_and_stops_drawing() {
    let mut session = common::session("burn", 5);
    let goblin = session.add_enemy("goblin").unwrap();
    let hp = session.get(goblin.as_str()).unwrap().hp_current;

    let burn = AttackRequest {
        burn: true,
        ..AttackRequest::new(0)
    };
    for _ in 0..hp {
        session.apply_attack(goblin.as_str(), burn).unwrap();
    }
    assert_eq!(
        session
            .get(goblin.as_str())
            .unwrap()
            .statuses
            .stacks(StatusKind::Burn),
        hp
    );

    let report = session.enemy_turn(goblin.as_str()).unwrap();
    let enemy = session.get(goblin.as_str()).unwrap();
    assert_eq!(report.turn.start.dot_damage, hp);
    assert!(enemy.is_down());
    assert!(report.turn.draw.drawn.is_empty());
    assert!(enemy.deck_state.hand.is_empty());
    assert!(session.roster().contains(goblin.as_str()));
}

#[test]
fn paralysed_enemy_draws_one_fewer_card() {
    let mut session = common::session("paralyse", 9);
    let goblin = session.add_enemy("goblin").unwrap();

    let hit = AttackRequest::new(0).with_modifiers(AttackModifiers::PARALYSE);
    session.apply_attack(goblin.as_str(), hit).unwrap();

    let report = session.enemy_turn(goblin.as_str()).unwrap();
    assert_eq!(report.turn.draw.drawn.len(), 1);

    let ended = session.end_turn(goblin.as_str()).unwrap();
    assert_eq!(ended.end.removed_statuses, vec![StatusKind::Paralyzed]);
}

#[test]
fn cards_are_conserved_across_many_turns() {
    let mut session = common::session("conserve", 21);
    let goblin = session.add_enemy("goblin").unwrap();
    let total = session
        .get(goblin.as_str())
        .unwrap()
        .deck_state
        .total_cards();

    for _ in 0..25 {
        session.enemy_turn(goblin.as_str()).unwrap();
        let enemy = session.get(goblin.as_str()).unwrap();
        assert_eq!(enemy.deck_state.total_cards(), total);
        session.end_turn(goblin.as_str()).unwrap();
    }
}
