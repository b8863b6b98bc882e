use game_core::{
    ActionError, ActionOutcome, ActorState, BumpAction, ChangeFloorAction, Direction,
    EntitiesState, EntityId, FloorDirection, GameState, MoveAction, Position, Speed, Tick,
    WaitAction, WorldState,
};
use runtime::{
    ItemOracleImpl, MapOracleImpl, OracleBundle, PlayerCommand, ScriptedInput, Session,
    SessionEnd, TurnReport,
};

const CORRIDOR: &[&str] = &[
    "#######", //
    "#.....#", //
    "#######",
];

const UPPER: &[&str] = &[
    "######", //
    "#>...#", //
    "######",
];

const LOWER: &[&str] = &[
    "######", //
    "#<...#", //
    "######",
];

fn session(floors: &[&[&str]], npcs: Vec<ActorState>, player: ActorState) -> Session {
    let state = GameState::new(5, EntitiesState::new(player, npcs, Vec::new()), WorldState::new(0));
    Session::builder()
        .initial_state(state)
        .oracles(OracleBundle::new(
            MapOracleImpl::from_ascii(floors),
            ItemOracleImpl::standard(),
        ))
        .build()
        .unwrap()
}

fn player() -> ActorState {
    ActorState::player("Player", Position::new(1, 1), 30).with_combat(5, 1)
}

fn wait() -> game_core::Action {
    WaitAction::new(EntityId::PLAYER).into()
}

#[test]
fn move_into_wall_is_rejected_without_consuming_time() {
    let mut session = session(&[CORRIDOR], Vec::new(), player());

    let report = session
        .submit(MoveAction::new(EntityId::PLAYER, Direction::North).into())
        .unwrap();

    assert!(matches!(
        report,
        TurnReport::Rejected {
            error: ActionError::Blocked { .. }
        }
    ));
    assert_eq!(session.orchestrator().elapsed(), Tick::ZERO);
    assert_eq!(session.state().nonce, 0);
    assert!(session.orchestrator().schedule().is_empty());
    assert_eq!(
        session.messages().last().map(|entry| entry.text.as_str()),
        Some("That way is blocked.")
    );

    // The rejected intent is gone; a fresh one resolves normally.
    let report = session.submit(wait()).unwrap();
    assert!(report.is_completed());
    assert_eq!(session.orchestrator().elapsed(), Tick(10));
}

#[test]
fn stale_npc_intent_is_discarded_without_redecision() {
    // Slow goblin (delay 20) decides to step into the tile the player takes first.
    let goblin = ActorState::new(EntityId(1), "goblin", Position::new(3, 1), 8)
        .with_combat(3, 0)
        .with_speed(Speed::new(5).unwrap());
    let mut session = session(&[CORRIDOR], vec![goblin], player());

    let report = session
        .submit(MoveAction::new(EntityId::PLAYER, Direction::East).into())
        .unwrap();
    assert!(report.is_completed());
    assert!(session.orchestrator().schedule().has_pending(EntityId(1)));

    session.submit(wait()).unwrap();

    let goblin = session.state().entities.actor(EntityId(1)).unwrap();
    assert_eq!(goblin.position, Position::new(3, 1));
    assert!(session.state().player().health.is_full());
    // Two player intents executed; the goblin's stale move did not count.
    assert_eq!(session.state().nonce, 2);
    assert!(session.orchestrator().schedule().is_empty());
}

#[test]
fn bump_resolves_against_state_at_execution_time() {
    // The goblin (delay 5) steps into the empty target tile before the
    // player's bump (delay 10) resolves, turning the bump into an attack.
    let goblin = ActorState::new(EntityId(1), "goblin", Position::new(3, 1), 8)
        .with_combat(3, 0)
        .with_speed(Speed::new(20).unwrap());
    let mut session = session(&[CORRIDOR], vec![goblin], player());
    assert!(
        session
            .state()
            .entities
            .living_actor_at(0, Position::new(2, 1))
            .is_none()
    );

    let report = session
        .submit(BumpAction::new(EntityId::PLAYER, Direction::East).into())
        .unwrap();

    assert!(report.is_completed());
    assert_eq!(session.state().player().position, Position::new(1, 1));
    let goblin = session.state().entities.actor(EntityId(1)).unwrap();
    assert_eq!(goblin.position, Position::new(2, 1));
    assert_eq!(goblin.health.current, 3);
    assert!(
        session
            .messages()
            .iter()
            .any(|entry| entry.text == "Player attacks goblin for 5 hit points.")
    );
}

#[test]
fn floor_change_cancels_pending_npc_intents() {
    let sloth = ActorState::new(EntityId(1), "sloth", Position::new(4, 1), 8)
        .with_speed(Speed::new(3).unwrap());
    let mut session = session(&[UPPER, LOWER], vec![sloth], player());

    session.submit(wait()).unwrap();
    assert!(session.orchestrator().schedule().has_pending(EntityId(1)));

    let report = session
        .submit(ChangeFloorAction::new(EntityId::PLAYER, FloorDirection::Down).into())
        .unwrap();
    assert_eq!(
        report,
        TurnReport::Completed {
            delay: Tick(10),
            outcome: ActionOutcome::FloorChanged { depth: 1 }
        }
    );
    assert!(session.orchestrator().schedule().is_empty());
    assert_eq!(session.state().world.depth, 1);
    assert_eq!(session.state().player().position, Position::new(1, 1));
    assert!(session.state().world.is_visible(Position::new(4, 1)));

    // Actors left upstairs are no longer asked for decisions.
    session.submit(wait()).unwrap();
    assert!(session.orchestrator().schedule().is_empty());
}

#[test]
fn player_death_ends_the_run() {
    let brute = ActorState::new(EntityId(1), "ogre", Position::new(2, 1), 20).with_combat(40, 0);
    let frail = ActorState::player("Player", Position::new(1, 1), 5);
    let mut session = session(&[CORRIDOR], vec![brute], frail);

    let mut input = ScriptedInput::new(vec![PlayerCommand::Act(wait()); 4]);
    let end = session.run(&mut input).unwrap();

    assert_eq!(end, SessionEnd::PlayerDied);
    assert!(!session.state().player().is_alive());
    assert!(session.messages().iter().any(|entry| entry.text == "You died!"));
    assert!(!session.orchestrator().schedule().has_pending(EntityId::PLAYER));
    assert!(input.remaining() > 0);
}
