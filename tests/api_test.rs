// tests/api_test.rs

//! Тесты внешнего API:
//! - разбор ActionIntent из JSON (`fold` / `check` / ... / `all-in`)
//! - команды над сессией и маппинг ошибок движка в ApiError
//! - снимок раздачи скрывает чужие карты, шоудаун их открывает
//! - запросы к истории раздач

use poker_hand_engine::api::{
    build_hand_view, handle_command, handle_query, ActionIntent, ApiError, Command,
    CommandResponse, IntentAction, PlayerActionCommand, Query, QueryResponse, StartHandCommand,
};
use poker_hand_engine::domain::{
    chips::Chips,
    deck::Deck,
    hand::Street,
    table::{SeatedPlayer, TableConfig, TableStakes},
};
use poker_hand_engine::engine::{
    apply_action, start_hand_with_deck, EngineError, FirstLiveAfterDealer, GameSession,
    PlayerActionKind,
};
use poker_hand_engine::infra::{DeterministicRng, InMemoryHandHistory};

type Session = GameSession<DeterministicRng, InMemoryHandHistory>;

fn config() -> TableConfig {
    TableConfig::new(TableStakes::new(Chips(50), Chips(100)), 6)
}

fn session() -> Session {
    GameSession::new(config(), DeterministicRng::from_seed(11), InMemoryHandHistory::new())
        .expect("valid config")
}

fn start_cmd(names: &[&str]) -> Command {
    Command::StartHand(StartHandCommand {
        players: names.iter().map(|s| s.to_string()).collect(),
        stacks: None,
        dealer: Some(0),
    })
}

fn action_cmd(seat: u8, action: IntentAction, amount: Option<u64>) -> Command {
    Command::PlayerAction(PlayerActionCommand {
        seat,
        intent: ActionIntent { action, amount },
    })
}

//
// INTENTS
//

#[test]
fn intents_parse_from_json() {
    let all_in: ActionIntent = serde_json::from_str(r#"{"action": "all-in"}"#).expect("json");
    assert_eq!(all_in.action, IntentAction::AllIn);
    assert_eq!(PlayerActionKind::try_from(all_in), Ok(PlayerActionKind::AllIn));

    let raise: ActionIntent =
        serde_json::from_str(r#"{"action": "raise", "amount": 300}"#).expect("json");
    assert_eq!(
        PlayerActionKind::try_from(raise),
        Ok(PlayerActionKind::Raise(Chips(300)))
    );

    let bet = ActionIntent {
        action: IntentAction::Bet,
        amount: None,
    };
    assert!(matches!(
        PlayerActionKind::try_from(bet),
        Err(ApiError::BadRequest(_))
    ));

    assert!(serde_json::from_str::<ActionIntent>(r#"{"action": "shove"}"#).is_err());
}

#[test]
fn intents_serialize_kebab_case() {
    let json = serde_json::to_string(&ActionIntent::from(PlayerActionKind::AllIn)).expect("json");
    assert_eq!(json, r#"{"action":"all-in"}"#);

    let json =
        serde_json::to_string(&ActionIntent::from(PlayerActionKind::Bet(Chips(80)))).expect("json");
    assert_eq!(json, r#"{"action":"bet","amount":80}"#);
}

//
// COMMANDS
//

#[test]
fn start_and_act_through_commands() {
    let mut s = session();

    let resp = handle_command(&mut s, start_cmd(&["Ann", "Bob", "Cid"]), Some(0)).expect("start");
    let CommandResponse::HandState(view) = resp else {
        panic!("раздача должна идти");
    };
    assert_eq!(view.street, Street::Preflop);
    assert_eq!(view.pot, Chips(150));
    assert_eq!(view.current_bet, Chips(100));
    assert_eq!(view.current_player, Some(0));
    assert_eq!(view.players[0].stack, Chips(1_000));
    assert!(!view.hand_ended);

    handle_command(&mut s, action_cmd(0, IntentAction::Fold, None), Some(0)).expect("fold");
    let resp =
        handle_command(&mut s, action_cmd(1, IntentAction::Fold, None), Some(0)).expect("fold");

    let CommandResponse::HandFinished { hand, record } = resp else {
        panic!("два фолда заканчивают раздачу");
    };
    assert!(hand.hand_ended);
    assert_eq!(hand.winner, Some(2));
    assert_eq!(record.payoffs["Cid"], 50);
    assert_eq!(record.action_sequence, vec!["f", "f"]);
}

#[test]
fn engine_errors_map_to_api_errors() {
    let mut s = session();

    assert_eq!(
        handle_command(&mut s, action_cmd(0, IntentAction::Fold, None), None),
        Err(ApiError::NoActiveHand)
    );

    assert!(matches!(
        handle_command(&mut s, start_cmd(&["Solo"]), None),
        Err(ApiError::BadRequest(_))
    ));

    let bad_stacks = Command::StartHand(StartHandCommand {
        players: vec!["Ann".to_string(), "Bob".to_string()],
        stacks: Some(vec![500]),
        dealer: None,
    });
    assert!(matches!(
        handle_command(&mut s, bad_stacks, None),
        Err(ApiError::BadRequest(_))
    ));

    handle_command(&mut s, start_cmd(&["Ann", "Bob", "Cid"]), None).expect("start");
    assert!(matches!(
        handle_command(&mut s, action_cmd(2, IntentAction::Check, None), None),
        Err(ApiError::IllegalAction(_))
    ));
    assert!(matches!(
        handle_command(&mut s, action_cmd(0, IntentAction::Check, None), None),
        Err(ApiError::IllegalAction(_))
    ));

    assert_eq!(
        ApiError::from(EngineError::Internal("сломано")),
        ApiError::Internal("Внутренняя ошибка: сломано".to_string())
    );
}

#[test]
fn explicit_stacks_are_used() {
    let mut s = session();
    let cmd = Command::StartHand(StartHandCommand {
        players: vec!["Ann".to_string(), "Bob".to_string()],
        stacks: Some(vec![500, 700]),
        dealer: Some(1),
    });

    let CommandResponse::HandState(view) = handle_command(&mut s, cmd, None).expect("start") else {
        panic!("раздача должна идти");
    };
    // Дилер 1: SB – место 0, BB – место 1.
    assert_eq!(view.dealer, 1);
    assert_eq!(view.small_blind, 0);
    assert_eq!(view.players[0].stack, Chips(450));
    assert_eq!(view.players[1].stack, Chips(600));
}

#[test]
fn abandon_command() {
    let mut s = session();
    handle_command(&mut s, start_cmd(&["Ann", "Bob"]), None).expect("start");

    assert_eq!(
        handle_command(&mut s, Command::AbandonHand, None),
        Ok(CommandResponse::Ok)
    );
    assert_eq!(
        handle_command(&mut s, Command::AbandonHand, None),
        Err(ApiError::NoActiveHand)
    );
}

//
// VIEW REDACTION
//

#[test]
fn view_shows_only_own_hole_cards() {
    let mut s = session();
    let CommandResponse::HandState(view) =
        handle_command(&mut s, start_cmd(&["Ann", "Bob", "Cid"]), Some(1)).expect("start")
    else {
        panic!("раздача должна идти");
    };

    assert!(view.players[0].hole_cards.is_none());
    assert_eq!(view.players[1].hole_cards.as_ref().map(Vec::len), Some(2));
    assert!(view.players[2].hole_cards.is_none());

    // Наблюдатель не видит ничего.
    let hand = s.hand().expect("раздача идёт");
    let observer = build_hand_view(hand, None);
    assert!(observer.players.iter().all(|p| p.hole_cards.is_none()));
}

#[test]
fn showdown_reveals_live_hands_only() {
    let players: Vec<SeatedPlayer> = ["Ann", "Bob", "Cid"]
        .iter()
        .map(|n| SeatedPlayer::new(*n, Chips(1_000)))
        .collect();
    let hand = start_hand_with_deck(
        &config(),
        &players,
        0,
        Deck::standard_52(),
        1,
        &FirstLiveAfterDealer,
    )
    .expect("start");

    let hand = apply_action(&hand, 0, PlayerActionKind::Fold).expect("fold");
    let hand = apply_action(&hand, 1, PlayerActionKind::AllIn).expect("all-in");
    let hand = apply_action(&hand, 2, PlayerActionKind::Call).expect("call");
    assert!(hand.ended);
    assert_eq!(hand.street, Street::Showdown);

    let view = build_hand_view(&hand, None);
    assert!(view.players[0].hole_cards.is_none(), "сфолдивший не вскрывается");
    assert!(view.players[1].hole_cards.is_some());
    assert!(view.players[2].hole_cards.is_some());
    assert_eq!(view.community_cards.len(), 5);
    assert_eq!(view.awarded_pot, Chips(2_000));
    assert_eq!(view.pot, Chips::ZERO);
}

//
// QUERIES
//

#[test]
fn queries_read_session_and_history() {
    let mut s = session();

    assert!(matches!(
        handle_query(&s, Query::GetHand { viewer: None }),
        Err(ApiError::NoActiveHand)
    ));

    handle_command(&mut s, start_cmd(&["Ann", "Bob", "Cid"]), None).expect("start");

    let Ok(QueryResponse::LegalActions(actions)) = handle_query(&s, Query::LegalActions { seat: 0 })
    else {
        panic!("ожидался список действий");
    };
    assert_eq!(
        actions,
        vec![
            ActionIntent::from(PlayerActionKind::Fold),
            ActionIntent::from(PlayerActionKind::Call),
            ActionIntent::from(PlayerActionKind::Raise(Chips(200))),
            ActionIntent::from(PlayerActionKind::AllIn),
        ]
    );

    handle_command(&mut s, action_cmd(0, IntentAction::Fold, None), None).expect("fold");
    handle_command(&mut s, action_cmd(1, IntentAction::Fold, None), None).expect("fold");

    let Ok(QueryResponse::Hands(hands)) = handle_query(&s, Query::ListHands) else {
        panic!("ожидался список раздач");
    };
    assert_eq!(hands.len(), 1);
    let id = hands[0].id;

    assert!(matches!(
        handle_query(&s, Query::GetHandRecord { id }),
        Ok(QueryResponse::Record(r)) if r.id == id
    ));
    assert!(matches!(
        handle_query(&s, Query::GetHandRecord { id: 999 }),
        Err(ApiError::HandNotFound(999))
    ));

    let Ok(QueryResponse::Hand(view)) = handle_query(&s, Query::GetHand { viewer: Some(0) })
    else {
        panic!("последняя раздача видна");
    };
    assert!(view.hand_ended);
}
