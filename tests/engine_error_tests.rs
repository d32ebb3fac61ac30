// tests/engine_error_tests.rs

//! Ошибки движка:
//! - любое отклонённое действие не меняет раздачу (бит в бит);
//! - каждое правило торговли даёт свою ошибку;
//! - посадка игроков проверяется до старта раздачи.

use poker_hand_engine::domain::{
    chips::Chips,
    deck::Deck,
    table::{SeatedPlayer, TableConfig, TableStakes},
};
use poker_hand_engine::engine::{
    apply_action, start_hand_with_deck, EngineError, FirstLiveAfterDealer, Hand,
    PlayerActionKind,
};

fn config() -> TableConfig {
    TableConfig::new(TableStakes::new(Chips(50), Chips(100)), 6)
}

fn players(stacks: &[u64]) -> Vec<SeatedPlayer> {
    stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| SeatedPlayer::new(format!("P{}", i + 1), Chips(s)))
        .collect()
}

fn start(stacks: &[u64]) -> Hand {
    start_hand_with_deck(
        &config(),
        &players(stacks),
        0,
        Deck::standard_52(),
        1,
        &FirstLiveAfterDealer,
    )
    .expect("start_hand failed")
}

/// Действие должно быть отклонено с ошибкой `expected`, а раздача – остаться прежней.
fn assert_rejected(hand: &Hand, seat: u8, kind: PlayerActionKind, expected: EngineError) {
    let before = hand.clone();
    let err = apply_action(hand, seat, kind).expect_err("действие должно быть отклонено");
    assert_eq!(err, expected);
    assert!(err.is_user_error() || err == EngineError::NoActiveHand);
    assert_eq!(*hand, before, "состояние не должно меняться");
}

#[test]
fn out_of_turn_is_rejected() {
    let hand = start(&[1_000, 1_000, 1_000]);
    assert_rejected(
        &hand,
        1,
        PlayerActionKind::Fold,
        EngineError::OutOfTurn {
            seat: 1,
            expected: Some(0),
        },
    );
}

#[test]
fn check_facing_bet_is_rejected() {
    let hand = start(&[1_000, 1_000, 1_000]);
    assert_rejected(&hand, 0, PlayerActionKind::Check, EngineError::IllegalCheck);
}

#[test]
fn raise_not_above_current_bet_is_rejected() {
    let hand = start(&[1_000, 1_000, 1_000]);
    assert_rejected(
        &hand,
        0,
        PlayerActionKind::Raise(Chips(100)),
        EngineError::RaiseTooSmall {
            amount: Chips(100),
            current_bet: Chips(100),
        },
    );
}

#[test]
fn raise_above_stack_is_rejected() {
    let hand = start(&[1_000, 1_000, 1_000]);
    assert_rejected(
        &hand,
        0,
        PlayerActionKind::Raise(Chips(5_000)),
        EngineError::InsufficientStack {
            needed: Chips(5_000),
            stack: Chips(1_000),
        },
    );
}

#[test]
fn bet_rules() {
    let hand = start(&[1_000, 1_000, 1_000]);
    // Есть ставка – bet нельзя.
    assert_rejected(
        &hand,
        0,
        PlayerActionKind::Bet(Chips(200)),
        EngineError::BetNotAllowed,
    );

    // Флоп: ставки нет – нельзя call и raise, bet должен быть > 0.
    let hand = apply_action(&hand, 0, PlayerActionKind::Call).expect("call");
    let hand = apply_action(&hand, 1, PlayerActionKind::Call).expect("call");
    let hand = apply_action(&hand, 2, PlayerActionKind::Check).expect("check");
    assert_eq!(hand.current_player, Some(1));

    assert_rejected(&hand, 1, PlayerActionKind::Call, EngineError::IllegalCall);
    assert_rejected(
        &hand,
        1,
        PlayerActionKind::Raise(Chips(200)),
        EngineError::NoBetToRaise,
    );
    assert_rejected(
        &hand,
        1,
        PlayerActionKind::Bet(Chips::ZERO),
        EngineError::InvalidAmount,
    );
    assert_rejected(
        &hand,
        1,
        PlayerActionKind::Bet(Chips(901)),
        EngineError::InsufficientStack {
            needed: Chips(901),
            stack: Chips(900),
        },
    );
}

#[test]
fn folded_player_is_inactive() {
    let hand = start(&[1_000, 1_000, 1_000]);
    let hand = apply_action(&hand, 0, PlayerActionKind::Fold).expect("fold");

    // Неактивность проверяется раньше очереди.
    assert_rejected(
        &hand,
        0,
        PlayerActionKind::Call,
        EngineError::InactivePlayer(0),
    );
}

#[test]
fn unknown_seat_is_rejected() {
    let hand = start(&[1_000, 1_000, 1_000]);
    assert_rejected(&hand, 7, PlayerActionKind::Fold, EngineError::UnknownSeat(7));
}

#[test]
fn action_after_hand_end_is_no_active_hand() {
    let hand = start(&[1_000, 1_000, 1_000]);
    let hand = apply_action(&hand, 0, PlayerActionKind::Fold).expect("fold");
    let hand = apply_action(&hand, 1, PlayerActionKind::Fold).expect("fold");
    assert!(hand.ended);

    assert_rejected(&hand, 2, PlayerActionKind::Check, EngineError::NoActiveHand);
}

#[test]
fn hand_continues_after_rejection() {
    let hand = start(&[1_000, 1_000, 1_000]);
    assert!(apply_action(&hand, 0, PlayerActionKind::Check).is_err());

    // Тот же игрок ходит снова.
    let hand = apply_action(&hand, 0, PlayerActionKind::Call).expect("call");
    assert_eq!(hand.current_player, Some(1));
}

#[test]
fn seating_errors() {
    let cfg = config();
    let deck = Deck::standard_52;

    let res = start_hand_with_deck(&cfg, &players(&[1_000]), 0, deck(), 1, &FirstLiveAfterDealer);
    assert_eq!(res.err(), Some(EngineError::NotEnoughPlayers));

    let seven = players(&[1_000; 7]);
    let res = start_hand_with_deck(&cfg, &seven, 0, deck(), 1, &FirstLiveAfterDealer);
    assert_eq!(
        res.err(),
        Some(EngineError::TooManyPlayers { count: 7, max: 6 })
    );

    let res = start_hand_with_deck(
        &cfg,
        &players(&[1_000, 0, 1_000]),
        0,
        deck(),
        1,
        &FirstLiveAfterDealer,
    );
    assert_eq!(res.err(), Some(EngineError::ZeroStack(1)));

    let dup = vec![
        SeatedPlayer::new("Ann", Chips(1_000)),
        SeatedPlayer::new("Ann", Chips(1_000)),
    ];
    let res = start_hand_with_deck(&cfg, &dup, 0, deck(), 1, &FirstLiveAfterDealer);
    assert_eq!(
        res.err(),
        Some(EngineError::DuplicatePlayerName("Ann".to_string()))
    );

    let res = start_hand_with_deck(&cfg, &players(&[1_000, 1_000]), 5, deck(), 1, &FirstLiveAfterDealer);
    assert_eq!(res.err(), Some(EngineError::UnknownSeat(5)));

    // Сумма стеков не влезает в i64 – payoffs посчитать нельзя.
    let huge = players(&[u64::MAX / 2 + 1, u64::MAX / 2 + 1]);
    let res = start_hand_with_deck(&cfg, &huge, 0, deck(), 1, &FirstLiveAfterDealer);
    assert_eq!(res.err(), Some(EngineError::StacksTooLarge));

    let wrapping = players(&[u64::MAX, 1]);
    let res = start_hand_with_deck(&cfg, &wrapping, 0, deck(), 1, &FirstLiveAfterDealer);
    assert_eq!(res.err(), Some(EngineError::StacksTooLarge));

    let edge = players(&[i64::MAX as u64 - 1_000, 1_000]);
    let hand = start_hand_with_deck(&cfg, &edge, 0, deck(), 1, &FirstLiveAfterDealer)
        .expect("ровно i64::MAX на столе – можно");
    // Хедз-ап: дилер 0 на BB, первым ходит SB (место 1).
    let hand = apply_action(&hand, 1, PlayerActionKind::Fold).expect("fold");
    assert_eq!(hand.payoffs(), vec![50, -50]);
}

#[test]
fn exhausted_deck_is_fatal() {
    // Колода без карт: раздать карманные не из чего.
    let mut deck = Deck::standard_52();
    deck.draw_n(50).expect("draw");

    let err = start_hand_with_deck(
        &config(),
        &players(&[1_000, 1_000]),
        0,
        deck,
        1,
        &FirstLiveAfterDealer,
    )
    .expect_err("карт не хватит");

    assert!(matches!(err, EngineError::DeckExhausted(_)));
    assert!(err.is_fatal());
    assert!(!err.is_user_error());
}
