// tests/engine_actions_tests.rs

//! Тесты action-логики покерного движка:
//! - Call списывает стек и выравнивает ставку
//! - Fold убирает игрока из очереди
//! - Bet/Raise поднимают current_bet и заново открывают очередь
//! - All-in раскрывается в bet / call / raise
//! - Коды действий и список легальных действий

use poker_hand_engine::domain::{
    chips::Chips,
    deck::Deck,
    player::PlayerStatus,
    table::{SeatedPlayer, TableConfig, TableStakes},
};
use poker_hand_engine::engine::{
    apply_action, legal_actions, start_hand_with_deck, FirstLiveAfterDealer, Hand,
    PlayerActionKind,
};

/// Хелпер: стол SB=50 / BB=100 на 6 мест.
fn config() -> TableConfig {
    TableConfig::new(TableStakes::new(Chips(50), Chips(100)), 6)
}

/// Хелпер: раздача на игроков с заданными стеками, дилер на месте 0.
///
/// При 3+ игроках: SB = место 1, BB = место 2, первым ходит место 0.
fn start_with_stacks(stacks: &[u64]) -> Hand {
    let players: Vec<SeatedPlayer> = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| SeatedPlayer::new(format!("P{}", i + 1), Chips(s)))
        .collect();
    start_hand_with_deck(
        &config(),
        &players,
        0,
        Deck::standard_52(),
        1,
        &FirstLiveAfterDealer,
    )
    .expect("start_hand failed")
}

fn act(hand: &Hand, kind: PlayerActionKind) -> Hand {
    let seat = hand.current_player.expect("кто-то должен ходить");
    apply_action(hand, seat, kind).expect("действие должно быть легальным")
}

//
// CALL
//

#[test]
fn call_pays_difference_to_current_bet() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);
    assert_eq!(hand.current_player, Some(0));
    assert_eq!(hand.current_bet(), Chips(100));
    assert_eq!(hand.pot.total, Chips(150));

    let hand = act(&hand, PlayerActionKind::Call);
    assert_eq!(hand.players[0].stack, Chips(900));
    assert_eq!(hand.players[0].bet_this_round, Chips(100));
    assert_eq!(hand.pot.total, Chips(250));
    assert_eq!(hand.current_player, Some(1));

    // SB доплачивает только половину.
    let hand = act(&hand, PlayerActionKind::Call);
    assert_eq!(hand.players[1].stack, Chips(900));
    assert_eq!(hand.players[1].bet_total, Chips(100));
    assert_eq!(hand.current_player, Some(2));
    assert_eq!(hand.action_sequence, vec!["c", "c"]);
}

//
// FOLD
//

#[test]
fn fold_removes_player_from_queue() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);

    let hand = act(&hand, PlayerActionKind::Fold);
    assert_eq!(hand.players[0].status, PlayerStatus::Folded);
    assert!(!hand.betting.to_act.contains(&0));
    assert_eq!(hand.players[0].stack, Chips(1_000));
    assert_eq!(hand.current_player, Some(1));
    assert_eq!(hand.action_sequence, vec!["f"]);
}

//
// BET / RAISE
//

#[test]
fn raise_sets_new_level_and_reopens_queue() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);

    let hand = act(&hand, PlayerActionKind::Raise(Chips(300)));
    assert_eq!(hand.current_bet(), Chips(300));
    assert_eq!(hand.betting.last_aggressor, Some(0));
    assert_eq!(hand.betting.to_act, vec![1, 2]);
    assert_eq!(hand.players[0].stack, Chips(700));

    let hand = act(&hand, PlayerActionKind::Call);
    assert_eq!(hand.players[1].bet_this_round, Chips(300));
    let hand = act(&hand, PlayerActionKind::Call);

    // Раунд закрыт – флоп, ставки раунда обнулены.
    assert_eq!(hand.community_cards.len(), 3);
    assert_eq!(hand.pot.total, Chips(900));
    assert!(hand.players.iter().all(|p| p.bet_this_round.is_zero()));
    assert_eq!(hand.action_sequence, vec!["r300", "c", "c"]);
}

#[test]
fn big_blind_option_bet_reopens_action() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);
    let hand = act(&hand, PlayerActionKind::Call);
    let hand = act(&hand, PlayerActionKind::Call);

    // BB уже уравнял – у него чек или бет.
    assert_eq!(hand.current_player, Some(2));
    let legal = legal_actions(&hand, 2);
    assert!(legal.contains(&PlayerActionKind::Check));
    assert!(legal.contains(&PlayerActionKind::Bet(Chips(100))));
    assert!(!legal.contains(&PlayerActionKind::Call));

    let hand = act(&hand, PlayerActionKind::Bet(Chips(100)));
    assert_eq!(hand.current_bet(), Chips(200));
    assert_eq!(hand.betting.to_act, vec![0, 1]);
    assert_eq!(hand.current_player, Some(0));

    let hand = act(&hand, PlayerActionKind::Call);
    let hand = act(&hand, PlayerActionKind::Call);
    assert_eq!(hand.community_cards.len(), 3);
    assert_eq!(hand.pot.total, Chips(600));
    assert_eq!(hand.action_sequence, vec!["c", "c", "b100", "c", "c"]);
}

#[test]
fn postflop_bet_starts_from_first_seat_after_dealer() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);
    let hand = act(&hand, PlayerActionKind::Call);
    let hand = act(&hand, PlayerActionKind::Call);
    let hand = act(&hand, PlayerActionKind::Check);

    assert_eq!(hand.current_player, Some(1));
    assert_eq!(hand.current_bet(), Chips::ZERO);

    let hand = act(&hand, PlayerActionKind::Bet(Chips(150)));
    assert_eq!(hand.current_bet(), Chips(150));
    assert_eq!(hand.betting.to_act, vec![2, 0]);
}

//
// ALL-IN
//

#[test]
fn all_in_over_bet_is_recorded_as_raise() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);

    let hand = act(&hand, PlayerActionKind::AllIn);
    assert_eq!(hand.players[0].status, PlayerStatus::AllIn);
    assert_eq!(hand.players[0].stack, Chips::ZERO);
    assert_eq!(hand.current_bet(), Chips(1_000));
    assert_eq!(hand.action_sequence, vec!["r1000"]);
}

#[test]
fn short_all_in_is_recorded_as_call() {
    // У первого игрока 80 против BB 100.
    let hand = start_with_stacks(&[80, 1_000, 1_000]);

    let hand = act(&hand, PlayerActionKind::AllIn);
    assert_eq!(hand.players[0].bet_this_round, Chips(80));
    assert_eq!(hand.players[0].status, PlayerStatus::AllIn);
    // Ставка стола не уменьшается.
    assert_eq!(hand.current_bet(), Chips(100));
    assert_eq!(hand.action_sequence, vec!["c"]);
}

#[test]
fn all_in_with_no_bet_is_recorded_as_bet() {
    let hand = start_with_stacks(&[1_000, 1_000, 600]);
    let hand = act(&hand, PlayerActionKind::Call);
    let hand = act(&hand, PlayerActionKind::Call);
    let hand = act(&hand, PlayerActionKind::Check);

    // Флоп, первым ходит место 1 (стек 900).
    let hand = act(&hand, PlayerActionKind::AllIn);
    assert_eq!(hand.action_sequence.last().map(String::as_str), Some("b900"));
    assert_eq!(hand.current_bet(), Chips(900));
}

//
// CODES / LEGAL ACTIONS
//

#[test]
fn action_codes_roundtrip() {
    let cases = [
        (PlayerActionKind::Fold, "f"),
        (PlayerActionKind::Check, "x"),
        (PlayerActionKind::Call, "c"),
        (PlayerActionKind::Bet(Chips(80)), "b80"),
        (PlayerActionKind::Raise(Chips(200)), "r200"),
    ];
    for (kind, code) in cases {
        assert_eq!(kind.code(), code);
        assert_eq!(code.parse::<PlayerActionKind>(), Ok(kind));
    }

    assert_eq!("allin".parse::<PlayerActionKind>(), Ok(PlayerActionKind::AllIn));
    assert!("b".parse::<PlayerActionKind>().is_err());
    assert!("z10".parse::<PlayerActionKind>().is_err());
}

#[test]
fn legal_actions_facing_bet() {
    let hand = start_with_stacks(&[1_000, 1_000, 1_000]);

    assert_eq!(
        legal_actions(&hand, 0),
        vec![
            PlayerActionKind::Fold,
            PlayerActionKind::Call,
            PlayerActionKind::Raise(Chips(200)),
            PlayerActionKind::AllIn,
        ]
    );

    // Не его ход – ничего.
    assert!(legal_actions(&hand, 1).is_empty());
}
