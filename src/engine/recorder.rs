use std::collections::BTreeMap;

use crate::domain::card::cards_to_string;
use crate::domain::hand::HandRecord;
use crate::engine::game_loop::Hand;

/// Снять неизменяемую запись с завершённой раздачи.
///
/// Проверок нет: вызывается только после `end_hand`.
pub fn record(hand: &Hand) -> HandRecord {
    let player_names: Vec<String> = hand.players.iter().map(|p| p.name.clone()).collect();

    let starting_stacks: BTreeMap<String, u64> = hand
        .players
        .iter()
        .zip(&hand.starting_stacks)
        .map(|(p, start)| (p.name.clone(), start.0))
        .collect();

    let player_cards: BTreeMap<String, String> = hand
        .players
        .iter()
        .map(|p| (p.name.clone(), cards_to_string(&p.hole_cards)))
        .collect();

    let payoffs: BTreeMap<String, i64> = hand
        .players
        .iter()
        .zip(hand.payoffs())
        .map(|(p, delta)| (p.name.clone(), delta))
        .collect();

    HandRecord {
        id: hand.id,
        starting_stacks,
        player_names,
        player_cards,
        action_sequence: hand.action_sequence.clone(),
        board_cards: hand.community_cards.iter().map(|c| c.to_string()).collect(),
        payoffs,
        dealer_position: hand.dealer,
        small_blind_position: hand.small_blind,
        big_blind_position: hand.big_blind,
        small_blind: hand.stakes.small_blind,
        big_blind: hand.stakes.big_blind,
        total_pot: hand.awarded_pot,
        winner_position: hand.winner,
    }
}
