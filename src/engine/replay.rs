//! Повтор раздачи по её записи.
//!
//! Колода собирается так, чтобы выдать те же карманные карты и тот же борд,
//! после чего все коды из `action_sequence` применяются по очереди к тому,
//! чей сейчас ход. Итоговая раздача должна дать тот же банк и те же payoffs.
//! Победитель шоудауна берётся из записи, `resolver` нужен только для
//! записей без `winner_position`.

use thiserror::Error;

use crate::domain::card::{parse_cards, Card, CardParseError};
use crate::domain::deck::Deck;
use crate::domain::hand::HandRecord;
use crate::domain::table::{SeatedPlayer, TableConfig, TableStakes, MAX_SEATS_LIMIT};
use crate::domain::Chips;
use crate::engine::actions::{ActionCodeError, PlayerActionKind};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{apply_action_with, start_hand_with_deck, Hand};
use crate::engine::showdown::{DesignatedSeat, ShowdownResolver};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Нет карманных карт у игрока {0}")]
    MissingCards(String),

    #[error(transparent)]
    BadCard(#[from] CardParseError),

    #[error(transparent)]
    BadAction(#[from] ActionCodeError),

    #[error("Действие #{index} ({code}) пришло, когда раздача уже закончилась")]
    NoActor { index: usize, code: String },

    #[error("Действие #{index} ({code}) отклонено: {source}")]
    Rejected {
        index: usize,
        code: String,
        source: EngineError,
    },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Последовательность действий не довела раздачу до конца")]
    Incomplete,
}

/// Собрать колоду, которая повторит раздачу карт из записи.
pub fn deck_for_record(record: &HandRecord) -> Result<Deck, ReplayError> {
    let n = record.player_names.len();

    let mut holes: Vec<Vec<Card>> = Vec::with_capacity(n);
    for name in &record.player_names {
        let cards = record
            .player_cards
            .get(name)
            .map(|s| parse_cards(s))
            .transpose()?
            .filter(|c| c.len() == 2)
            .ok_or_else(|| ReplayError::MissingCards(name.clone()))?;
        holes.push(cards);
    }

    let board: Vec<Card> = record
        .board_cards
        .iter()
        .map(|s| s.parse::<Card>())
        .collect::<Result<_, _>>()?;

    let mut order: Vec<Card> = Vec::with_capacity(2 * n + 8);
    let first = record.small_blind_position as usize;
    for round in 0..2 {
        for i in 0..n {
            order.push(holes[(first + i) % n][round]);
        }
    }

    // Сожжённые карты в запись не попадают – берём любые неиспользованные.
    let spare: Vec<Card> = Deck::standard_52()
        .cards
        .into_iter()
        .filter(|c| !order.contains(c) && !board.contains(c))
        .collect();
    let mut burns = spare.into_iter();

    let mut rest = board.as_slice();
    for count in [3usize, 1, 1] {
        if rest.is_empty() {
            break;
        }
        if let Some(burn) = burns.next() {
            order.push(burn);
        }
        let take = count.min(rest.len());
        order.extend_from_slice(&rest[..take]);
        rest = &rest[take..];
    }

    Ok(Deck::stacked(&order))
}

/// Проиграть раздачу заново по записи и вернуть итоговое состояние.
pub fn replay(record: &HandRecord, resolver: &dyn ShowdownResolver) -> Result<Hand, ReplayError> {
    let players: Vec<SeatedPlayer> = record
        .player_names
        .iter()
        .zip(record.stacks_in_seat_order())
        .map(|(name, stack)| SeatedPlayer::new(name.clone(), Chips(stack)))
        .collect();

    let config = TableConfig::new(
        TableStakes::new(record.small_blind, record.big_blind),
        MAX_SEATS_LIMIT,
    );

    let recorded = record.winner_position.map(DesignatedSeat);
    let resolver: &dyn ShowdownResolver = match &recorded {
        Some(seat) => seat,
        None => resolver,
    };

    let deck = deck_for_record(record)?;
    let mut hand = start_hand_with_deck(
        &config,
        &players,
        record.dealer_position,
        deck,
        record.id,
        resolver,
    )?;

    for (index, code) in record.action_sequence.iter().enumerate() {
        let kind: PlayerActionKind = code.parse()?;
        let seat = hand.current_player.ok_or_else(|| ReplayError::NoActor {
            index,
            code: code.clone(),
        })?;
        hand = apply_action_with(&hand, seat, kind, resolver).map_err(|source| {
            ReplayError::Rejected {
                index,
                code: code.clone(),
                source,
            }
        })?;
    }

    if !hand.ended {
        return Err(ReplayError::Incomplete);
    }
    Ok(hand)
}
