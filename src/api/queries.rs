use serde::{Deserialize, Serialize};

use crate::domain::hand::{HandRecord, Street};
use crate::domain::{HandId, SeatIndex};
use crate::engine::game_loop::Hand;
use crate::engine::{GameSession, RandomSource};
use crate::infra::persistence::HandHistorySink;

use super::commands::ActionIntent;
use super::dto::{HandViewDto, PlayerViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Текущая раздача глазами места `viewer` (None – наблюдатель).
    GetHand { viewer: Option<SeatIndex> },

    /// Все сохранённые записи, от новых к старым.
    ListHands,

    /// Одна запись по id.
    GetHandRecord { id: HandId },

    /// Что может сделать место прямо сейчас.
    LegalActions { seat: SeatIndex },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Hand(HandViewDto),
    Hands(Vec<HandRecord>),
    Record(HandRecord),
    LegalActions(Vec<ActionIntent>),
}

/// Сформировать DTO раздачи для зрителя.
///
/// Чужие карманные карты скрыты; после шоудауна открываются карты
/// всех, кто дошёл до конца.
pub fn build_hand_view(hand: &Hand, viewer: Option<SeatIndex>) -> HandViewDto {
    let showdown = hand.ended && hand.street == Street::Showdown;

    let players = hand
        .players
        .iter()
        .map(|p| {
            let visible = viewer == Some(p.seat) || (showdown && p.is_in_hand());
            PlayerViewDto {
                seat: p.seat,
                name: p.name.clone(),
                stack: p.stack,
                bet_this_round: p.bet_this_round,
                bet_total: p.bet_total,
                status: p.status,
                hole_cards: visible.then(|| p.hole_cards.clone()),
            }
        })
        .collect();

    HandViewDto {
        hand_id: hand.id,
        street: hand.street,
        community_cards: hand.community_cards.clone(),
        pot: hand.pot.total,
        current_bet: hand.current_bet(),
        current_player: hand.current_player,
        dealer: hand.dealer,
        small_blind: hand.small_blind,
        big_blind: hand.big_blind,
        players,
        hand_ended: hand.ended,
        winner: hand.winner,
        awarded_pot: hand.awarded_pot,
    }
}

pub fn handle_query<R: RandomSource, S: HandHistorySink>(
    session: &GameSession<R, S>,
    query: Query,
) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetHand { viewer } => {
            let hand = session.hand().ok_or(ApiError::NoActiveHand)?;
            Ok(QueryResponse::Hand(build_hand_view(hand, viewer)))
        }
        Query::ListHands => Ok(QueryResponse::Hands(session.sink().list())),
        Query::GetHandRecord { id } => session
            .sink()
            .get(id)
            .map(QueryResponse::Record)
            .ok_or(ApiError::HandNotFound(id)),
        Query::LegalActions { seat } => {
            if session.hand().is_none() {
                return Err(ApiError::NoActiveHand);
            }
            let actions = session
                .legal_actions(seat)
                .into_iter()
                .map(ActionIntent::from)
                .collect();
            Ok(QueryResponse::LegalActions(actions))
        }
    }
}
