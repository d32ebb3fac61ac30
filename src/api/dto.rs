use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandRecord, Street};
use crate::domain::player::PlayerStatus;
use crate::domain::{HandId, SeatIndex};

/// DTO игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerViewDto {
    pub seat: SeatIndex,
    pub name: String,
    pub stack: Chips,
    pub bet_this_round: Chips,
    pub bet_total: Chips,
    pub status: PlayerStatus,
    /// Карманные карты – только свои, или всех живых после шоудауна.
    pub hole_cards: Option<Vec<Card>>,
}

/// Снимок раздачи для конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandViewDto {
    pub hand_id: HandId,
    pub street: Street,
    pub community_cards: Vec<Card>,
    pub pot: Chips,
    pub current_bet: Chips,
    pub current_player: Option<SeatIndex>,
    pub dealer: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    pub players: Vec<PlayerViewDto>,
    pub hand_ended: bool,
    pub winner: Option<SeatIndex>,
    /// Сколько выплачено победителю (0, пока раздача идёт).
    pub awarded_pot: Chips,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Успешный результат без доп.данных.
    Ok,

    /// Раздача идёт, вот её состояние.
    HandState(HandViewDto),

    /// Раздача закончилась: финальное состояние и запись.
    HandFinished {
        hand: HandViewDto,
        record: HandRecord,
    },
}
