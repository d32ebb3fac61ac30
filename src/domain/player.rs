use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Статус игрока в текущей раздаче.
///
/// Переходы только в одну сторону: Active -> Folded / AllIn.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен и ещё может делать действия.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в оллыне – не может больше делать ставки.
    AllIn,
}

/// Игрок за столом в рамках одной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub seat: SeatIndex,
    pub name: String,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Ставка в текущем раунде, обнуляется на каждой улице.
    pub bet_this_round: Chips,
    /// Сколько всего внесено в банк за раздачу.
    pub bet_total: Chips,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(seat: SeatIndex, name: impl Into<String>, stack: Chips) -> Self {
        Self {
            seat,
            name: name.into(),
            stack,
            hole_cards: Vec::new(),
            bet_this_round: Chips::ZERO,
            bet_total: Chips::ZERO,
            status: PlayerStatus::Active,
        }
    }

    /// Не сфолдил (Active или AllIn).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может ещё ходить.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Сколько нужно доплатить до `current_bet`.
    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet.saturating_sub(self.bet_this_round)
    }
}
