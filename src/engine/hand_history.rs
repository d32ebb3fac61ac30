use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче. Это журнал для UI/логов, запись раздачи
/// (`HandRecord`) строится отдельно.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_id: HandId, players: usize },

    /// Кнопка/блайнды.
    BlindsPosted {
        dealer: SeatIndex,
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt { seat: SeatIndex, cards: Vec<Card> },

    /// Открыты общие карты на борде.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Действие игрока (уже в фактическом виде: all-in раскрыт в bet/call/raise).
    PlayerActed {
        seat: SeatIndex,
        action: PlayerActionKind,
        all_in: bool,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Выплата банка.
    PotAwarded { seat: SeatIndex, amount: Chips },

    /// Раздача завершена.
    HandFinished { hand_id: HandId },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Только действия игроков, по порядку.
    pub fn actions(&self) -> impl Iterator<Item = (SeatIndex, PlayerActionKind)> + '_ {
        self.events.iter().filter_map(|e| match &e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((*seat, *action)),
            _ => None,
        })
    }
}
