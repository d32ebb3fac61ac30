use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{HandId, SeatIndex};

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Следующая улица (Showdown -> None).
    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => Some(Street::Showdown),
            Street::Showdown => None,
        }
    }

    /// Сколько карт борда открывается при переходе НА эту улицу.
    pub fn board_cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }
}

/// Неизменяемая запись завершённой раздачи. Это то, что уходит в историю.
///
/// Ключи словарей — имена игроков; порядок мест хранится в `player_names`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandRecord {
    pub id: HandId,
    pub starting_stacks: BTreeMap<String, u64>,
    pub player_names: Vec<String>,
    /// Карманные карты строкой вида `"AhKd"`.
    pub player_cards: BTreeMap<String, String>,
    /// Коды действий: `f`, `x`, `c`, `b<amt>`, `r<amt>`.
    pub action_sequence: Vec<String>,
    pub board_cards: Vec<String>,
    /// Чистый результат по игрокам. Сумма всегда 0.
    pub payoffs: BTreeMap<String, i64>,
    pub dealer_position: SeatIndex,
    pub small_blind_position: SeatIndex,
    pub big_blind_position: SeatIndex,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Банк на момент выплаты.
    pub total_pot: Chips,
    /// Кому ушёл банк. Старые записи без поля – реплей спросит resolver.
    #[serde(default)]
    pub winner_position: Option<SeatIndex>,
}

impl HandRecord {
    /// Стартовые стеки в порядке мест.
    pub fn stacks_in_seat_order(&self) -> Vec<u64> {
        self.player_names
            .iter()
            .map(|name| self.starting_stacks.get(name).copied().unwrap_or(0))
            .collect()
    }

    pub fn payoffs_sum(&self) -> i64 {
        self.payoffs.values().sum()
    }
}
