use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Главный банк раздачи. Сайд-потов нет: один банк, один получатель.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self { total: Chips::ZERO }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать весь банк для выплаты. После этого банк пуст.
    pub fn take(&mut self) -> Chips {
        std::mem::take(&mut self.total)
    }
}
