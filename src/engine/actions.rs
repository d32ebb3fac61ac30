use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Chips;

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Bet, когда ещё нет ставки для уравнивания. Сумма — сколько доложить.
    Bet(Chips),
    /// Raise существующей ставки. Сумма — новый общий уровень ставки в раунде.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

/// Строка не похожа на код действия.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Неизвестный код действия: {0:?}")]
pub struct ActionCodeError(pub String);

impl PlayerActionKind {
    /// Короткий код для action_sequence: `f`, `x`, `c`, `b80`, `r200`.
    ///
    /// All-in в записи раздачи кодируется фактическим действием
    /// (bet / call / raise), `allin` встречается только во входных данных.
    pub fn code(&self) -> String {
        match self {
            PlayerActionKind::Fold => "f".to_string(),
            PlayerActionKind::Check => "x".to_string(),
            PlayerActionKind::Call => "c".to_string(),
            PlayerActionKind::Bet(amount) => format!("b{}", amount.0),
            PlayerActionKind::Raise(amount) => format!("r{}", amount.0),
            PlayerActionKind::AllIn => "allin".to_string(),
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for PlayerActionKind {
    type Err = ActionCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ActionCodeError(s.to_string());
        let amount = |rest: &str| rest.parse::<u64>().map(Chips).map_err(|_| bad());

        match s {
            "f" => Ok(PlayerActionKind::Fold),
            "x" => Ok(PlayerActionKind::Check),
            "c" => Ok(PlayerActionKind::Call),
            "allin" => Ok(PlayerActionKind::AllIn),
            _ => {
                if let Some(rest) = s.strip_prefix('b') {
                    amount(rest).map(PlayerActionKind::Bet)
                } else if let Some(rest) = s.strip_prefix('r') {
                    amount(rest).map(PlayerActionKind::Raise)
                } else {
                    Err(bad())
                }
            }
        }
    }
}
