use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Минимум игроков для раздачи.
pub const MIN_PLAYERS: usize = 2;

/// Больше 9 игроков колода до ривера может не выдержать (2*N + 8 карт).
pub const MAX_SEATS_LIMIT: u8 = 9;

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }

    /// SB = половина BB (округление вниз).
    pub fn from_big_blind(bb: Chips) -> Self {
        Self::new(Chips(bb.0 / 2), bb)
    }
}

impl Default for TableStakes {
    fn default() -> Self {
        Self::from_big_blind(Chips(40))
    }
}

/// Конфиг стола.
///
/// Все поля имеют значения по умолчанию, так что JSON может быть частичным:
/// `{"stakes": {"small_blind": 50, "big_blind": 100}}`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub stakes: TableStakes,
    /// Максимальное количество мест за столом (2–9).
    pub max_seats: u8,
    /// Стек по умолчанию для новых игроков.
    pub default_stack: Chips,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            stakes: TableStakes::default(),
            max_seats: MAX_SEATS_LIMIT,
            default_stack: Chips(1_000),
        }
    }
}

/// Ошибки конфигурации стола.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Блайнды должны быть > 0")]
    ZeroBlind,

    #[error("SB ({small}) больше BB ({big})")]
    SmallBlindAboveBigBlind { small: Chips, big: Chips },

    #[error("Недопустимое число мест: {0} (ожидается 2..=9)")]
    BadSeatCount(u8),

    #[error("Стек по умолчанию должен быть > 0")]
    ZeroDefaultStack,

    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TableConfig {
    pub fn new(stakes: TableStakes, max_seats: u8) -> Self {
        Self {
            stakes,
            max_seats,
            ..Self::default()
        }
    }

    /// Проверить согласованность конфига.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let TableStakes {
            small_blind,
            big_blind,
        } = self.stakes;

        if small_blind.is_zero() || big_blind.is_zero() {
            return Err(ConfigError::ZeroBlind);
        }
        if small_blind > big_blind {
            return Err(ConfigError::SmallBlindAboveBigBlind {
                small: small_blind,
                big: big_blind,
            });
        }
        if !(MIN_PLAYERS as u8..=MAX_SEATS_LIMIT).contains(&self.max_seats) {
            return Err(ConfigError::BadSeatCount(self.max_seats));
        }
        if self.default_stack.is_zero() {
            return Err(ConfigError::ZeroDefaultStack);
        }
        Ok(())
    }

    /// Прочитать конфиг из JSON и сразу проверить.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: TableConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Игрок, которого садят в новую раздачу: имя + стек.
/// Индекс в списке = SeatIndex.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatedPlayer {
    pub name: String,
    pub stack: Chips,
}

impl SeatedPlayer {
    pub fn new(name: impl Into<String>, stack: Chips) -> Self {
        Self {
            name: name.into(),
            stack,
        }
    }
}
