use thiserror::Error;

use crate::domain::{Chips, DeckExhausted, SeatIndex};

/// Ошибки движка покера.
///
/// Пользовательские ошибки (ход не в свою очередь, нелегальный check и т.п.)
/// состояние не меняют: раздача продолжается, тот же seat ходит снова.
/// `DeckExhausted` и `Internal` — нарушение инвариантов, раздача прерывается.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Сейчас ход места {expected:?}, а не {seat}")]
    OutOfTurn {
        seat: SeatIndex,
        expected: Option<SeatIndex>,
    },

    #[error("Игрок на месте {0} уже не может действовать")]
    InactivePlayer(SeatIndex),

    #[error("Невозможно выполнить check – нужно хотя бы уравнять ставку")]
    IllegalCheck,

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    IllegalCall,

    #[error("Bet невозможен – ставка уже есть, нужен call или raise")]
    BetNotAllowed,

    #[error("Raise невозможен – нет ставки, которую можно повысить")]
    NoBetToRaise,

    #[error("Сумма должна быть больше нуля")]
    InvalidAmount,

    #[error("Недостаточно фишек: нужно {needed}, в стеке {stack}")]
    InsufficientStack { needed: Chips, stack: Chips },

    #[error("Рейз до {amount} не превышает текущую ставку {current_bet}")]
    RaiseTooSmall { amount: Chips, current_bet: Chips },

    #[error(transparent)]
    DeckExhausted(#[from] DeckExhausted),

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Место {0} не существует за столом")]
    UnknownSeat(SeatIndex),

    #[error("Недостаточно игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Слишком много игроков: {count}, максимум {max}")]
    TooManyPlayers { count: usize, max: u8 },

    #[error("У игрока на месте {0} пустой стек")]
    ZeroStack(SeatIndex),

    #[error("Имя игрока повторяется: {0}")]
    DuplicatePlayerName(String),

    #[error("Сумма стеков за столом слишком велика для учёта")]
    StacksTooLarge,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    /// Ошибка в действии игрока: состояние не тронуто, можно переспросить.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            EngineError::OutOfTurn { .. }
                | EngineError::InactivePlayer(_)
                | EngineError::IllegalCheck
                | EngineError::IllegalCall
                | EngineError::BetNotAllowed
                | EngineError::NoBetToRaise
                | EngineError::InvalidAmount
                | EngineError::InsufficientStack { .. }
                | EngineError::RaiseTooSmall { .. }
                | EngineError::UnknownSeat(_)
        )
    }

    /// Нарушение инварианта: раздачу надо прервать.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EngineError::DeckExhausted(_) | EngineError::Internal(_))
    }
}
