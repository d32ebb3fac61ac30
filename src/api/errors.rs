use serde::{Deserialize, Serialize};

use crate::domain::HandId;
use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (нет суммы у bet, длины не совпадают и т.п.).
    BadRequest(String),

    /// Действие не принято: ход не того игрока, нелегальный check и т.п.
    /// Раздача продолжается, тот же игрок ходит снова.
    IllegalAction(String),

    /// Сейчас нет раздачи.
    NoActiveHand,

    /// Запись раздачи не найдена в истории.
    HandNotFound(HandId),

    /// Внутренняя ошибка (раздача прервана или история недоступна).
    Internal(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::NoActiveHand => ApiError::NoActiveHand,
            EngineError::NotEnoughPlayers
            | EngineError::TooManyPlayers { .. }
            | EngineError::ZeroStack(_)
            | EngineError::DuplicatePlayerName(_)
            | EngineError::StacksTooLarge => ApiError::BadRequest(err.to_string()),
            e if e.is_user_error() => ApiError::IllegalAction(e.to_string()),
            e => ApiError::Internal(e.to_string()),
        }
    }
}
