//! Движок одной раздачи: торговля, переход улиц, выплата банка, запись.
//!
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу (блайнды + карманные карты)
//!   - `apply_action` – применить действие игрока (всё или ничего)
//!   - `record` – снять запись завершённой раздачи
//!   - `replay` – проиграть раздачу заново по записи

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod ledger;
pub mod policy;
pub mod positions;
pub mod pot;
pub mod recorder;
pub mod replay;
pub mod session;
pub mod showdown;
pub mod validation;

pub use actions::{ActionCodeError, PlayerActionKind};
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_loop::{apply_action, apply_action_with, start_hand, start_hand_with_deck, Hand};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use policy::{PassivePolicy, RandomPolicy, SeatPolicy};
pub use pot::Pot;
pub use recorder::record;
pub use replay::{replay, ReplayError};
pub use session::{GameSession, HandStatus};
pub use showdown::{DesignatedSeat, FirstLiveAfterDealer, ShowdownResolver};
pub use validation::{legal_actions, validate_action};

/// RNG интерфейс для engine.
/// Реализации – в `infra::rng` (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
