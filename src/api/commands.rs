use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::SeatedPlayer;
use crate::domain::SeatIndex;
use crate::engine::{GameSession, HandStatus, PlayerActionKind, RandomSource};
use crate::infra::persistence::HandHistorySink;

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::build_hand_view;

/// Команда верхнего уровня.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Запустить новую раздачу (незаконченная отбрасывается).
    StartHand(StartHandCommand),

    /// Действие игрока в раздаче.
    PlayerAction(PlayerActionCommand),

    /// Бросить текущую раздачу без записи.
    AbandonHand,
}

/// Запуск новой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StartHandCommand {
    /// Имена игроков по местам (0, 1, 2, ...).
    pub players: Vec<String>,
    /// Стеки по местам. Нет – у всех стек по умолчанию из конфига.
    #[serde(default)]
    pub stacks: Option<Vec<u64>>,
    /// Место дилера. Нет – кнопка сдвигается от прошлой раздачи.
    #[serde(default)]
    pub dealer: Option<SeatIndex>,
}

/// Действие игрока в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerActionCommand {
    pub seat: SeatIndex,
    pub intent: ActionIntent,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum IntentAction {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

/// То, что приходит от клиента: `{"action": "raise", "amount": 200}`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionIntent {
    pub action: IntentAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

impl TryFrom<ActionIntent> for PlayerActionKind {
    type Error = ApiError;

    fn try_from(intent: ActionIntent) -> Result<Self, Self::Error> {
        let amount = || {
            intent
                .amount
                .map(Chips)
                .ok_or_else(|| ApiError::BadRequest(format!("{:?} без суммы", intent.action)))
        };

        Ok(match intent.action {
            IntentAction::Fold => PlayerActionKind::Fold,
            IntentAction::Check => PlayerActionKind::Check,
            IntentAction::Call => PlayerActionKind::Call,
            IntentAction::Bet => PlayerActionKind::Bet(amount()?),
            IntentAction::Raise => PlayerActionKind::Raise(amount()?),
            IntentAction::AllIn => PlayerActionKind::AllIn,
        })
    }
}

impl From<PlayerActionKind> for ActionIntent {
    fn from(kind: PlayerActionKind) -> Self {
        let (action, amount) = match kind {
            PlayerActionKind::Fold => (IntentAction::Fold, None),
            PlayerActionKind::Check => (IntentAction::Check, None),
            PlayerActionKind::Call => (IntentAction::Call, None),
            PlayerActionKind::Bet(a) => (IntentAction::Bet, Some(a.0)),
            PlayerActionKind::Raise(a) => (IntentAction::Raise, Some(a.0)),
            PlayerActionKind::AllIn => (IntentAction::AllIn, None),
        };
        Self { action, amount }
    }
}

impl StartHandCommand {
    /// Собрать игроков для движка; стеки по умолчанию берутся из конфига.
    pub fn seated_players(&self, default_stack: Chips) -> Result<Vec<SeatedPlayer>, ApiError> {
        match &self.stacks {
            None => Ok(self
                .players
                .iter()
                .map(|name| SeatedPlayer::new(name.clone(), default_stack))
                .collect()),
            Some(stacks) if stacks.len() == self.players.len() => Ok(self
                .players
                .iter()
                .zip(stacks)
                .map(|(name, &stack)| SeatedPlayer::new(name.clone(), Chips(stack)))
                .collect()),
            Some(stacks) => Err(ApiError::BadRequest(format!(
                "игроков {}, стеков {}",
                self.players.len(),
                stacks.len()
            ))),
        }
    }
}

/// Выполнить команду над сессией и вернуть состояние глазами `viewer`.
pub fn handle_command<R: RandomSource, S: HandHistorySink>(
    session: &mut GameSession<R, S>,
    command: Command,
    viewer: Option<SeatIndex>,
) -> Result<CommandResponse, ApiError> {
    let status = match command {
        Command::StartHand(cmd) => {
            let players = cmd.seated_players(session.config().default_stack)?;
            session.start_hand(&players, cmd.dealer)?
        }
        Command::PlayerAction(cmd) => {
            let kind = PlayerActionKind::try_from(cmd.intent)?;
            session.apply_action(cmd.seat, kind)?
        }
        Command::AbandonHand => {
            session.abandon_hand()?;
            return Ok(CommandResponse::Ok);
        }
    };

    let hand = session
        .hand()
        .map(|h| build_hand_view(h, viewer))
        .ok_or(ApiError::NoActiveHand)?;

    Ok(match status {
        HandStatus::Ongoing => CommandResponse::HandState(hand),
        HandStatus::Finished(record) => CommandResponse::HandFinished { hand, record },
    })
}
