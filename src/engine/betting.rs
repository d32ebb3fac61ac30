use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::chips::Chips;
use crate::domain::{Player, PlayerStatus, SeatIndex};
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Hand;
use crate::engine::hand_history::HandEventKind;
use crate::engine::positions::{active_seats_after, seats_from};

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки.
    pub current_bet: Chips,
    /// Seat последнего агрессора (bet/raise) на этой улице.
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<SeatIndex>,
}

impl BettingState {
    /// Новый раунд: очередь — все активные игроки по кругу, начиная с `start`.
    ///
    /// Если ходить может максимум один игрок и он уже уравнял ставку,
    /// торговли нет вообще (остальные в оллыне) — очередь пустая.
    pub fn opening(players: &[Player], start: Option<SeatIndex>, current_bet: Chips) -> Self {
        let to_act: Vec<SeatIndex> = match start {
            Some(start) => seats_from(players, start)
                .into_iter()
                .filter(|&s| players[s as usize].is_active())
                .collect(),
            None => Vec::new(),
        };

        let mut state = Self {
            current_bet,
            last_aggressor: None,
            to_act,
        };
        state.drop_settled(players);
        state
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// После bet/raise: новый уровень, новый агрессор, и ответить должны
    /// все остальные активные игроки по кругу после него.
    pub fn on_raise(&mut self, players: &[Player], seat: SeatIndex, new_bet: Chips) {
        self.current_bet = new_bet;
        self.last_aggressor = Some(seat);
        self.to_act = active_seats_after(players, seat)
            .into_iter()
            .filter(|&s| s != seat)
            .collect();
    }

    /// Когда действовать может не больше одного игрока, ему незачем ходить,
    /// если он уже уравнял ставку.
    pub fn drop_settled(&mut self, players: &[Player]) {
        let active = players.iter().filter(|p| p.is_active()).count();
        if active <= 1 {
            let current_bet = self.current_bet;
            self.to_act
                .retain(|&s| players[s as usize].bet_this_round < current_bet);
        }
    }

    /// Раунд ставок завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }

    /// Кто должен ходить следующим.
    pub fn next_to_act(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }
}

/// Во что превращается all-in при текущем состоянии ставок.
pub fn resolve_all_in(player: &Player, current_bet: Chips) -> PlayerActionKind {
    let total = player.bet_this_round + player.stack;
    if current_bet == player.bet_this_round {
        PlayerActionKind::Bet(player.stack)
    } else if total > current_bet {
        PlayerActionKind::Raise(total)
    } else {
        PlayerActionKind::Call
    }
}

/// Применить уже провалидированное действие к раздаче.
///
/// Двигает фишки, статусы, очередь ходящих и пишет код в action_sequence.
/// Возвращает фактическое действие (all-in раскрыт в bet/call/raise).
pub fn apply_betting_action(
    hand: &mut Hand,
    seat: SeatIndex,
    kind: PlayerActionKind,
) -> Result<PlayerActionKind, EngineError> {
    let current_bet = hand.betting.current_bet;
    let (bet_before, stack, effective) = {
        let player = hand.player(seat)?;
        let effective = match kind {
            PlayerActionKind::AllIn => resolve_all_in(player, current_bet),
            other => other,
        };
        (player.bet_this_round, player.stack, effective)
    };

    match effective {
        PlayerActionKind::Fold => {
            hand.mark_folded(seat)?;
            hand.betting.mark_acted(seat);
        }

        PlayerActionKind::Check => {
            hand.betting.mark_acted(seat);
        }

        PlayerActionKind::Call => {
            // Короткий стек уравнивает сколько может.
            let pay = current_bet.saturating_sub(bet_before).min(stack);
            hand.apply_contribution(seat, pay)?;
            hand.betting.mark_acted(seat);
        }

        PlayerActionKind::Bet(amount) => {
            hand.apply_contribution(seat, amount)?;
            let new_bet = bet_before + amount;
            hand.betting.on_raise(&hand.players, seat, new_bet);
        }

        PlayerActionKind::Raise(total) => {
            hand.apply_contribution(seat, total - bet_before)?;
            hand.betting.on_raise(&hand.players, seat, total);
        }

        PlayerActionKind::AllIn => {
            return Err(EngineError::Internal("all-in не раскрыт в действие"));
        }
    }

    hand.mark_all_in_if_broke(seat)?;
    hand.betting.drop_settled(&hand.players);

    let player = hand.player(seat)?;
    let new_stack = player.stack;
    let all_in = player.status == PlayerStatus::AllIn;

    hand.action_sequence.push(effective.code());
    hand.history.push(HandEventKind::PlayerActed {
        seat,
        action: effective,
        all_in,
        new_stack,
        pot_after: hand.pot.total,
    });

    debug!(
        hand_id = hand.id,
        seat,
        action = %effective,
        all_in,
        pot = hand.pot.total.0,
        "действие применено"
    );

    Ok(effective)
}

/// Передать ход следующему активному игроку.
///
/// Очередь всегда начинается со следующего по кругу активного места
/// (после агрессора или после того, кто только что сходил), так что это
/// тот же обход стола, что и `next_active_seat`, но с учётом тех, кому
/// ходить уже не нужно.
pub fn advance_to_next_active_seat(hand: &mut Hand) {
    hand.current_player = hand.betting.next_to_act();
}
