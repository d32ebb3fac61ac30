//! Учёт фишек игроков внутри раздачи.
//!
//! Все движения фишек идут через `apply_contribution`, поэтому
//! `pot == Σ bet_total` держится на каждом шаге до выплаты.

use crate::domain::chips::Chips;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::SeatIndex;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Hand;

impl Hand {
    pub fn player(&self, seat: SeatIndex) -> Result<&Player, EngineError> {
        self.players
            .get(seat as usize)
            .ok_or(EngineError::UnknownSeat(seat))
    }

    fn player_mut(&mut self, seat: SeatIndex) -> Result<&mut Player, EngineError> {
        self.players
            .get_mut(seat as usize)
            .ok_or(EngineError::UnknownSeat(seat))
    }

    /// Поставить блайнд. Если стека не хватает – ставится весь стек (all-in).
    /// Возвращает, сколько реально поставлено.
    pub fn post_blind(&mut self, seat: SeatIndex, amount: Chips) -> Result<Chips, EngineError> {
        let paid = amount.min(self.player(seat)?.stack);
        self.apply_contribution(seat, paid)?;
        self.mark_all_in_if_broke(seat)?;
        Ok(paid)
    }

    /// Переложить `amount` из стека в ставку раунда, общий вклад и банк.
    ///
    /// Вызывающий сам обрезает сумму по стеку; больше стека – ошибка.
    pub fn apply_contribution(&mut self, seat: SeatIndex, amount: Chips) -> Result<(), EngineError> {
        let player = self.player_mut(seat)?;
        let rest = player
            .stack
            .checked_sub(amount)
            .ok_or(EngineError::InsufficientStack {
                needed: amount,
                stack: player.stack,
            })?;

        player.stack = rest;
        player.bet_this_round += amount;
        player.bet_total += amount;
        self.pot.add(amount);
        Ok(())
    }

    pub fn mark_folded(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        let player = self.player_mut(seat)?;
        if player.status == PlayerStatus::Active {
            player.status = PlayerStatus::Folded;
        }
        Ok(())
    }

    pub fn mark_all_in(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        let player = self.player_mut(seat)?;
        if player.status == PlayerStatus::Active {
            player.status = PlayerStatus::AllIn;
        }
        Ok(())
    }

    /// Стек кончился – игрок в оллыне.
    pub fn mark_all_in_if_broke(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        if self.player(seat)?.stack.is_zero() {
            self.mark_all_in(seat)?;
        }
        Ok(())
    }

    /// Сколько игроков ещё не сфолдили.
    pub fn live_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Сколько игроков ещё могут ходить.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Σ bet_total по всем игрокам.
    pub fn total_committed(&self) -> Chips {
        self.players.iter().map(|p| p.bet_total).sum()
    }

    /// Фишки в игре: стеки + то, что лежит в банке.
    pub fn chips_in_play(&self) -> Chips {
        self.players.iter().map(|p| p.stack).sum::<Chips>() + self.pot.total
    }

    /// Проверить инварианты банка и сохранения фишек.
    pub fn check_invariants(&self) -> Result<(), EngineError> {
        let committed = self.total_committed();

        if self.ended {
            if !self.pot.total.is_zero() {
                return Err(EngineError::Internal("банк не выплачен после конца раздачи"));
            }
            if self.awarded_pot != committed {
                return Err(EngineError::Internal("выплата не равна сумме вкладов"));
            }
        } else if self.pot.total != committed {
            return Err(EngineError::Internal("банк не равен сумме вкладов"));
        }

        let starting: Chips = self.starting_stacks.iter().sum();
        if self.chips_in_play() != starting {
            return Err(EngineError::Internal("фишки не сохраняются"));
        }

        Ok(())
    }
}
