//! Автоматические игроки: кто и как ходит за место без человека.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::engine::game_loop::Hand;
use crate::engine::validation::legal_actions;

pub trait SeatPolicy {
    /// Выбрать действие за место `seat`. Вызывается только когда его ход.
    fn decide(&mut self, hand: &Hand, seat: SeatIndex) -> PlayerActionKind;
}

impl<F> SeatPolicy for F
where
    F: FnMut(&Hand, SeatIndex) -> PlayerActionKind,
{
    fn decide(&mut self, hand: &Hand, seat: SeatIndex) -> PlayerActionKind {
        self(hand, seat)
    }
}

/// Колл, если есть ставка; иначе чек. Никогда не ставит сам.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassivePolicy;

impl SeatPolicy for PassivePolicy {
    fn decide(&mut self, hand: &Hand, seat: SeatIndex) -> PlayerActionKind {
        let legal = legal_actions(hand, seat);
        [PlayerActionKind::Call, PlayerActionKind::Check]
            .into_iter()
            .find(|a| legal.contains(a))
            .unwrap_or(PlayerActionKind::Fold)
    }
}

/// Случайное легальное действие. С одинаковым seed – одинаковые решения.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl SeatPolicy for RandomPolicy {
    fn decide(&mut self, hand: &Hand, seat: SeatIndex) -> PlayerActionKind {
        legal_actions(hand, seat)
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(PlayerActionKind::Fold)
    }
}
