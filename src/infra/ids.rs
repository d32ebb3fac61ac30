use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::HandId;

/// Монотонный счётчик ID раздач.
///
/// Первая раздача получает 1; после восстановления сессии можно
/// продолжить с нужного места через `starting_at`.
#[derive(Debug)]
pub struct IdGenerator {
    hand_counter: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: HandId) -> Self {
        Self {
            hand_counter: AtomicU64::new(first),
        }
    }

    #[inline]
    pub fn next_hand_id(&self) -> HandId {
        self.hand_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
