//! Кому отдать банк на шоудауне.
//!
//! Оценки рук здесь нет: это точка расширения под модуль ранжирования.
//! По умолчанию банк получает первый не сфолдивший игрок слева от дилера.

use crate::domain::SeatIndex;
use crate::engine::game_loop::Hand;
use crate::engine::positions::next_seat_where;

pub trait ShowdownResolver {
    /// Место победителя. None или сфолдивший игрок – движок возьмёт
    /// `FirstLiveAfterDealer`.
    fn award_to(&self, hand: &Hand) -> Option<SeatIndex>;
}

/// Первый живой игрок по кругу после кнопки.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLiveAfterDealer;

impl ShowdownResolver for FirstLiveAfterDealer {
    fn award_to(&self, hand: &Hand) -> Option<SeatIndex> {
        next_seat_where(&hand.players, hand.dealer, |p| p.is_in_hand())
    }
}

/// Банк всегда уходит заранее назначенному месту (если оно дошло до конца).
#[derive(Clone, Copy, Debug)]
pub struct DesignatedSeat(pub SeatIndex);

impl ShowdownResolver for DesignatedSeat {
    fn award_to(&self, hand: &Hand) -> Option<SeatIndex> {
        hand.players
            .get(self.0 as usize)
            .filter(|p| p.is_in_hand())
            .map(|p| p.seat)
    }
}

impl<F> ShowdownResolver for F
where
    F: Fn(&Hand) -> Option<SeatIndex>,
{
    fn award_to(&self, hand: &Hand) -> Option<SeatIndex> {
        self(hand)
    }
}
