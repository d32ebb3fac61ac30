use crate::domain::{Player, SeatIndex};

/// Следующее место по кругу после `from` (не включая его).
pub fn next_seat(players: &[Player], from: SeatIndex) -> SeatIndex {
    if players.is_empty() {
        return from;
    }
    ((from as usize + 1) % players.len()) as SeatIndex
}

/// Найти следующее место по кругу после `from`, для которого выполняется `pred`.
/// Сам `from` проверяется последним (полный круг).
pub fn next_seat_where(
    players: &[Player],
    from: SeatIndex,
    pred: impl Fn(&Player) -> bool,
) -> Option<SeatIndex> {
    let n = players.len();
    if n == 0 {
        return None;
    }

    let mut idx = from as usize;
    for _ in 0..n {
        idx = (idx + 1) % n;
        if pred(&players[idx]) {
            return Some(idx as SeatIndex);
        }
    }

    None
}

/// Следующий игрок после `from`, который ещё может действовать.
pub fn next_active_seat(players: &[Player], from: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(players, from, Player::is_active)
}

/// Все места по кругу, начиная с `start` (включительно).
pub fn seats_from(players: &[Player], start: SeatIndex) -> Vec<SeatIndex> {
    let n = players.len();
    (0..n)
        .map(|i| ((start as usize + i) % n) as SeatIndex)
        .collect()
}

/// Активные места по кругу после `after` (сам `after` идёт последним, если активен).
pub fn active_seats_after(players: &[Player], after: SeatIndex) -> Vec<SeatIndex> {
    if players.is_empty() {
        return Vec::new();
    }
    seats_from(players, next_seat(players, after))
        .into_iter()
        .filter(|&s| players[s as usize].is_active())
        .collect()
}
