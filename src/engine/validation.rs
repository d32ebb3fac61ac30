use crate::domain::chips::Chips;
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::Hand;

/// Проверка, может ли игрок выполнить это действие при текущем состоянии раздачи.
///
/// Ничего не меняет: если тут Ok, то `apply_betting_action` пройдёт.
pub fn validate_action(
    hand: &Hand,
    seat: SeatIndex,
    action: &PlayerActionKind,
) -> Result<(), EngineError> {
    if !hand.is_in_progress() {
        return Err(EngineError::NoActiveHand);
    }

    let player = hand.player(seat)?;

    if !player.is_active() {
        return Err(EngineError::InactivePlayer(seat));
    }

    if hand.current_player != Some(seat) {
        return Err(EngineError::OutOfTurn {
            seat,
            expected: hand.current_player,
        });
    }

    let stack = player.stack;
    let current_bet = hand.betting.current_bet;
    let has_bet_to_match = current_bet > player.bet_this_round;

    match action {
        PlayerActionKind::Fold => Ok(()),

        PlayerActionKind::Check => {
            if has_bet_to_match {
                Err(EngineError::IllegalCheck)
            } else {
                Ok(())
            }
        }

        PlayerActionKind::Call => {
            // Call на весь стек, если не хватает – это all-in call, разрешаем.
            if has_bet_to_match {
                Ok(())
            } else {
                Err(EngineError::IllegalCall)
            }
        }

        PlayerActionKind::Bet(amount) => {
            if has_bet_to_match {
                return Err(EngineError::BetNotAllowed);
            }
            if amount.is_zero() {
                return Err(EngineError::InvalidAmount);
            }
            if *amount > stack {
                return Err(EngineError::InsufficientStack {
                    needed: *amount,
                    stack,
                });
            }
            Ok(())
        }

        PlayerActionKind::Raise(total) => {
            if !has_bet_to_match {
                // Когда нечего повышать – это bet, а не raise.
                return Err(EngineError::NoBetToRaise);
            }
            if *total <= current_bet {
                return Err(EngineError::RaiseTooSmall {
                    amount: *total,
                    current_bet,
                });
            }
            let needed = *total - player.bet_this_round;
            if needed > stack {
                return Err(EngineError::InsufficientStack { needed, stack });
            }
            Ok(())
        }

        PlayerActionKind::AllIn => {
            if stack.is_zero() {
                return Err(EngineError::InvalidAmount);
            }
            Ok(())
        }
    }
}

/// Список действий, доступных игроку прямо сейчас.
///
/// Для bet/raise подставляется минимальная разумная сумма: bet на BB
/// (или весь стек), raise на current_bet + BB (или весь стек).
/// Пустой список – если сейчас не его ход.
pub fn legal_actions(hand: &Hand, seat: SeatIndex) -> Vec<PlayerActionKind> {
    if validate_action(hand, seat, &PlayerActionKind::Fold).is_err() {
        return Vec::new();
    }
    let Ok(player) = hand.player(seat) else {
        return Vec::new();
    };

    let big_blind = hand.stakes.big_blind;
    let current_bet = hand.betting.current_bet;
    let max_total = player.bet_this_round + player.stack;

    let mut res = vec![PlayerActionKind::Fold];

    if current_bet > player.bet_this_round {
        res.push(PlayerActionKind::Call);
        if max_total > current_bet {
            let min_total = (current_bet + big_blind).min(max_total);
            res.push(PlayerActionKind::Raise(min_total));
        }
    } else {
        res.push(PlayerActionKind::Check);
        let min_bet: Chips = big_blind.min(player.stack);
        if !min_bet.is_zero() {
            res.push(PlayerActionKind::Bet(min_bet));
        }
    }

    res.push(PlayerActionKind::AllIn);
    res
}
