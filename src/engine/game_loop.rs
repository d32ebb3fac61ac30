use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::Street;
use crate::domain::player::Player;
use crate::domain::table::{SeatedPlayer, TableConfig, TableStakes, MIN_PLAYERS};
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::{advance_to_next_active_seat, apply_betting_action, BettingState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{next_active_seat, next_seat, seats_from};
use crate::engine::pot::Pot;
use crate::engine::showdown::{FirstLiveAfterDealer, ShowdownResolver};
use crate::engine::validation::validate_action;
use crate::engine::RandomSource;

/// Одна раздача целиком: игроки, колода, борд, банк, торговля, журнал.
///
/// Меняется только через функции этого модуля; `apply_action` не трогает
/// исходное значение и возвращает новое.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Hand {
    pub id: HandId,
    pub stakes: TableStakes,
    pub players: Vec<Player>,
    pub deck: Deck,
    /// Общие карты борда (0/3/4/5), только добавляются.
    pub community_cards: Vec<Card>,
    pub pot: Pot,
    pub betting: BettingState,
    /// Чей сейчас ход (None – раздача закончена).
    pub current_player: Option<SeatIndex>,
    pub dealer: SeatIndex,
    pub small_blind: SeatIndex,
    pub big_blind: SeatIndex,
    pub street: Street,
    /// Коды действий по порядку: `f`, `x`, `c`, `b<amt>`, `r<amt>`.
    pub action_sequence: Vec<String>,
    pub history: HandHistory,
    pub started: bool,
    pub ended: bool,
    /// Стеки до блайндов, по местам.
    pub starting_stacks: Vec<Chips>,
    /// Сколько выплачено победителю (заполняется в `end_hand`).
    pub awarded_pot: Chips,
    pub winner: Option<SeatIndex>,
}

impl Hand {
    pub fn is_in_progress(&self) -> bool {
        self.started && !self.ended
    }

    pub fn current_bet(&self) -> Chips {
        self.betting.current_bet
    }

    /// Чистый результат каждого места (стек сейчас минус стартовый).
    pub fn payoffs(&self) -> Vec<i64> {
        self.players
            .iter()
            .zip(&self.starting_stacks)
            .map(|(p, start)| p.stack.signed_diff(*start))
            .collect()
    }
}

/// Старт новой раздачи со свежей перемешанной колодой.
pub fn start_hand<R: RandomSource>(
    config: &TableConfig,
    players: &[SeatedPlayer],
    dealer: SeatIndex,
    rng: &mut R,
    hand_id: HandId,
) -> Result<Hand, EngineError> {
    let deck = Deck::shuffled(rng);
    start_hand_with_deck(config, players, dealer, deck, hand_id, &FirstLiveAfterDealer)
}

/// Старт новой раздачи с заданной колодой:
/// - постит блайнды (SB = дилер+1, BB = дилер+2 по кругу);
/// - раздаёт карманные карты (по 2, двумя кругами, начиная слева от дилера);
/// - настраивает торговлю префлопа: первым ходит игрок после BB.
pub fn start_hand_with_deck(
    config: &TableConfig,
    players: &[SeatedPlayer],
    dealer: SeatIndex,
    deck: Deck,
    hand_id: HandId,
    resolver: &dyn ShowdownResolver,
) -> Result<Hand, EngineError> {
    validate_seating(config, players, dealer)?;

    let seated: Vec<Player> = players
        .iter()
        .enumerate()
        .map(|(idx, p)| Player::new(idx as SeatIndex, p.name.clone(), p.stack))
        .collect();

    let small_blind = next_seat(&seated, dealer);
    let big_blind = next_seat(&seated, small_blind);

    let mut hand = Hand {
        id: hand_id,
        stakes: config.stakes.clone(),
        starting_stacks: seated.iter().map(|p| p.stack).collect(),
        players: seated,
        deck,
        community_cards: Vec::new(),
        pot: Pot::new(),
        betting: BettingState::default(),
        current_player: None,
        dealer,
        small_blind,
        big_blind,
        street: Street::Preflop,
        action_sequence: Vec::new(),
        history: HandHistory::new(),
        started: true,
        ended: false,
        awarded_pot: Chips::ZERO,
        winner: None,
    };

    hand.history.push(HandEventKind::HandStarted {
        hand_id,
        players: hand.players.len(),
    });

    post_blinds(&mut hand)?;
    deal_hole_cards(&mut hand)?;

    let current_bet = hand
        .players
        .iter()
        .map(|p| p.bet_this_round)
        .max()
        .unwrap_or(Chips::ZERO);
    let start = next_seat(&hand.players, big_blind);
    hand.betting = BettingState::opening(&hand.players, Some(start), current_bet);

    info!(
        hand_id,
        players = hand.players.len(),
        dealer,
        small_blind,
        big_blind,
        "раздача началась"
    );

    // Если все уже в оллыне на блайндах, борд докатывается сразу.
    settle(&mut hand, resolver)?;
    Ok(hand)
}

fn validate_seating(
    config: &TableConfig,
    players: &[SeatedPlayer],
    dealer: SeatIndex,
) -> Result<(), EngineError> {
    if players.len() < MIN_PLAYERS {
        return Err(EngineError::NotEnoughPlayers);
    }
    if players.len() > config.max_seats as usize {
        return Err(EngineError::TooManyPlayers {
            count: players.len(),
            max: config.max_seats,
        });
    }
    if dealer as usize >= players.len() {
        return Err(EngineError::UnknownSeat(dealer));
    }

    // Payoffs считаются в i64: вся сумма на столе должна туда влезать.
    let total = players
        .iter()
        .try_fold(0u64, |acc, p| acc.checked_add(p.stack.0))
        .filter(|&t| t <= i64::MAX as u64);
    if total.is_none() {
        return Err(EngineError::StacksTooLarge);
    }

    let mut names = HashSet::new();
    for (idx, p) in players.iter().enumerate() {
        if p.stack.is_zero() {
            return Err(EngineError::ZeroStack(idx as SeatIndex));
        }
        if !names.insert(p.name.as_str()) {
            return Err(EngineError::DuplicatePlayerName(p.name.clone()));
        }
    }
    Ok(())
}

/// Постинг блайндов.
fn post_blinds(hand: &mut Hand) -> Result<(), EngineError> {
    let sb_seat = hand.small_blind;
    let bb_seat = hand.big_blind;

    let sb_paid = hand.post_blind(sb_seat, hand.stakes.small_blind)?;
    let bb_paid = hand.post_blind(bb_seat, hand.stakes.big_blind)?;

    hand.history.push(HandEventKind::BlindsPosted {
        dealer: hand.dealer,
        small_blind: (sb_seat, sb_paid),
        big_blind: (bb_seat, bb_paid),
    });
    Ok(())
}

/// Раздача карманных карт – по 2 карты, по кругу, без сжигания.
fn deal_hole_cards(hand: &mut Hand) -> Result<(), EngineError> {
    let order = seats_from(&hand.players, hand.small_blind);

    for _round in 0..2 {
        for &seat in &order {
            let card = hand.deck.draw()?;
            hand.players[seat as usize].hole_cards.push(card);
        }
    }

    for &seat in &order {
        let cards = hand.players[seat as usize].hole_cards.clone();
        hand.history.push(HandEventKind::HoleCardsDealt { seat, cards });
    }
    Ok(())
}

/// Применить действие игрока с выбором победителя по умолчанию.
pub fn apply_action(
    hand: &Hand,
    seat: SeatIndex,
    action: PlayerActionKind,
) -> Result<Hand, EngineError> {
    apply_action_with(hand, seat, action, &FirstLiveAfterDealer)
}

/// Применить действие игрока. Всё или ничего: при ошибке исходная раздача
/// не меняется, при успехе возвращается новое состояние.
pub fn apply_action_with(
    hand: &Hand,
    seat: SeatIndex,
    action: PlayerActionKind,
    resolver: &dyn ShowdownResolver,
) -> Result<Hand, EngineError> {
    validate_action(hand, seat, &action)?;

    let mut next = hand.clone();
    apply_betting_action(&mut next, seat, action)?;
    settle(&mut next, resolver)?;

    debug_assert!(next.check_invariants().is_ok());
    Ok(next)
}

/// После каждого действия: фолд до одного, закрытие раунда, передача хода.
fn settle(hand: &mut Hand, resolver: &dyn ShowdownResolver) -> Result<(), EngineError> {
    loop {
        if hand.ended {
            return Ok(());
        }

        if hand.live_count() < 2 {
            end_hand(hand, resolver)?;
            return Ok(());
        }

        if hand.betting.is_round_complete() {
            on_round_complete(hand, resolver)?;
            continue;
        }

        advance_to_next_active_seat(hand);
        return Ok(());
    }
}

/// Раунд ставок закрыт: сбросить ставки раунда и перейти на следующую улицу.
///
/// Preflop -> Flop (burn + 3), Flop -> Turn (burn + 1), Turn -> River (burn + 1),
/// River -> Showdown (конец раздачи).
pub fn on_round_complete(
    hand: &mut Hand,
    resolver: &dyn ShowdownResolver,
) -> Result<(), EngineError> {
    if !hand.is_in_progress() {
        return Err(EngineError::NoActiveHand);
    }

    for p in hand.players.iter_mut() {
        p.bet_this_round = Chips::ZERO;
    }
    hand.betting = BettingState::default();
    hand.current_player = None;

    let next = hand
        .street
        .next()
        .ok_or(EngineError::Internal("переход улицы после шоудауна"))?;

    if next == Street::Showdown {
        hand.street = Street::Showdown;
        hand.history.push(HandEventKind::StreetChanged { street: next });
        return end_hand(hand, resolver);
    }

    hand.deck.burn()?;
    let cards = hand.deck.draw_n(next.board_cards_dealt())?;
    hand.community_cards.extend_from_slice(&cards);
    hand.street = next;

    hand.history.push(HandEventKind::BoardDealt {
        street: next,
        cards,
    });
    hand.history.push(HandEventKind::StreetChanged { street: next });

    // На постфлопе первым ходит первый активный игрок слева от дилера.
    let first = next_active_seat(&hand.players, hand.dealer);
    hand.betting = BettingState::opening(&hand.players, first, Chips::ZERO);
    hand.current_player = hand.betting.next_to_act();

    debug!(
        hand_id = hand.id,
        street = ?next,
        board = ?hand.community_cards,
        to_act = ?hand.betting.to_act,
        "новая улица"
    );
    Ok(())
}

/// Завершить раздачу и выплатить банк.
///
/// Остался один не сфолдивший – банк его. Иначе решает `resolver`.
/// Банк обнуляется только после того, как выплата записана.
pub fn end_hand(hand: &mut Hand, resolver: &dyn ShowdownResolver) -> Result<(), EngineError> {
    if hand.ended {
        return Err(EngineError::NoActiveHand);
    }

    let live: Vec<SeatIndex> = hand
        .players
        .iter()
        .filter(|p| p.is_in_hand())
        .map(|p| p.seat)
        .collect();

    let winner = match live.as_slice() {
        [] => return Err(EngineError::Internal("в раздаче не осталось игроков")),
        [single] => *single,
        _ => match resolver.award_to(hand).filter(|s| live.contains(s)) {
            Some(seat) => seat,
            None => {
                warn!(hand_id = hand.id, "resolver не выбрал живого игрока, берём первого после кнопки");
                FirstLiveAfterDealer
                    .award_to(hand)
                    .ok_or(EngineError::Internal("нет живого игрока для выплаты"))?
            }
        },
    };

    hand.ended = true;
    hand.current_player = None;
    hand.betting.to_act.clear();

    let amount = hand.pot.total;
    hand.players[winner as usize].stack += amount;
    hand.awarded_pot = amount;
    hand.winner = Some(winner);
    hand.pot.take();

    hand.history.push(HandEventKind::PotAwarded {
        seat: winner,
        amount,
    });
    hand.history.push(HandEventKind::HandFinished { hand_id: hand.id });

    info!(
        hand_id = hand.id,
        winner,
        pot = amount.0,
        street = ?hand.street,
        "раздача завершена"
    );
    Ok(())
}
