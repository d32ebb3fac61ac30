use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::RandomSource;

/// Колода закончилась. Для ≤9 игроков до ривера такого быть не может,
/// так что это всегда ошибка в размерах/подсчёте, а не пользователя.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Колода пуста")]
pub struct DeckExhausted;

/// Колода карт на одну раздачу.
///
/// Верх колоды — конец вектора `cards`. Всё, что снято сверху (раздано или
/// сожжено), лежит в `taken`, поэтому `taken ∪ cards` всегда = 52 карты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
    taken: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck {
            cards,
            taken: Vec::new(),
        }
    }

    /// Новая перемешанная колода.
    pub fn shuffled<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        deck.shuffle(rng);
        deck
    }

    /// Перемешать оставшиеся карты (Fisher–Yates внутри RNG).
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    /// Колода, из которой карты `order` выйдут ровно в этом порядке,
    /// а остальные карты стандартной колоды — после них.
    ///
    /// Дубликаты в `order` игнорируются.
    pub fn stacked(order: &[Card]) -> Self {
        let mut front: Vec<Card> = Vec::with_capacity(order.len());
        for card in order {
            if !front.contains(card) {
                front.push(*card);
            }
        }

        let mut cards: Vec<Card> = Self::standard_52()
            .cards
            .into_iter()
            .filter(|c| !front.contains(c))
            .collect();
        cards.extend(front.into_iter().rev());

        Deck {
            cards,
            taken: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Карты, уже снятые с колоды в этой раздаче (включая сожжённые).
    pub fn taken(&self) -> &[Card] {
        &self.taken
    }

    /// Взять одну карту сверху колоды.
    pub fn draw(&mut self) -> Result<Card, DeckExhausted> {
        let card = self.cards.pop().ok_or(DeckExhausted)?;
        self.taken.push(card);
        Ok(card)
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckExhausted> {
        if self.cards.len() < n {
            return Err(DeckExhausted);
        }
        (0..n).map(|_| self.draw()).collect()
    }

    /// Сжечь верхнюю карту перед новой улицей.
    pub fn burn(&mut self) -> Result<(), DeckExhausted> {
        self.draw().map(|_| ())
    }
}
