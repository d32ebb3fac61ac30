//! Игровая сессия за одним столом.
//!
//! Владеет конфигом, RNG, счётчиком ID, единственной активной раздачей,
//! политиками ботов и хранилищем истории. Глобального состояния нет:
//! кто держит `GameSession`, тот и ведёт игру.
//!
//! Сбой хранилища не откатывает раздачу: запись откладывается в `unsaved`
//! и досылается через `flush_unsaved`.

use std::collections::HashMap;

use tracing::{error, info, warn};

use crate::domain::deck::Deck;
use crate::domain::hand::HandRecord;
use crate::domain::table::{ConfigError, SeatedPlayer, TableConfig};
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{apply_action_with, start_hand_with_deck, Hand};
use crate::engine::hand_history::HandHistory;
use crate::engine::policy::SeatPolicy;
use crate::engine::recorder::record;
use crate::engine::showdown::{FirstLiveAfterDealer, ShowdownResolver};
use crate::engine::validation::legal_actions;
use crate::engine::RandomSource;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::{HandHistorySink, SinkError};

/// Что стало с раздачей после команды.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Раздача идёт, ждём действия человека.
    Ongoing,
    /// Раздача завершена. Запись в хранилище или в `unsaved`.
    Finished(HandRecord),
}

pub struct GameSession<R: RandomSource, S: HandHistorySink> {
    config: TableConfig,
    rng: R,
    sink: S,
    ids: IdGenerator,
    hand: Option<Hand>,
    policies: HashMap<SeatIndex, Box<dyn SeatPolicy>>,
    resolver: Box<dyn ShowdownResolver>,
    last_dealer: Option<SeatIndex>,
    last_record: Option<HandRecord>,
    unsaved: Vec<HandRecord>,
}

impl<R: RandomSource, S: HandHistorySink> GameSession<R, S> {
    pub fn new(config: TableConfig, rng: R, sink: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            sink,
            ids: IdGenerator::new(),
            hand: None,
            policies: HashMap::new(),
            resolver: Box::new(FirstLiveAfterDealer),
            last_dealer: None,
            last_record: None,
            unsaved: Vec::new(),
        })
    }

    pub fn with_showdown_resolver(mut self, resolver: impl ShowdownResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Отдать место боту. За это место сессия будет ходить сама.
    pub fn set_policy(&mut self, seat: SeatIndex, policy: impl SeatPolicy + 'static) {
        self.policies.insert(seat, Box::new(policy));
    }

    /// Вернуть место человеку.
    pub fn clear_policy(&mut self, seat: SeatIndex) {
        self.policies.remove(&seat);
    }

    pub fn is_bot(&self, seat: SeatIndex) -> bool {
        self.policies.contains_key(&seat)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Текущая (или только что завершённая) раздача.
    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    pub fn history(&self) -> Option<&HandHistory> {
        self.hand.as_ref().map(|h| &h.history)
    }

    pub fn last_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Записи, которые хранилище не приняло.
    pub fn unsaved_records(&self) -> &[HandRecord] {
        &self.unsaved
    }

    /// Повторно отправить отложенные записи по порядку.
    ///
    /// На первой ошибке останавливается; что не ушло, остаётся в очереди.
    /// Возвращает, сколько записей сохранено.
    pub fn flush_unsaved(&mut self) -> Result<usize, SinkError> {
        let mut saved = 0;
        while let Some(rec) = self.unsaved.first() {
            match self.sink.save(rec) {
                // Уже лежит в хранилище – повторять нечего.
                Ok(_) | Err(SinkError::DuplicateId(_)) => {
                    self.unsaved.remove(0);
                    saved += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(saved)
    }

    pub fn legal_actions(&self, seat: SeatIndex) -> Vec<PlayerActionKind> {
        self.hand
            .as_ref()
            .map(|h| legal_actions(h, seat))
            .unwrap_or_default()
    }

    /// Начать новую раздачу.
    ///
    /// `dealer = None` – кнопка сдвигается на одно место от прошлой раздачи
    /// (первая раздача – место 0). Незаконченная раздача просто отбрасывается.
    /// После старта боты ходят, пока не дойдёт очередь до человека.
    pub fn start_hand(
        &mut self,
        players: &[SeatedPlayer],
        dealer: Option<SeatIndex>,
    ) -> Result<HandStatus, EngineError> {
        let dealer = match dealer {
            Some(seat) => seat,
            None => self
                .last_dealer
                .map(|d| ((d as usize + 1) % players.len().max(1)) as SeatIndex)
                .unwrap_or(0),
        };

        let deck = Deck::shuffled(&mut self.rng);
        let hand_id = self.ids.next_hand_id();
        let hand = start_hand_with_deck(
            &self.config,
            players,
            dealer,
            deck,
            hand_id,
            self.resolver.as_ref(),
        )?;

        if let Some(old) = self.hand.as_ref().filter(|h| h.is_in_progress()) {
            warn!(hand_id = old.id, "незаконченная раздача отброшена");
        }

        self.last_dealer = Some(dealer);
        self.hand = Some(hand);
        self.drive()
    }

    /// Действие человека (или внешнего клиента) за место `seat`.
    ///
    /// Ошибка пользователя состояние не меняет. Фатальная ошибка
    /// прерывает раздачу.
    pub fn apply_action(
        &mut self,
        seat: SeatIndex,
        kind: PlayerActionKind,
    ) -> Result<HandStatus, EngineError> {
        let hand = self.hand.as_ref().ok_or(EngineError::NoActiveHand)?;

        match apply_action_with(hand, seat, kind, self.resolver.as_ref()) {
            Ok(next) => {
                self.hand = Some(next);
                self.drive()
            }
            Err(e) => {
                if e.is_fatal() {
                    self.abort(&e);
                }
                Err(e)
            }
        }
    }

    /// Бросить текущую раздачу без записи в историю.
    pub fn abandon_hand(&mut self) -> Result<(), EngineError> {
        match self.hand.take() {
            Some(hand) if hand.is_in_progress() => {
                info!(hand_id = hand.id, "раздача брошена");
                Ok(())
            }
            other => {
                self.hand = other;
                Err(EngineError::NoActiveHand)
            }
        }
    }

    /// Ходить за ботов, пока очередь не дойдёт до человека или раздача не закончится.
    fn drive(&mut self) -> Result<HandStatus, EngineError> {
        loop {
            let hand = self.hand.as_ref().ok_or(EngineError::NoActiveHand)?;
            if hand.ended {
                return self.finish();
            }

            let seat = hand
                .current_player
                .ok_or(EngineError::Internal("раздача идёт, но никто не ходит"))?;
            let Some(policy) = self.policies.get_mut(&seat) else {
                return Ok(HandStatus::Ongoing);
            };

            let kind = policy.decide(hand, seat);
            let result = match apply_action_with(hand, seat, kind, self.resolver.as_ref()) {
                Err(e) if e.is_user_error() => {
                    warn!(seat, action = %kind, error = %e, "бот выбрал нелегальное действие, фолд");
                    apply_action_with(hand, seat, PlayerActionKind::Fold, self.resolver.as_ref())
                }
                other => other,
            };

            match result {
                Ok(next) => self.hand = Some(next),
                Err(e) => {
                    if e.is_fatal() {
                        self.abort(&e);
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Раздача закончилась: снять запись и отдать её в хранилище.
    fn finish(&mut self) -> Result<HandStatus, EngineError> {
        let hand = self.hand.as_ref().ok_or(EngineError::NoActiveHand)?;
        let rec = record(hand);
        self.last_record = Some(rec.clone());

        match self.sink.save(&rec) {
            Ok(ack) => info!(hand_id = ack.id, stored = ack.stored, "запись раздачи сохранена"),
            Err(e) => {
                error!(hand_id = rec.id, error = %e, "запись раздачи не сохранена, отложена");
                self.unsaved.push(rec.clone());
            }
        }
        Ok(HandStatus::Finished(rec))
    }

    fn abort(&mut self, err: &EngineError) {
        if let Some(hand) = self.hand.take() {
            error!(hand_id = hand.id, error = %err, "раздача прервана");
        }
    }
}
