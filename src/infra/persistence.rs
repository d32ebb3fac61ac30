use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::hand::HandRecord;
use crate::domain::HandId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Раздача {0} уже сохранена")]
    DuplicateId(HandId),

    #[error("Хранилище недоступно: {0}")]
    Unavailable(String),
}

/// Подтверждение сохранения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandAck {
    pub id: HandId,
    /// Сколько записей в хранилище после сохранения.
    pub stored: usize,
}

/// Куда складываются записи завершённых раздач.
///
/// Движок только отдаёт запись; формат и место хранения – забота реализации.
pub trait HandHistorySink {
    fn save(&mut self, record: &HandRecord) -> Result<HandAck, SinkError>;

    /// Все записи, от новых к старым.
    fn list(&self) -> Vec<HandRecord>;

    fn get(&self, id: HandId) -> Option<HandRecord>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryHandHistory {
    records: BTreeMap<HandId, HandRecord>,
}

impl InMemoryHandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HandHistorySink for InMemoryHandHistory {
    fn save(&mut self, record: &HandRecord) -> Result<HandAck, SinkError> {
        if self.records.contains_key(&record.id) {
            return Err(SinkError::DuplicateId(record.id));
        }
        self.records.insert(record.id, record.clone());
        Ok(HandAck {
            id: record.id,
            stored: self.records.len(),
        })
    }

    fn list(&self) -> Vec<HandRecord> {
        self.records.values().rev().cloned().collect()
    }

    fn get(&self, id: HandId) -> Option<HandRecord> {
        self.records.get(&id).cloned()
    }
}

/// Сохранять в `Vec<String>` JSON-строки (по одной на раздачу).
/// Удобно для выгрузки истории в файл построчно.
#[derive(Debug, Default)]
pub struct JsonLinesHistory {
    pub lines: Vec<String>,
}

impl HandHistorySink for JsonLinesHistory {
    fn save(&mut self, record: &HandRecord) -> Result<HandAck, SinkError> {
        if self.get(record.id).is_some() {
            return Err(SinkError::DuplicateId(record.id));
        }
        let line =
            serde_json::to_string(record).map_err(|e| SinkError::Unavailable(e.to_string()))?;
        self.lines.push(line);
        Ok(HandAck {
            id: record.id,
            stored: self.lines.len(),
        })
    }

    fn list(&self) -> Vec<HandRecord> {
        self.lines
            .iter()
            .rev()
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect()
    }

    fn get(&self, id: HandId) -> Option<HandRecord> {
        self.lines
            .iter()
            .filter_map(|l| serde_json::from_str::<HandRecord>(l).ok())
            .find(|r| r.id == id)
    }
}
