//! Движок одной раздачи безлимитного холдема за одним столом.
//!
//! Слои:
//! - `domain` – карты, колода, игроки, конфиг стола, запись раздачи;
//! - `engine` – торговля, переход улиц, выплата банка, сессия, реплей;
//! - `infra` – RNG, генерация ID, хранилище истории раздач;
//! - `api` – команды, запросы и DTO для внешнего клиента.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
