//! Инфраструктурный слой вокруг покерного движка:
//! - генерация ID раздач;
//! - RNG-реализации для движка;
//! - хранилища записей раздач.

pub mod ids;
pub mod persistence;
pub mod rng;

pub use ids::*;
pub use persistence::*;
pub use rng::*;
