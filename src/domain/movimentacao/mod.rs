// src/domain/movimentacao/mod.rs

pub mod entity;
pub mod invariants;

pub use entity::{Movimentacao, TipoMovimentacao};
pub use invariants::validate_movimentacao;
