// src/domain/projeto/mod.rs

pub mod entity;
pub mod invariants;

pub use entity::{MaterialUsado, Projeto, StatusProjeto};
pub use invariants::validate_projeto;
