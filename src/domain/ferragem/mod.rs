// src/domain/ferragem/mod.rs

pub mod entity;
pub mod invariants;

pub use entity::Ferragem;
pub use invariants::{
    apply_entry, apply_withdrawal, can_withdraw, is_low_stock, validate_ferragem,
    LOW_STOCK_THRESHOLD,
};
