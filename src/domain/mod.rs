// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod ferragem;
pub mod movimentacao;
pub mod projeto;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Ferragem Domain (stock-keeping units + consistency rules)
pub use ferragem::{
    apply_entry, apply_withdrawal, can_withdraw, is_low_stock, validate_ferragem, Ferragem,
    LOW_STOCK_THRESHOLD,
};

// Movimentacao Domain (append-only stock movement history)
pub use movimentacao::{validate_movimentacao, Movimentacao, TipoMovimentacao};

// Projeto Domain
pub use projeto::{validate_projeto, MaterialUsado, Projeto, StatusProjeto};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants,
/// always detected locally before any network call
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Quantity must be a positive integer, got {0}")]
    QuantidadeInvalida(u32),

    #[error("Insufficient stock: requested {solicitado}, on hand {disponivel}")]
    EstoqueInsuficiente { solicitado: u32, disponivel: u32 },
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
