use super::entity::Ferragem;
use crate::domain::{DomainError, DomainResult};

/// Stock level at or below which an item is flagged for restocking.
/// Business policy constant.
pub const LOW_STOCK_THRESHOLD: u32 = 3;

/// Validates all Ferragem invariants
/// These are the absolute rules that must hold for a Ferragem to be valid
pub fn validate_ferragem(ferragem: &Ferragem) -> DomainResult<()> {
    validate_campo("tipo", &ferragem.tipo)?;
    validate_campo("marca", &ferragem.marca)?;
    validate_campo("categoria", &ferragem.categoria)?;
    Ok(())
}

/// Descriptive fields cannot be empty
fn validate_campo(nome: &str, valor: &str) -> DomainResult<()> {
    if valor.trim().is_empty() {
        return Err(DomainError::InvariantViolation(format!(
            "Ferragem field '{}' cannot be empty",
            nome
        )));
    }
    Ok(())
}

/// True iff a withdrawal of `quantidade` units can be recorded
/// against the current on-hand stock
pub fn can_withdraw(ferragem: &Ferragem, quantidade: u32) -> bool {
    quantidade > 0 && quantidade <= ferragem.quantidade
}

/// Returns a new Ferragem with the withdrawal applied. Never mutates in
/// place and never underflows: the caller must have checked `can_withdraw`
/// first, so an invalid quantity here is a programming error.
pub fn apply_withdrawal(ferragem: &Ferragem, quantidade: u32) -> Ferragem {
    assert!(
        can_withdraw(ferragem, quantidade),
        "apply_withdrawal called without a prior can_withdraw check"
    );
    Ferragem {
        quantidade: ferragem.quantidade - quantidade,
        ..ferragem.clone()
    }
}

/// Returns a new Ferragem with the stock entry applied
pub fn apply_entry(ferragem: &Ferragem, quantidade: u32) -> Ferragem {
    Ferragem {
        quantidade: ferragem.quantidade + quantidade,
        ..ferragem.clone()
    }
}

/// True iff on-hand stock is at or below the restock threshold
pub fn is_low_stock(ferragem: &Ferragem) -> bool {
    ferragem.quantidade <= LOW_STOCK_THRESHOLD
}

/// Invariants that must hold true for the Ferragem domain:
///
/// 1. Quantity on hand is never negative
/// 2. A withdrawal never exceeds the current on-hand quantity
/// 3. Descriptive fields (tipo, marca, categoria) are never empty
/// 4. Identity is immutable and server-assigned
/// 5. Rules here are pure: no I/O, no mutation of inputs
