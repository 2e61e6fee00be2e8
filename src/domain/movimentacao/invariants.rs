use super::entity::{Movimentacao, TipoMovimentacao};
use crate::domain::{DomainError, DomainResult};

/// Validates all Movimentacao invariants
pub fn validate_movimentacao(movimentacao: &Movimentacao) -> DomainResult<()> {
    if movimentacao.quantidade == 0 {
        return Err(DomainError::QuantidadeInvalida(movimentacao.quantidade));
    }

    // Withdrawals carry the client/responsible metadata; entries may not
    if movimentacao.tipo == TipoMovimentacao::Saida {
        if movimentacao.cliente.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Withdrawal must name a client".to_string(),
            ));
        }
        if movimentacao.responsavel.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Withdrawal must name a responsible party".to_string(),
            ));
        }
    }

    Ok(())
}
