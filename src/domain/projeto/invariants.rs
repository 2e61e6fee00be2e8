use super::entity::Projeto;
use crate::domain::{DomainError, DomainResult};

/// Validates all Projeto invariants
pub fn validate_projeto(projeto: &Projeto) -> DomainResult<()> {
    if projeto.nome_cliente.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Project must name a client".to_string(),
        ));
    }
    if projeto.marceneiro_responsavel.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Project must name a responsible craftsperson".to_string(),
        ));
    }
    if !projeto.valor.is_finite() || projeto.valor < 0.0 {
        return Err(DomainError::InvariantViolation(format!(
            "Project value must be non-negative, got {}",
            projeto.valor
        )));
    }
    if projeto.criado_em > projeto.atualizado_em {
        return Err(DomainError::InvariantViolation(
            "Project creation timestamp cannot be after its last update".to_string(),
        ));
    }
    Ok(())
}
