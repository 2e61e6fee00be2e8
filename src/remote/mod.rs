// src/remote/mod.rs
//
// Remote collaborator seam
//
// CRITICAL RULES:
// - The trait is a DUMB transport boundary: no business logic,
//   no invariant enforcement
// - Implementations map wire payloads to domain entities and nothing else
// - Services depend on the trait, never on a concrete client

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ferragem::Ferragem;
use crate::domain::movimentacao::{Movimentacao, TipoMovimentacao};
use crate::domain::projeto::{Projeto, StatusProjeto};
use crate::error::AppResult;

#[cfg(test)]
use mockall::automock;

/// Payload for creating a Ferragem on the backend
#[derive(Debug, Clone, Serialize)]
pub struct NovaFerragem {
    pub tipo: String,
    pub marca: String,
    pub quantidade: u32,
    pub categoria: String,
}

/// Payload for recording a stock movement on the backend
#[derive(Debug, Clone, Serialize)]
pub struct NovaMovimentacao {
    pub ferragem_id: String,
    pub tipo: TipoMovimentacao,
    pub quantidade: u32,
    pub cliente: String,
    pub responsavel: String,
    pub data: NaiveDate,
    pub motivo: Option<String>,
}

/// Payload for creating a Projeto on the backend
#[derive(Debug, Clone, Serialize)]
pub struct NovoProjeto {
    pub nome_cliente: String,
    pub marceneiro_responsavel: String,
    pub status: StatusProjeto,
    pub valor: f64,
}

/// The remote inventory API as the state store consumes it.
///
/// Every method either returns server-confirmed data or an
/// `AppError::Remote`; a non-success response tag is indistinguishable
/// from a transport failure at this boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InventarioRemoto: Send + Sync {
    async fn list_ferragens(&self) -> AppResult<Vec<Ferragem>>;
    async fn create_ferragem(&self, nova: NovaFerragem) -> AppResult<Ferragem>;

    async fn list_movimentacoes(&self) -> AppResult<Vec<Movimentacao>>;
    async fn create_movimentacao(&self, nova: NovaMovimentacao) -> AppResult<Movimentacao>;

    async fn list_projetos(&self) -> AppResult<Vec<Projeto>>;
    async fn create_projeto(&self, novo: NovoProjeto) -> AppResult<Projeto>;
}
