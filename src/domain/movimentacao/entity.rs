use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ferragem::Ferragem;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoMovimentacao {
    Entrada,
    Saida,
}

/// A single recorded change to a Ferragem's stock level.
///
/// Movements are append-only history: once created they are never mutated
/// or deleted. The embedded `ferragem` is a snapshot of the descriptive
/// fields at capture time, so the record stays meaningful even after the
/// referenced Ferragem is edited or removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movimentacao {
    pub id: String,

    /// Identity of the Ferragem moved
    pub ferragem_id: String,

    /// Snapshot of the Ferragem at the time the movement was recorded
    pub ferragem: Ferragem,

    pub tipo: TipoMovimentacao,

    /// Units moved, always positive
    pub quantidade: u32,

    /// Client the material was withdrawn for (empty for plain entries)
    pub cliente: String,

    /// Craftsperson responsible for the movement
    pub responsavel: String,

    pub data: NaiveDate,

    /// Free-text reason sent to the backend
    pub motivo: Option<String>,
}

impl std::fmt::Display for TipoMovimentacao {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TipoMovimentacao::Entrada => write!(f, "entrada"),
            TipoMovimentacao::Saida => write!(f, "saida"),
        }
    }
}
