use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ferragem::Ferragem;

/// Lifecycle status of a client job
/// Wire labels are the Portuguese strings the backend stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusProjeto {
    #[serde(rename = "Em andamento")]
    EmAndamento,
    #[serde(rename = "Finalizado")]
    Finalizado,
    #[serde(rename = "Aguardando materiais")]
    AguardandoMateriais,
    #[serde(rename = "Pausado")]
    Pausado,
    #[serde(rename = "Cancelado")]
    Cancelado,
}

/// Aggregated material consumption for one (tipo, marca) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialUsado {
    /// Snapshot of the first movement's ferragem for this group
    pub ferragem: Ferragem,
    pub quantidade: u32,
}

/// A client job record with status and derived material usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projeto {
    pub id: String,

    pub nome_cliente: String,

    pub marceneiro_responsavel: String,

    pub status: StatusProjeto,

    /// Agreed job value
    pub valor: f64,

    /// Derived from the movement history for `nome_cliente`,
    /// never edited by hand
    pub materiais_usados: Vec<MaterialUsado>,

    pub criado_em: DateTime<Utc>,

    pub atualizado_em: DateTime<Utc>,
}

impl Projeto {
    /// Apply a partial update, refreshing the modification timestamp.
    /// The creation timestamp never changes.
    pub fn update(
        &mut self,
        nome_cliente: Option<String>,
        marceneiro_responsavel: Option<String>,
        status: Option<StatusProjeto>,
        valor: Option<f64>,
    ) {
        if let Some(nome) = nome_cliente {
            self.nome_cliente = nome;
        }
        if let Some(marceneiro) = marceneiro_responsavel {
            self.marceneiro_responsavel = marceneiro;
        }
        if let Some(s) = status {
            self.status = s;
        }
        if let Some(v) = valor {
            self.valor = v;
        }

        self.atualizado_em = Utc::now();
    }
}

impl std::fmt::Display for StatusProjeto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusProjeto::EmAndamento => write!(f, "Em andamento"),
            StatusProjeto::Finalizado => write!(f, "Finalizado"),
            StatusProjeto::AguardandoMateriais => write!(f, "Aguardando materiais"),
            StatusProjeto::Pausado => write!(f, "Pausado"),
            StatusProjeto::Cancelado => write!(f, "Cancelado"),
        }
    }
}

impl std::str::FromStr for StatusProjeto {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Em andamento" => Ok(StatusProjeto::EmAndamento),
            "Finalizado" => Ok(StatusProjeto::Finalizado),
            "Aguardando materiais" => Ok(StatusProjeto::AguardandoMateriais),
            "Pausado" => Ok(StatusProjeto::Pausado),
            "Cancelado" => Ok(StatusProjeto::Cancelado),
            other => Err(format!("Unknown project status: {}", other)),
        }
    }
}
