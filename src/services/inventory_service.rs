// src/services/inventory_service.rs
//
// Inventory State Store
//
// Single source of truth for the three collections (ferragens,
// movimentacoes, projetos) within one client session. All mutation
// funnels through the methods here; readers borrow immutable
// snapshots. Collections are only swapped wholesale after the remote
// collaborator confirms a write, so a failed operation never leaves
// partially mutated state.

use chrono::{NaiveDate, Utc};
use log::{debug, info};
use std::sync::Arc;

use crate::domain::ferragem::{can_withdraw, validate_ferragem, Ferragem};
use crate::domain::movimentacao::{Movimentacao, TipoMovimentacao};
use crate::domain::projeto::{validate_projeto, Projeto, StatusProjeto};
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::remote::{InventarioRemoto, NovaFerragem, NovaMovimentacao, NovoProjeto};
use crate::views;

/// Partial edit of a Ferragem's descriptive fields
#[derive(Debug, Clone, Default)]
pub struct AtualizaFerragem {
    pub tipo: Option<String>,
    pub marca: Option<String>,
    pub quantidade: Option<u32>,
    pub categoria: Option<String>,
}

/// Partial edit of a Projeto
#[derive(Debug, Clone, Default)]
pub struct AtualizaProjeto {
    pub nome_cliente: Option<String>,
    pub marceneiro_responsavel: Option<String>,
    pub status: Option<StatusProjeto>,
    pub valor: Option<f64>,
}

pub struct InventoryService {
    remote: Arc<dyn InventarioRemoto>,
    ferragens: Vec<Ferragem>,
    movimentacoes: Vec<Movimentacao>,
    projetos: Vec<Projeto>,
}

impl InventoryService {
    pub fn new(remote: Arc<dyn InventarioRemoto>) -> Self {
        Self {
            remote,
            ferragens: Vec::new(),
            movimentacoes: Vec::new(),
            projetos: Vec::new(),
        }
    }

    // ------------------------------------------------------------------
    // Snapshot reads
    // ------------------------------------------------------------------

    pub fn ferragens(&self) -> &[Ferragem] {
        &self.ferragens
    }

    pub fn movimentacoes(&self) -> &[Movimentacao] {
        &self.movimentacoes
    }

    pub fn projetos(&self) -> &[Projeto] {
        &self.projetos
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Fetch fresh snapshots of all three collections and replace the
    /// local ones wholesale. Any failure leaves prior state intact and
    /// surfaces as `AppError::Load`; there is no automatic retry.
    pub async fn load_all(&mut self) -> AppResult<()> {
        let ferragens = self
            .remote
            .list_ferragens()
            .await
            .map_err(|e| AppError::Load(e.to_string()))?;
        let movimentacoes = self
            .remote
            .list_movimentacoes()
            .await
            .map_err(|e| AppError::Load(e.to_string()))?;
        let projetos = self
            .remote
            .list_projetos()
            .await
            .map_err(|e| AppError::Load(e.to_string()))?;

        self.ferragens = ferragens;
        self.movimentacoes = movimentacoes;
        self.projetos = projetos;
        self.refresh_materiais();

        debug!(
            "loaded {} ferragens, {} movimentacoes, {} projetos",
            self.ferragens.len(),
            self.movimentacoes.len(),
            self.projetos.len()
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Ferragens
    // ------------------------------------------------------------------

    /// Create a Ferragem on the backend and append the server-confirmed
    /// record. No optimistic insert: a failed create changes nothing.
    pub async fn add_ferragem(&mut self, nova: NovaFerragem) -> AppResult<Ferragem> {
        let candidata = Ferragem::new(
            String::new(),
            nova.tipo.clone(),
            nova.marca.clone(),
            nova.quantidade,
            nova.categoria.clone(),
        );
        validate_ferragem(&candidata)?;

        let confirmada = self.remote.create_ferragem(nova).await?;
        info!("ferragem added: {}", confirmada);
        self.ferragens.push(confirmada.clone());
        Ok(confirmada)
    }

    /// Local-only edit; the backend exposes no tool update endpoint.
    /// Re-validated before commit, so a bad edit changes nothing.
    pub fn update_ferragem(&mut self, id: &str, atualiza: AtualizaFerragem) -> AppResult<Ferragem> {
        let posicao = self
            .ferragens
            .iter()
            .position(|f| f.id == id)
            .ok_or(AppError::NotFound)?;

        let mut editada = self.ferragens[posicao].clone();
        if let Some(tipo) = atualiza.tipo {
            editada.tipo = tipo;
        }
        if let Some(marca) = atualiza.marca {
            editada.marca = marca;
        }
        if let Some(quantidade) = atualiza.quantidade {
            editada.quantidade = quantidade;
        }
        if let Some(categoria) = atualiza.categoria {
            editada.categoria = categoria;
        }
        validate_ferragem(&editada)?;

        self.ferragens[posicao] = editada.clone();
        Ok(editada)
    }

    /// Local-only removal. Movement history keeps its own snapshots, so
    /// deleting a Ferragem never rewrites history.
    pub fn delete_ferragem(&mut self, id: &str) -> AppResult<()> {
        let posicao = self
            .ferragens
            .iter()
            .position(|f| f.id == id)
            .ok_or(AppError::NotFound)?;
        self.ferragens.remove(posicao);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Stock movements
    // ------------------------------------------------------------------

    /// Record a withdrawal against current stock.
    ///
    /// Preconditions are checked locally before any network call:
    /// unknown id, non-positive quantity, missing client/responsible and
    /// insufficient stock each fail with a distinct error kind and zero
    /// side effects. On remote success the store reloads ferragens and
    /// movement history wholesale; the server is authoritative for the
    /// resulting stock level, so there is no local decrement to drift.
    pub async fn record_withdrawal(
        &mut self,
        ferragem_id: &str,
        quantidade: u32,
        cliente: &str,
        responsavel: &str,
        data: NaiveDate,
    ) -> AppResult<()> {
        let ferragem = self
            .ferragens
            .iter()
            .find(|f| f.id == ferragem_id)
            .ok_or(AppError::NotFound)?;

        if quantidade == 0 {
            return Err(DomainError::QuantidadeInvalida(quantidade).into());
        }
        if cliente.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Withdrawal must name a client".to_string(),
            )
            .into());
        }
        if responsavel.trim().is_empty() {
            return Err(DomainError::InvariantViolation(
                "Withdrawal must name a responsible party".to_string(),
            )
            .into());
        }
        if !can_withdraw(ferragem, quantidade) {
            return Err(DomainError::EstoqueInsuficiente {
                solicitado: quantidade,
                disponivel: ferragem.quantidade,
            }
            .into());
        }

        let motivo = format!(
            "Retirada para o cliente: {} - Responsável: {}",
            cliente, responsavel
        );
        self.remote
            .create_movimentacao(NovaMovimentacao {
                ferragem_id: ferragem_id.to_string(),
                tipo: TipoMovimentacao::Saida,
                quantidade,
                cliente: cliente.to_string(),
                responsavel: responsavel.to_string(),
                data,
                motivo: Some(motivo),
            })
            .await?;

        info!(
            "withdrawal recorded: {} x{} for {}",
            ferragem_id, quantidade, cliente
        );
        self.reload_estoque().await
    }

    /// Record a stock entry. Same non-optimistic reload-after-write
    /// policy as withdrawals.
    pub async fn record_entry(
        &mut self,
        ferragem_id: &str,
        quantidade: u32,
        motivo: Option<String>,
    ) -> AppResult<()> {
        if !self.ferragens.iter().any(|f| f.id == ferragem_id) {
            return Err(AppError::NotFound);
        }
        if quantidade == 0 {
            return Err(DomainError::QuantidadeInvalida(quantidade).into());
        }

        self.remote
            .create_movimentacao(NovaMovimentacao {
                ferragem_id: ferragem_id.to_string(),
                tipo: TipoMovimentacao::Entrada,
                quantidade,
                cliente: String::new(),
                responsavel: String::new(),
                data: Utc::now().date_naive(),
                motivo,
            })
            .await?;

        info!("entry recorded: {} x{}", ferragem_id, quantidade);
        self.reload_estoque().await
    }

    // ------------------------------------------------------------------
    // Projetos
    // ------------------------------------------------------------------

    /// Create a Projeto on the backend and append the confirmed record.
    /// Material usage is derived from the movement history for the named
    /// client, never entered by hand.
    pub async fn add_projeto(&mut self, novo: NovoProjeto) -> AppResult<Projeto> {
        let agora = Utc::now();
        let candidato = Projeto {
            id: String::new(),
            nome_cliente: novo.nome_cliente.clone(),
            marceneiro_responsavel: novo.marceneiro_responsavel.clone(),
            status: novo.status,
            valor: novo.valor,
            materiais_usados: Vec::new(),
            criado_em: agora,
            atualizado_em: agora,
        };
        validate_projeto(&candidato)?;

        let mut confirmado = self.remote.create_projeto(novo).await?;
        confirmado.materiais_usados =
            views::materials_used_by_client(&self.movimentacoes, &confirmado.nome_cliente);

        info!("projeto created for {}", confirmado.nome_cliente);
        self.projetos.push(confirmado.clone());
        Ok(confirmado)
    }

    /// Local partial update; refreshes `atualizado_em` and re-derives
    /// material usage for the (possibly renamed) client.
    pub fn update_projeto(&mut self, id: &str, atualiza: AtualizaProjeto) -> AppResult<Projeto> {
        let posicao = self
            .projetos
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::NotFound)?;

        let mut editado = self.projetos[posicao].clone();
        editado.update(
            atualiza.nome_cliente,
            atualiza.marceneiro_responsavel,
            atualiza.status,
            atualiza.valor,
        );
        editado.materiais_usados =
            views::materials_used_by_client(&self.movimentacoes, &editado.nome_cliente);
        validate_projeto(&editado)?;

        self.projetos[posicao] = editado.clone();
        Ok(editado)
    }

    pub fn delete_projeto(&mut self, id: &str) -> AppResult<()> {
        let posicao = self
            .projetos
            .iter()
            .position(|p| p.id == id)
            .ok_or(AppError::NotFound)?;
        self.projetos.remove(posicao);
        Ok(())
    }

    // ------------------------------------------------------------------
    // INTERNAL
    // ------------------------------------------------------------------

    /// Refresh ferragens and movement history after a confirmed
    /// stock-affecting write. Both collections are fetched before either
    /// is swapped in, so a failed refresh leaves the previous snapshot.
    async fn reload_estoque(&mut self) -> AppResult<()> {
        let ferragens = self
            .remote
            .list_ferragens()
            .await
            .map_err(|e| AppError::Load(e.to_string()))?;
        let movimentacoes = self
            .remote
            .list_movimentacoes()
            .await
            .map_err(|e| AppError::Load(e.to_string()))?;

        self.ferragens = ferragens;
        self.movimentacoes = movimentacoes;
        self.refresh_materiais();
        Ok(())
    }

    /// Re-derive every project's material usage from the current
    /// movement history
    fn refresh_materiais(&mut self) {
        for projeto in &mut self.projetos {
            projeto.materiais_usados =
                views::materials_used_by_client(&self.movimentacoes, &projeto.nome_cliente);
        }
    }
}
