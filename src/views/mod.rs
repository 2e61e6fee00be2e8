// src/views/mod.rs
//
// Derived-View Computation
//
// CRITICAL RULES:
// - Pure functions of the state passed in
// - NO mutation of stored state, NO caching
// - Recomputed on every call, so a view is always consistent with
//   the collections it was given

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::ferragem::{is_low_stock, Ferragem};
use crate::domain::movimentacao::{Movimentacao, TipoMovimentacao};
use crate::domain::projeto::{MaterialUsado, Projeto, StatusProjeto};

/// Aggregate counters backing the dashboard screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResumoDashboard {
    pub total_ferragens: usize,
    pub estoque_baixo: usize,
    pub total_movimentacoes: usize,
    pub projetos_ativos: usize,
}

/// Items at or below the restock threshold, in input order
pub fn low_stock_items(ferragens: &[Ferragem]) -> Vec<&Ferragem> {
    ferragens.iter().filter(|f| is_low_stock(f)).collect()
}

/// Aggregates the withdrawals recorded for `cliente`, grouped by the
/// ferragem's (tipo, marca) pair with quantities summed per group.
///
/// The grouping key is descriptive, not the ferragem id, so historical
/// movements referencing a deleted ferragem still aggregate correctly.
/// Groups appear in first-seen order; totals are order-independent.
pub fn materials_used_by_client(
    movimentacoes: &[Movimentacao],
    cliente: &str,
) -> Vec<MaterialUsado> {
    let mut materiais: Vec<MaterialUsado> = Vec::new();

    for movimentacao in movimentacoes
        .iter()
        .filter(|m| m.tipo == TipoMovimentacao::Saida && m.cliente == cliente)
    {
        let existente = materiais.iter_mut().find(|m| {
            m.ferragem.tipo == movimentacao.ferragem.tipo
                && m.ferragem.marca == movimentacao.ferragem.marca
        });

        match existente {
            Some(material) => material.quantidade += movimentacao.quantidade,
            None => materiais.push(MaterialUsado {
                ferragem: movimentacao.ferragem.clone(),
                quantidade: movimentacao.quantidade,
            }),
        }
    }

    materiais
}

/// The `limit` most recent movements, newest first.
/// Stable sort: movements sharing a date keep their input order.
pub fn recent_movements(movimentacoes: &[Movimentacao], limit: usize) -> Vec<&Movimentacao> {
    let mut ordenadas: Vec<&Movimentacao> = movimentacoes.iter().collect();
    ordenadas.sort_by(|a, b| b.data.cmp(&a.data));
    ordenadas.truncate(limit);
    ordenadas
}

/// The `limit` most recently updated projects, newest first.
/// Stable sort: ties keep their input order.
pub fn recent_projects(projetos: &[Projeto], limit: usize) -> Vec<&Projeto> {
    let mut ordenados: Vec<&Projeto> = projetos.iter().collect();
    ordenados.sort_by(|a, b| b.atualizado_em.cmp(&a.atualizado_em));
    ordenados.truncate(limit);
    ordenados
}

/// Dashboard counters. `projetos_ativos` counts exactly the
/// `EmAndamento` status.
pub fn dashboard_summary(
    ferragens: &[Ferragem],
    movimentacoes: &[Movimentacao],
    projetos: &[Projeto],
) -> ResumoDashboard {
    ResumoDashboard {
        total_ferragens: ferragens.len(),
        estoque_baixo: ferragens.iter().filter(|f| is_low_stock(f)).count(),
        total_movimentacoes: movimentacoes.len(),
        projetos_ativos: projetos
            .iter()
            .filter(|p| p.status == StatusProjeto::EmAndamento)
            .count(),
    }
}

/// History-screen filter: case-insensitive match on cliente, responsavel
/// and the ferragem snapshot's tipo/marca, plus an optional exact-date
/// filter. Result is sorted newest first.
pub fn filter_movements<'a>(
    movimentacoes: &'a [Movimentacao],
    termo: &str,
    data: Option<NaiveDate>,
) -> Vec<&'a Movimentacao> {
    let termo = termo.to_lowercase();

    let mut filtradas: Vec<&Movimentacao> = movimentacoes
        .iter()
        .filter(|m| {
            let corresponde = termo.is_empty()
                || m.cliente.to_lowercase().contains(&termo)
                || m.responsavel.to_lowercase().contains(&termo)
                || m.ferragem.tipo.to_lowercase().contains(&termo)
                || m.ferragem.marca.to_lowercase().contains(&termo);
            let na_data = data.map_or(true, |d| m.data == d);
            corresponde && na_data
        })
        .collect();

    filtradas.sort_by(|a, b| b.data.cmp(&a.data));
    filtradas
}

/// Number of distinct clients appearing in the given movements
pub fn unique_clients(movimentacoes: &[Movimentacao]) -> usize {
    let mut clientes: Vec<&str> = movimentacoes.iter().map(|m| m.cliente.as_str()).collect();
    clientes.sort_unstable();
    clientes.dedup();
    clientes.len()
}
