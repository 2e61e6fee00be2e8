// src/lib.rs
// Marcenaria - Inventory and project tracking client for a woodworking shop
//
// Architecture:
// - Domain-centric: stock consistency rules live in the domains
// - Remote-authoritative: the backend confirms every write; stock-affecting
//   operations reload rather than guess the resulting level
// - Explicit: all mutation funnels through the InventoryService
// - Views: read-only aggregates are pure functions of the collections

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod domain;
pub mod error;
pub mod integrations;
pub mod remote;
pub mod services;
pub mod views;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    apply_entry,
    apply_withdrawal,
    can_withdraw,
    is_low_stock,
    validate_ferragem,
    validate_movimentacao,
    validate_projeto,
    // Ferragem
    Ferragem,
    // Projeto
    MaterialUsado,
    // Movimentacao
    Movimentacao,
    Projeto,
    StatusProjeto,
    TipoMovimentacao,
    LOW_STOCK_THRESHOLD,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use domain::{DomainError, DomainResult};
pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Remote Collaborator
// ============================================================================

pub use remote::{InventarioRemoto, NovaFerragem, NovaMovimentacao, NovoProjeto};

pub use integrations::{ApiClient, DadosAuth, Usuario, DEFAULT_BASE_URL};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AtualizaFerragem,
    AtualizaProjeto,
    // Auth Session
    AuthService,
    // Inventory State Store
    InventoryService,
};

// ============================================================================
// PUBLIC API - Derived Views
// ============================================================================

pub use views::{
    dashboard_summary, filter_movements, low_stock_items, materials_used_by_client,
    recent_movements, recent_projects, unique_clients, ResumoDashboard,
};
