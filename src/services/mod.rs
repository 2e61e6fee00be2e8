// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod auth_service;
pub mod inventory_service;

#[cfg(test)]
mod inventory_service_tests;

// Re-export all services and their types
pub use auth_service::AuthService;

pub use inventory_service::{AtualizaFerragem, AtualizaProjeto, InventoryService};
