// src/integrations/mod.rs
//
// External Integrations Module

pub mod api;

pub use api::client::{ApiClient, DadosAuth, Usuario, DEFAULT_BASE_URL};
