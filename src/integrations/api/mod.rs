// src/integrations/api/mod.rs

pub mod client;

pub use client::{ApiClient, DadosAuth, Usuario, DEFAULT_BASE_URL};
