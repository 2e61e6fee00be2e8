// src/services/auth_service.rs
//
// Authentication session over the backend's token endpoints. The bearer
// token itself lives in the ApiClient so every subsequent request
// carries it; this service tracks the logged-in user.

use log::info;
use std::sync::Arc;

use crate::error::AppResult;
use crate::integrations::api::client::{ApiClient, Usuario};

pub struct AuthService {
    client: Arc<ApiClient>,
    usuario: Option<Usuario>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            usuario: None,
        }
    }

    /// Currently authenticated user, if any
    pub fn usuario(&self) -> Option<&Usuario> {
        self.usuario.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_authenticated()
    }

    /// Bearer token for persistence across sessions
    pub fn token(&self) -> Option<String> {
        self.client.token()
    }

    pub async fn login(&mut self, email: &str, senha: &str) -> AppResult<Usuario> {
        let dados = self.client.login(email, senha).await?;
        info!("logged in as {}", dados.usuario.email);
        self.usuario = Some(dados.usuario.clone());
        Ok(dados.usuario)
    }

    pub async fn register(
        &mut self,
        nome: &str,
        email: &str,
        senha: &str,
        confirmacao: &str,
    ) -> AppResult<Usuario> {
        let dados = self.client.register(nome, email, senha, confirmacao).await?;
        self.usuario = Some(dados.usuario.clone());
        Ok(dados.usuario)
    }

    /// Ends the session. The local session is cleared even when the
    /// remote call fails.
    pub async fn logout(&mut self) -> AppResult<()> {
        let result = self.client.logout().await;
        self.usuario = None;
        result
    }

    /// Refresh the cached user from the backend
    pub async fn profile(&mut self) -> AppResult<Usuario> {
        let usuario = self.client.profile().await?;
        self.usuario = Some(usuario.clone());
        Ok(usuario)
    }
}
