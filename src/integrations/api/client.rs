// src/integrations/api/client.rs
//
// Workshop backend REST client
//
// ARCHITECTURE:
// - Thin HTTP client over the shop's REST API
// - Handles the bearer token and the success/error response envelope
// - Maps wire payloads → domain entities (NO domain mutation)
// - Used by InventoryService through the InventarioRemoto trait
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never enforces business rules; precondition checks live in the services
// - A non-success envelope tag is surfaced exactly like a transport failure

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::ferragem::Ferragem;
use crate::domain::movimentacao::{Movimentacao, TipoMovimentacao};
use crate::domain::projeto::Projeto;
use crate::error::{AppError, AppResult};
use crate::remote::{InventarioRemoto, NovaFerragem, NovaMovimentacao, NovoProjeto};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

/// An authenticated backend account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

/// Login/register result: the account plus its bearer token
#[derive(Debug, Clone)]
pub struct DadosAuth {
    pub usuario: Usuario,
    pub token: String,
}

// ============================================================================
// WIRE TYPES (private, mapped to domain before leaving this module)
// ============================================================================

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum StatusTag {
    Success,
    Error,
}

/// Every backend response is wrapped in this envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    status: StatusTag,
    message: Option<String>,
    data: Option<T>,
    errors: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    id: i64,
    name: String,
    email: String,
}

#[derive(Debug, Deserialize)]
struct AuthData {
    user: UserData,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    user: UserData,
}

#[derive(Debug, Deserialize)]
struct ToolData {
    id: i64,
    #[serde(rename = "type")]
    tipo: String,
    brand: String,
    quantity: u32,
    category: String,
}

#[derive(Debug, Deserialize)]
struct MovementData {
    id: i64,
    tool_id: i64,
    #[serde(rename = "type")]
    tipo: String,
    quantity: u32,
    reason: Option<String>,
    client: Option<String>,
    responsible: Option<String>,
    date: String,
    tool: ToolData,
}

#[derive(Debug, Deserialize)]
struct ProjectData {
    id: i64,
    client: String,
    responsible: String,
    status: String,
    value: f64,
    created_at: String,
    updated_at: String,
}

#[derive(Debug, Serialize)]
struct CreateToolBody<'a> {
    #[serde(rename = "type")]
    tipo: &'a str,
    brand: &'a str,
    quantity: u32,
    category: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateMovementBody<'a> {
    tool_id: &'a str,
    #[serde(rename = "type")]
    tipo: TipoMovimentacao,
    quantity: u32,
    client: &'a str,
    responsible: &'a str,
    date: NaiveDate,
    reason: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CreateProjectBody<'a> {
    client: &'a str,
    responsible: &'a str,
    status: String,
    value: f64,
}

// ============================================================================
// CLIENT
// ============================================================================

/// Workshop backend API client
pub struct ApiClient {
    base_url: String,
    http_client: Client,
    // Interior mutability: login/logout set the token through &self,
    // mirroring how every request method borrows the client
    token: Mutex<Option<String>>,
}

impl ApiClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into(),
            http_client,
            token: Mutex::new(None),
        }
    }

    /// Create a client with a previously persisted bearer token
    pub fn with_token(base_url: impl Into<String>, token: String) -> Self {
        let client = Self::new(base_url);
        client.set_token(Some(token));
        client
    }

    /// Current bearer token, if any. Callers persist this across sessions.
    pub fn token(&self) -> Option<String> {
        self.token.lock().expect("token lock poisoned").clone()
    }

    pub fn set_token(&self, token: Option<String>) {
        *self.token.lock().expect("token lock poisoned") = token;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    // ------------------------------------------------------------------
    // Authentication
    // ------------------------------------------------------------------

    /// Authenticate and store the returned bearer token
    pub async fn login(&self, email: &str, senha: &str) -> AppResult<DadosAuth> {
        let body = serde_json::json!({ "email": email, "password": senha });
        let data: AuthData = self.request(Method::POST, "/login", Some(&body)).await?;

        self.set_token(Some(data.token.clone()));
        Ok(DadosAuth {
            usuario: Self::map_user(data.user),
            token: data.token,
        })
    }

    /// Create an account and store the returned bearer token
    pub async fn register(
        &self,
        nome: &str,
        email: &str,
        senha: &str,
        confirmacao: &str,
    ) -> AppResult<DadosAuth> {
        let body = serde_json::json!({
            "name": nome,
            "email": email,
            "password": senha,
            "password_confirmation": confirmacao,
        });
        let data: AuthData = self.request(Method::POST, "/register", Some(&body)).await?;

        self.set_token(Some(data.token.clone()));
        Ok(DadosAuth {
            usuario: Self::map_user(data.user),
            token: data.token,
        })
    }

    /// Invalidate the session. The local token is cleared even when the
    /// remote call fails, so a dead backend can never pin a stale session.
    pub async fn logout(&self) -> AppResult<()> {
        let result = self
            .request::<serde_json::Value, _>(Method::POST, "/logout", Some(&serde_json::json!({})))
            .await;

        self.set_token(None);

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                warn!("logout request failed, token cleared locally: {}", err);
                Err(err)
            }
        }
    }

    pub async fn profile(&self) -> AppResult<Usuario> {
        let data: ProfileData = self.request(Method::GET, "/user/profile", None::<&()>).await?;
        Ok(Self::map_user(data.user))
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.request::<serde_json::Value, ()>(Method::GET, "/health", None)
            .await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // INTERNAL: request execution
    // ------------------------------------------------------------------

    /// Execute a request and unwrap the response envelope.
    /// HTTP failures, error tags and missing data all become `Remote`.
    async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> AppResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(method, &url)
            .header(header::ACCEPT, "application/json");

        if let Some(token) = self.token() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Remote(format!("Request to {} failed: {}", path, e)))?;

        let http_status = response.status();
        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Remote(format!("Invalid response from {}: {}", path, e)))?;

        if !http_status.is_success() || envelope.status == StatusTag::Error {
            let message = Self::envelope_message(envelope.message, envelope.errors)
                .unwrap_or_else(|| format!("{} returned HTTP {}", path, http_status));
            warn!("{} failed: {}", path, message);
            return Err(AppError::Remote(message));
        }

        envelope
            .data
            .ok_or_else(|| AppError::Remote(format!("{} returned no data", path)))
    }

    /// Best human-readable message out of an error envelope
    fn envelope_message(
        message: Option<String>,
        errors: Option<HashMap<String, Vec<String>>>,
    ) -> Option<String> {
        let detalhes = errors.map(|errors| {
            let mut campos: Vec<String> = errors
                .into_iter()
                .map(|(campo, msgs)| format!("{}: {}", campo, msgs.join(", ")))
                .collect();
            campos.sort();
            campos.join("; ")
        });

        match (message, detalhes) {
            (Some(m), Some(d)) if !d.is_empty() => Some(format!("{} ({})", m, d)),
            (Some(m), _) => Some(m),
            (None, Some(d)) if !d.is_empty() => Some(d),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // INTERNAL: wire → domain mapping
    // ------------------------------------------------------------------

    fn map_user(user: UserData) -> Usuario {
        Usuario {
            id: user.id,
            nome: user.name,
            email: user.email,
        }
    }

    fn map_tool(tool: ToolData) -> Ferragem {
        Ferragem {
            id: tool.id.to_string(),
            tipo: tool.tipo,
            marca: tool.brand,
            quantidade: tool.quantity,
            categoria: tool.category,
        }
    }

    fn map_movement(movement: MovementData) -> AppResult<Movimentacao> {
        let tipo = match movement.tipo.as_str() {
            "entrada" => TipoMovimentacao::Entrada,
            "saida" => TipoMovimentacao::Saida,
            other => {
                return Err(AppError::Remote(format!(
                    "Unknown movement type in payload: {}",
                    other
                )))
            }
        };

        let data = NaiveDate::parse_from_str(&movement.date, "%Y-%m-%d")
            .map_err(|e| AppError::Remote(format!("Invalid movement date '{}': {}", movement.date, e)))?;

        Ok(Movimentacao {
            id: movement.id.to_string(),
            ferragem_id: movement.tool_id.to_string(),
            ferragem: Self::map_tool(movement.tool),
            tipo,
            quantidade: movement.quantity,
            cliente: movement.client.unwrap_or_default(),
            responsavel: movement.responsible.unwrap_or_default(),
            data,
            motivo: movement.reason,
        })
    }

    fn map_project(project: ProjectData) -> AppResult<Projeto> {
        let status = project
            .status
            .parse()
            .map_err(AppError::Remote)?;

        Ok(Projeto {
            id: project.id.to_string(),
            nome_cliente: project.client,
            marceneiro_responsavel: project.responsible,
            status,
            valor: project.value,
            // Derived by the state store from movement history
            materiais_usados: Vec::new(),
            criado_em: Self::parse_timestamp(&project.created_at)?,
            atualizado_em: Self::parse_timestamp(&project.updated_at)?,
        })
    }

    /// Backend timestamps are RFC 3339; bare dates also appear in
    /// older records
    fn parse_timestamp(raw: &str) -> AppResult<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| AppError::Remote(format!("Invalid timestamp '{}': {}", raw, e)))?;
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| AppError::Remote(format!("Invalid timestamp '{}'", raw)))?;
        Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl InventarioRemoto for ApiClient {
    async fn list_ferragens(&self) -> AppResult<Vec<Ferragem>> {
        let tools: Vec<ToolData> = self.request(Method::GET, "/tools", None::<&()>).await?;
        Ok(tools.into_iter().map(Self::map_tool).collect())
    }

    async fn create_ferragem(&self, nova: NovaFerragem) -> AppResult<Ferragem> {
        let body = CreateToolBody {
            tipo: &nova.tipo,
            brand: &nova.marca,
            quantity: nova.quantidade,
            category: &nova.categoria,
        };
        let tool: ToolData = self.request(Method::POST, "/tools", Some(&body)).await?;
        Ok(Self::map_tool(tool))
    }

    async fn list_movimentacoes(&self) -> AppResult<Vec<Movimentacao>> {
        let movements: Vec<MovementData> = self
            .request(Method::GET, "/tool-movements", None::<&()>)
            .await?;
        movements.into_iter().map(Self::map_movement).collect()
    }

    async fn create_movimentacao(&self, nova: NovaMovimentacao) -> AppResult<Movimentacao> {
        let body = CreateMovementBody {
            tool_id: &nova.ferragem_id,
            tipo: nova.tipo,
            quantity: nova.quantidade,
            client: &nova.cliente,
            responsible: &nova.responsavel,
            date: nova.data,
            reason: nova.motivo.as_deref(),
        };
        let movement: MovementData = self
            .request(Method::POST, "/tool-movements", Some(&body))
            .await?;
        Self::map_movement(movement)
    }

    async fn list_projetos(&self) -> AppResult<Vec<Projeto>> {
        let projects: Vec<ProjectData> = self.request(Method::GET, "/projects", None::<&()>).await?;
        projects.into_iter().map(Self::map_project).collect()
    }

    async fn create_projeto(&self, novo: NovoProjeto) -> AppResult<Projeto> {
        let body = CreateProjectBody {
            client: &novo.nome_cliente,
            responsible: &novo.marceneiro_responsavel,
            status: novo.status.to_string(),
            value: novo.valor,
        };
        let project: ProjectData = self.request(Method::POST, "/projects", Some(&body)).await?;
        Self::map_project(project)
    }
}
