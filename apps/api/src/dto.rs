use serde::{Deserialize, Serialize};

/// Incoming payload of the public access form.
#[derive(Debug, Deserialize)]
pub struct AccessFormRequest {
    pub nome: String,
    pub ingresso: String,
    pub cpf: String,
}

/// Login credentials, accepted as HTML form or JSON.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub usuario: String,
    pub senha: String,
}

/// Incoming payload of the event creation form. Datetimes arrive in the
/// `datetime-local` input format (`%Y-%m-%dT%H:%M`).
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub nome: String,
    pub data_inicio: String,
    pub data_fim: String,
    pub local: Option<String>,
    pub descricao: Option<String>,
}

/// Query parameters of the report view.
#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub status: Option<String>,
}

/// Generic JSON acknowledgement.
#[derive(Debug, Serialize)]
pub struct GenericMessageResponse {
    pub msg: String,
}
