//! Error types and handling for `Tempo98`

use thiserror::Error;

/// Main error type for the `Tempo98` application
///
/// The search flow maps every failure to exactly one of these categories,
/// in detection order: validation (before any I/O), auth, not-found, then
/// transport for everything else.
#[derive(Error, Debug)]
pub enum TempoError {
    /// Input validation errors, detected before any network call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The weather provider rejected the API credential (HTTP 401)
    #[error("API credential rejected by the weather provider")]
    Auth,

    /// The weather provider has no match for the requested city (HTTP 404)
    #[error("Location not found")]
    NotFound,

    /// Any other HTTP status, or no HTTP response at all
    #[error("Request failed (status: {status:?})")]
    Transport {
        status: Option<u16>,
        reason: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl TempoError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error carrying the HTTP status that was received
    pub fn status<S: Into<String>>(status: u16, reason: S) -> Self {
        Self::Transport {
            status: Some(status),
            reason: reason.into(),
        }
    }

    /// Create a transport error for the no-response case (DNS, connect,
    /// timeout, unparseable body)
    pub fn network<S: Into<String>>(reason: S) -> Self {
        Self::Transport {
            status: None,
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the user-facing message (pt-BR) for this error
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TempoError::Validation { message } => message.clone(),
            TempoError::Auth => {
                "Erro 401: Chave de API inválida. Verifique sua chave OpenWeatherMap.".to_string()
            }
            TempoError::NotFound => {
                "Cidade não encontrada. Verifique o nome e tente novamente.".to_string()
            }
            TempoError::Transport {
                status: Some(code),
                reason,
            } => {
                format!("Erro ao buscar dados: {code} - {reason}.")
            }
            TempoError::Transport { status: None, .. } => {
                "Ocorreu um erro de rede ou desconhecido. Tente novamente mais tarde.".to_string()
            }
            TempoError::Config { .. } => {
                "Erro de configuração. Verifique seu arquivo de configuração e a chave de API."
                    .to_string()
            }
            TempoError::Io { .. } => {
                "Falha em operação de arquivo. Verifique as permissões.".to_string()
            }
        }
    }
}
