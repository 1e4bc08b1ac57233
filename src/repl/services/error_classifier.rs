//! # Error Classifier
//!
//! Static mapping from a [`LookupError`] to the message shown to the student.

use crate::repl::services::lookup_error::LookupError;

/// Diagnostic prefix the hours API leaks into its error messages
pub const INTERNAL_ERROR_PREFIX: &str = "Exception: ";

const TIMEOUT_MESSAGE: &str = "A requisição excedeu o tempo limite. Tente novamente.";
const OFFLINE_MESSAGE: &str = "Sem conexão com a internet. Verifique sua conexão.";
const NETWORK_MESSAGE: &str = "Erro de rede. Tente novamente em alguns instantes.";
const NOT_FOUND_MESSAGE: &str = "Matrícula não encontrada no sistema.";
const SERVER_ERROR_MESSAGE: &str = "Erro no servidor. Tente novamente mais tarde.";
const UNAVAILABLE_MESSAGE: &str =
    "Serviço temporariamente indisponível. Aguarde alguns minutos.";
const UNKNOWN_MESSAGE: &str = "Erro desconhecido. Tente novamente.";

/// User-facing message for a failure; `None` means stay silent
pub fn classify(error: &LookupError) -> Option<String> {
    let message = match error {
        LookupError::Cancelled => return None,
        LookupError::Validation(validation) => validation.to_string(),
        LookupError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
        LookupError::Offline { .. } => OFFLINE_MESSAGE.to_string(),
        LookupError::Network { .. } => NETWORK_MESSAGE.to_string(),
        LookupError::Http { status: 404, .. } => NOT_FOUND_MESSAGE.to_string(),
        LookupError::Http { status: 500, .. } => SERVER_ERROR_MESSAGE.to_string(),
        LookupError::Http { status: 503, .. } => UNAVAILABLE_MESSAGE.to_string(),
        LookupError::Http { status, reason } if reason.is_empty() => {
            format!("Falha na requisição (HTTP {status}). Tente novamente.")
        }
        LookupError::Http { status, reason } => {
            format!("Falha na requisição (HTTP {status}: {reason}). Tente novamente.")
        }
        LookupError::Api { message } => strip_internal_prefix(message),
        LookupError::Decode { detail } => strip_internal_prefix(detail),
    };

    if message.trim().is_empty() {
        Some(UNKNOWN_MESSAGE.to_string())
    } else {
        Some(message)
    }
}

/// Remove the first occurrence of the internal diagnostic prefix
pub fn strip_internal_prefix(message: &str) -> String {
    message.replacen(INTERNAL_ERROR_PREFIX, "", 1)
}
