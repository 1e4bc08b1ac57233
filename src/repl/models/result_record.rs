//! # Result Record Model
//!
//! The decoded, display-ready outcome of a successful lookup, plus decoding
//! of the two response body shapes the hours API has produced:
//!
//! - flat (canonical): `{ totalGeral, status, categorias: [{ nome, horas }], error?, message? }`
//! - envelope (legacy): `{ sucesso, erro?, dados: { nome, matricula, totalHoras, ..., categorias } }`
//!
//! Numbers are coerced leniently: absent, negative or non-numeric values
//! become `0`. No cross-check between the total and the category sum is made.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Status label used when the API does not provide one
pub const UNKNOWN_STATUS: &str = "Desconhecido";

/// Category name used when an entry has none
pub const DEFAULT_CATEGORY_NAME: &str = "Categoria";

/// Message used when the API flags an error without explaining it
pub const DEFAULT_API_ERROR: &str = "Erro retornado pela API.";

/// One category of accumulated hours
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub hours: f64,
}

impl Category {
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }
}

/// Outcome of one lookup
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRecord {
    pub total_hours: f64,
    pub status: String,
    /// Student name, only present in envelope-shaped responses
    pub student_name: Option<String>,
    pub categories: Vec<Category>,
}

impl Default for ResultRecord {
    fn default() -> Self {
        Self {
            total_hours: 0.0,
            status: UNKNOWN_STATUS.to_string(),
            student_name: None,
            categories: Vec::new(),
        }
    }
}

/// Why a response body could not become a [`ResultRecord`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    /// The body decoded fine but the API marked it as an error
    #[error("{message}")]
    Rejected { message: String },
    /// The body is not a JSON document of a known shape
    #[error("{detail}")]
    Malformed { detail: String },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiPayload {
    Envelope(EnvelopePayload),
    Flat(FlatPayload),
}

#[derive(Debug, Deserialize)]
struct EnvelopePayload {
    sucesso: bool,
    #[serde(default)]
    erro: Value,
    #[serde(default)]
    dados: Value,
}

#[derive(Debug, Deserialize)]
struct FlatPayload {
    #[serde(rename = "totalGeral", default)]
    total_geral: Value,
    #[serde(default)]
    status: Value,
    #[serde(default)]
    categorias: Value,
    #[serde(default)]
    error: Value,
    #[serde(default)]
    message: Value,
}

impl ResultRecord {
    /// Decode a raw response body
    pub fn from_response_body(body: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(body).map_err(|e| PayloadError::Malformed {
            detail: format!("Resposta inválida da API: {e}"),
        })?;
        Self::from_json(value)
    }

    /// Decode an already parsed JSON document
    pub fn from_json(value: Value) -> Result<Self, PayloadError> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => {
                let payload: ApiPayload =
                    serde_json::from_value(value).map_err(|e| PayloadError::Malformed {
                        detail: format!("Resposta inválida da API: {e}"),
                    })?;
                match payload {
                    ApiPayload::Envelope(envelope) => Self::from_envelope(envelope),
                    ApiPayload::Flat(flat) => Self::from_flat(flat),
                }
            }
            other => Err(PayloadError::Malformed {
                detail: format!("Resposta inválida da API: objeto esperado, recebido {other}"),
            }),
        }
    }

    fn from_flat(flat: FlatPayload) -> Result<Self, PayloadError> {
        if is_truthy(&flat.error) {
            return Err(PayloadError::Rejected {
                message: coerce_text(&flat.message).unwrap_or_else(|| DEFAULT_API_ERROR.into()),
            });
        }

        Ok(Self {
            total_hours: coerce_hours(&flat.total_geral),
            status: coerce_text(&flat.status).unwrap_or_else(|| UNKNOWN_STATUS.into()),
            student_name: None,
            categories: coerce_categories(&flat.categorias),
        })
    }

    fn from_envelope(envelope: EnvelopePayload) -> Result<Self, PayloadError> {
        if !envelope.sucesso {
            return Err(PayloadError::Rejected {
                message: coerce_text(&envelope.erro).unwrap_or_else(|| DEFAULT_API_ERROR.into()),
            });
        }

        let data = &envelope.dados;
        Ok(Self {
            total_hours: coerce_hours(&data["totalHoras"]),
            status: coerce_text(&data["status"]).unwrap_or_else(|| UNKNOWN_STATUS.into()),
            student_name: coerce_text(&data["nome"]),
            categories: coerce_categories(&data["categorias"]),
        })
    }
}

fn coerce_categories(value: &Value) -> Vec<Category> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| Category {
                name: coerce_text(&item["nome"]).unwrap_or_else(|| DEFAULT_CATEGORY_NAME.into()),
                hours: coerce_hours(&item["horas"]),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Coerce an hours value; anything absent, non-finite or negative is `0`
pub fn coerce_hours(value: &Value) -> f64 {
    let hours = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim().is_empty() => Some(0.0),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(true) => Some(1.0),
        _ => None,
    };
    hours.filter(|h| h.is_finite() && *h >= 0.0).unwrap_or(0.0)
}

fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Format an hours value the way it is shown to students (`56`, `12.5`)
pub fn format_hours(hours: f64) -> String {
    format!("{hours}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn flat_payload_should_decode_all_fields() {
        let body = r#"{"totalGeral": 56, "status": "Regular",
            "categorias": [{"nome": "Extensão", "horas": 40}, {"nome": "Monitoria", "horas": 16}]}"#;
        let record = ResultRecord::from_response_body(body).unwrap();

        assert_eq!(record.total_hours, 56.0);
        assert_eq!(record.status, "Regular");
        assert_eq!(
            record.categories,
            vec![Category::new("Extensão", 40.0), Category::new("Monitoria", 16.0)]
        );
    }

    #[test]
    fn missing_fields_should_use_defaults() {
        let record = ResultRecord::from_json(json!({})).unwrap();
        assert_eq!(record, ResultRecord::default());
        assert_eq!(record.status, UNKNOWN_STATUS);
    }

    #[test]
    fn null_body_should_yield_default_record() {
        let record = ResultRecord::from_response_body("null").unwrap();
        assert_eq!(record, ResultRecord::default());
    }

    #[test]
    fn invalid_numbers_should_coerce_to_zero() {
        let record = ResultRecord::from_json(json!({
            "totalGeral": "abc",
            "categorias": [
                {"nome": "A", "horas": null},
                {"nome": "B", "horas": -3},
                {"nome": "C", "horas": "12.5"},
                {"horas": 4}
            ]
        }))
        .unwrap();

        assert_eq!(record.total_hours, 0.0);
        let hours: Vec<f64> = record.categories.iter().map(|c| c.hours).collect();
        assert_eq!(hours, vec![0.0, 0.0, 12.5, 4.0]);
        assert_eq!(record.categories[3].name, DEFAULT_CATEGORY_NAME);
    }

    #[test]
    fn total_and_categories_should_not_be_cross_checked() {
        let record = ResultRecord::from_json(json!({
            "totalGeral": 10,
            "categorias": [{"nome": "A", "horas": 99}]
        }))
        .unwrap();
        assert_eq!(record.total_hours, 10.0);
        assert_eq!(record.categories[0].hours, 99.0);
    }

    #[test]
    fn error_flag_should_reject_with_api_message() {
        let result = ResultRecord::from_json(json!({
            "error": true,
            "message": "Exception: Matrícula não encontrada"
        }));
        assert_eq!(
            result,
            Err(PayloadError::Rejected {
                message: "Exception: Matrícula não encontrada".to_string()
            })
        );
    }

    #[test]
    fn error_flag_without_message_should_use_default() {
        let result = ResultRecord::from_json(json!({"error": true}));
        assert_eq!(
            result,
            Err(PayloadError::Rejected {
                message: DEFAULT_API_ERROR.to_string()
            })
        );
    }

    #[test]
    fn false_error_flag_should_not_reject() {
        let record = ResultRecord::from_json(json!({"error": false, "totalGeral": 3})).unwrap();
        assert_eq!(record.total_hours, 3.0);
    }

    #[test]
    fn envelope_payload_should_normalize_into_record() {
        let record = ResultRecord::from_json(json!({
            "sucesso": true,
            "dados": {
                "nome": "Ana",
                "matricula": "20230012",
                "totalHoras": 140,
                "metaHoras": 140,
                "horasFaltantes": 0,
                "percentualConcluido": 100,
                "metaAtingida": true,
                "categorias": [{"nome": "Pesquisa", "horas": 140}]
            }
        }))
        .unwrap();

        assert_eq!(record.total_hours, 140.0);
        assert_eq!(record.student_name.as_deref(), Some("Ana"));
        assert_eq!(record.status, UNKNOWN_STATUS);
        assert_eq!(record.categories, vec![Category::new("Pesquisa", 140.0)]);
    }

    #[test]
    fn failed_envelope_should_reject_with_erro() {
        let result = ResultRecord::from_json(json!({"sucesso": false, "erro": "Aluno não encontrado"}));
        assert_eq!(
            result,
            Err(PayloadError::Rejected {
                message: "Aluno não encontrado".to_string()
            })
        );
    }

    #[test]
    fn malformed_body_should_fail() {
        assert!(matches!(
            ResultRecord::from_response_body("<html>"),
            Err(PayloadError::Malformed { .. })
        ));
        assert!(matches!(
            ResultRecord::from_response_body("[1, 2]"),
            Err(PayloadError::Malformed { .. })
        ));
    }

    #[test]
    fn format_hours_should_drop_integral_fraction() {
        assert_eq!(format_hours(56.0), "56");
        assert_eq!(format_hours(12.5), "12.5");
        assert_eq!(format_hours(0.0), "0");
    }
}
