use crate::dfa::dfa::DFA;
use crate::error_handling::Error::{EmptyInput, JsonSerializationError, YamlParsingError};
use crate::error_handling::{Error, Result};
use crate::nfa::nfa::NFA;
use crate::parser::{normalize, BatchConfig, OutputFormat};
use crate::record::{AutomatonRecord, NfaRecord};
use indexmap::IndexMap;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    pub postfix: String,
    pub nfa: NfaRecord,
    pub dfa: AutomatonRecord,
    pub minimized_dfa: AutomatonRecord,
    pub alphabet: Vec<String>,
}

/// Runs the whole pipeline on one expression: postfix normalization, Thompson construction,
/// subset construction and minimization. The first failing stage aborts the conversion.
pub fn convert(regex: &str) -> Result<ConversionResult> {
    let postfix = normalize(regex)?;
    let nfa = NFA::from_postfix(&postfix)?;
    let dfa = DFA::from_nfa(&nfa)?;
    let minimized = dfa.minimize()?;

    let alphabet: Vec<String> = dfa.get_alphabet().iter().map(|c| c.to_string()).collect();
    debug!(
        "Converted {:?}: {} NFA states, {} DFA states, {} minimized states",
        regex,
        nfa.num_states(),
        dfa.num_states(),
        minimized.get_dfa().num_states()
    );

    Ok(ConversionResult {
        postfix,
        nfa: NfaRecord::from_nfa(&nfa),
        dfa: AutomatonRecord::from_dfa(&dfa),
        minimized_dfa: AutomatonRecord::from_dfa(minimized.get_dfa()),
        alphabet,
    })
}

/// Entry point for raw request input: surrounding whitespace is dropped and blank input is
/// rejected before the pipeline runs.
pub fn convert_request(raw: &str) -> Result<ConversionResult> {
    let regex = raw.trim();
    if regex.is_empty() {
        return Err(EmptyInput);
    }
    convert(regex)
}

/// Reply envelope: `{"success": true, ...result}` or `{"success": false, "error": message}`.
#[derive(Debug, Serialize)]
pub struct Response {
    success: bool,
    #[serde(flatten)]
    result: Option<ConversionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip)]
    status_code: u16,
}

impl Response {
    pub fn handle(raw: &str) -> Response {
        Self::from_result(convert_request(raw))
    }

    pub fn from_result(result: Result<ConversionResult>) -> Response {
        match result {
            Ok(result) => Response {
                success: true,
                result: Some(result),
                error: None,
                status_code: 200,
            },
            Err(e) => {
                let status_code = Self::status_code_of(&e);
                if e.is_internal() {
                    error!("Conversion hit an internal defect: {}", e);
                } else {
                    warn!("Conversion rejected: {}", e);
                }
                Response {
                    success: false,
                    result: None,
                    error: Some(e.to_string()),
                    status_code,
                }
            }
        }
    }

    fn status_code_of(e: &Error) -> u16 {
        if e.is_user_error() {
            400
        } else {
            500
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn get_result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn get_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

pub fn render<T: Serialize>(value: &T, format: OutputFormat, pretty: bool) -> Result<String> {
    match (format, pretty) {
        (OutputFormat::Json, true) => {
            serde_json::to_string_pretty(value).map_err(JsonSerializationError)
        }
        (OutputFormat::Json, false) => serde_json::to_string(value).map_err(JsonSerializationError),
        (OutputFormat::Yaml, _) => serde_yaml::to_string(value).map_err(YamlParsingError),
    }
}

/// Converts every expression of the batch, keyed by name in file order. A failing expression
/// produces a failure envelope and does not stop the others.
pub fn convert_batch(config: &BatchConfig) -> IndexMap<String, Response> {
    config
        .get_expressions()
        .iter()
        .map(|expr| (expr.get_name().to_string(), Response::handle(expr.get_regex())))
        .collect()
}
