use crate::error::{Result, TranslateError};
use crate::token::{SeedKey, SigningToken};
use crate::tongue::Tongue;
use tracing::debug;
use url::Url;

/// Repeated `dt` values: which parts of the analysis the service returns.
const DATA_TYPES: [&str; 10] = ["at", "bd", "ex", "ld", "md", "qca", "rw", "rm", "ss", "t"];

/// One text to translate from `source` into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source: Tongue,
    pub target: Tongue,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, source: Tongue, target: Tongue) -> Self {
        Self {
            text: text.into(),
            source,
            target,
        }
    }
}

/// `https://translate.<host>/translate_a/single`
pub fn endpoint_for_host(host: &str) -> String {
    format!("https://translate.{}/translate_a/single", host)
}

/// The full query parameter list, in send order.
pub fn query_params(
    request: &TranslationRequest,
    token: &SigningToken,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("client", "gtx".to_string()),
        ("sl", request.source.to_string()),
        ("tl", request.target.to_string()),
        ("hl", request.target.to_string()),
        ("ie", "UTF-8".to_string()),
        ("oe", "UTF-8".to_string()),
        ("otf", "1".to_string()),
        ("ssel", "0".to_string()),
        ("tsel", "0".to_string()),
        ("kc", "7".to_string()),
        ("q", request.text.clone()),
    ];
    params.extend(DATA_TYPES.iter().map(|dt| ("dt", dt.to_string())));
    params.push(("tk", token.to_string()));
    params
}

/// Sign the request text and attach every parameter to `endpoint`.
pub fn build_url(endpoint: &str, request: &TranslationRequest, seed: &SeedKey) -> Result<Url> {
    let token = seed.sign(&request.text);
    debug!(
        "Signed {} chars ({} -> {}) with tk={}",
        request.text.chars().count(),
        request.source,
        request.target,
        token
    );

    Url::parse_with_params(endpoint, query_params(request, &token)).map_err(|source| {
        TranslateError::ParamBuild {
            endpoint: endpoint.to_string(),
            source,
        }
    })
}
