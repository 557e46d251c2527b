// Copyright (c) 2025 GastoCheck.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Client for the generative-language endpoint. Every failure mode collapses
//! into `Unavailable`; callers fall back to the offline heuristic and the
//! user never sees a network error from this path.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::utils::http_client;

const ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Reply from a raw generate-content call.
#[derive(Debug, Clone)]
pub enum AiReply {
    Text(String),
    Unavailable,
}

/// Structured interpretation of one utterance. Unlike the offline heuristic,
/// this path can flag transfers via `cuenta_origen`/`cuenta_destino`.
#[derive(Debug, Clone)]
pub enum AiInterpretation {
    Parsed(AiEntry),
    Unavailable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiEntry {
    pub tipo: String,
    pub monto: f64,
    pub categoria: Option<String>,
    pub descripcion: Option<String>,
    pub cuenta_origen: Option<String>,
    pub cuenta_destino: Option<String>,
}

impl AiEntry {
    pub fn amount(&self) -> Option<Decimal> {
        Decimal::try_from(self.monto).ok().filter(|d| *d > Decimal::ZERO)
    }

    pub fn is_transfer(&self) -> bool {
        self.tipo.eq_ignore_ascii_case("transferencia")
            && self.cuenta_origen.is_some()
            && self.cuenta_destino.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
}

/// Single generate-content call. No retries; library default plus the
/// client's 15s timeout is the only patience we have.
pub fn generate(prompt: &str) -> AiReply {
    let Some(key) = api_key() else {
        return AiReply::Unavailable;
    };
    let Ok(client) = http_client() else {
        return AiReply::Unavailable;
    };
    let body = json!({ "contents": [ { "parts": [ { "text": prompt } ] } ] });
    let url = format!("{}?key={}", ENDPOINT, key);
    let resp = match client.post(url).json(&body).send() {
        Ok(r) => r,
        Err(_) => return AiReply::Unavailable,
    };
    let resp = match resp.error_for_status() {
        Ok(r) => r,
        Err(_) => return AiReply::Unavailable,
    };
    let parsed: GenerateResponse = match resp.json() {
        Ok(p) => p,
        Err(_) => return AiReply::Unavailable,
    };
    let text = parsed
        .candidates
        .and_then(|mut c| if c.is_empty() { None } else { c.remove(0).content })
        .and_then(|c| c.parts)
        .and_then(|mut p| if p.is_empty() { None } else { p.remove(0).text });
    match text {
        Some(t) => AiReply::Text(t),
        None => AiReply::Unavailable,
    }
}

/// Models like to wrap JSON answers in ```json fences; peel them off before
/// parsing.
pub fn strip_code_fences(text: &str) -> &str {
    let t = text.trim();
    let t = t
        .strip_prefix("```json")
        .or_else(|| t.strip_prefix("```"))
        .unwrap_or(t);
    let t = t.strip_suffix("```").unwrap_or(t);
    t.trim()
}

fn interpretation_prompt(utterance: &str, account_names: &[String]) -> String {
    format!(
        "Interpreta la siguiente frase de finanzas personales y responde \
         ÚNICAMENTE con un objeto JSON en una sola línea con los campos \
         {{\"tipo\", \"monto\", \"categoria\", \"descripcion\", \
         \"cuenta_origen\", \"cuenta_destino\"}}. \
         tipo es uno de: gasto, ingreso, meta, transferencia. \
         monto es un número. Las cuentas del usuario son: [{}]. \
         Si la frase no es una transferencia, cuenta_origen y cuenta_destino \
         deben ser null. Frase: \"{}\"",
        account_names.join(", "),
        utterance
    )
}

/// Sends the utterance to the model and parses the strict single-object JSON
/// it is instructed to return.
pub fn interpret_remote(utterance: &str, account_names: &[String]) -> AiInterpretation {
    let reply = generate(&interpretation_prompt(utterance, account_names));
    let AiReply::Text(raw) = reply else {
        return AiInterpretation::Unavailable;
    };
    match serde_json::from_str::<AiEntry>(strip_code_fences(&raw)) {
        Ok(entry) => AiInterpretation::Parsed(entry),
        Err(_) => AiInterpretation::Unavailable,
    }
}
