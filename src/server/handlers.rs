//! Request handlers

use crate::error::{AtsAnalyzerError, Result};
use crate::input;
use crate::report;
use crate::scoring::engine::AnalysisSettings;
use crate::server::AppState;
use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "stored_analyses": state.store.len(),
    }))
}

/// Exposes the default category weights so clients can prefill a weight
/// editor before submitting overrides.
pub async fn default_weights(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "weights": state.config.scoring.weights,
    }))
}

struct AnalyzeRequest {
    jd_text: Option<String>,
    resume_text: Option<String>,
    resume_file: Option<(String, Vec<u8>)>,
    settings: AnalysisSettings,
}

impl AnalyzeRequest {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut request = Self {
            jd_text: None,
            resume_text: None,
            resume_file: None,
            settings: AnalysisSettings::default(),
        };

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AtsAnalyzerError::Input(format!("Malformed multipart body: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "jd_text" => request.jd_text = Some(Self::text(field, &name).await?),
                "resume_text" => request.resume_text = Some(Self::text(field, &name).await?),
                "resume_file" => {
                    let filename = field
                        .file_name()
                        .ok_or_else(|| {
                            AtsAnalyzerError::Input("resume_file has no filename".to_string())
                        })?
                        .to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AtsAnalyzerError::Input(format!("Failed to read resume_file: {}", e))
                    })?;
                    request.resume_file = Some((filename, bytes.to_vec()));
                }
                "settings" => {
                    let raw = Self::text(field, &name).await?;
                    // Bad settings degrade to defaults rather than failing
                    // the whole analysis.
                    request.settings = serde_json::from_str(&raw).unwrap_or_else(|e| {
                        tracing::warn!(error = %e, "ignoring malformed settings field");
                        AnalysisSettings::default()
                    });
                }
                other => {
                    tracing::debug!(field = other, "ignoring unknown multipart field");
                }
            }
        }
        Ok(request)
    }

    async fn text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String> {
        field
            .text()
            .await
            .map_err(|e| AtsAnalyzerError::Input(format!("Failed to read field {}: {}", name, e)))
    }

    fn resume_text(&self) -> Result<String> {
        if let Some(text) = &self.resume_text {
            return Ok(text.clone());
        }
        if let Some((filename, bytes)) = &self.resume_file {
            return input::extract_text(filename, bytes);
        }
        Err(AtsAnalyzerError::Input(
            "Provide either resume_text or resume_file".to_string(),
        ))
    }
}

pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let request = AnalyzeRequest::from_multipart(multipart).await?;
    let jd_text = request
        .jd_text
        .clone()
        .ok_or_else(|| AtsAnalyzerError::Input("jd_text field is required".to_string()))?;
    let resume_text = request.resume_text()?;

    let result = state
        .engine
        .analyze(&resume_text, &jd_text, request.settings)?;
    // Respond from the record put() hands back; a lookup here could
    // already miss if capacity eviction raced the insert.
    let record = state.store.put(result);
    tracing::info!(id = %record.id, score = record.result.overall_score, "analysis stored");

    Ok(Json(json!({
        "analysis_id": record.id,
        "created_at": record.created_at,
        "result": record.result,
    })))
}

pub async fn report_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.store.get(&id)?;
    let body = report::render_json(&record)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body))
}

pub async fn report_markdown(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.store.get(&id)?;
    let markdown = report::markdown::render(&record);
    Ok(Json(json!({ "analysis_id": record.id, "markdown": markdown })))
}

pub async fn report_pdf(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let record = state.store.get(&id)?;
    let body = report::pdf::render(&record)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"ats-report-{}.pdf\"", record.id),
            ),
        ],
        body,
    ))
}
