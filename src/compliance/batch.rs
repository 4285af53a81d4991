//! The compliance batch: validate, read the contract, load regulations,
//! then analyze each regulation in turn.

use serde::Serialize;
use tokio::sync::watch;

use crate::compliance::{load_regulations, AnalysisResult, Analyzer, Session};
use crate::error::{DocError, Result};
use crate::ingest::{extract_with, ParagraphFilter};
use crate::models::document::{has_suffix, CONTRACT_SUFFIXES};
use crate::models::Document;

/// Files supplied for one batch.
#[derive(Debug, Clone, Default)]
pub struct BatchRequest {
    pub contract: Option<Document>,
    pub regulations: Vec<Document>,
}

/// A regulation whose analysis failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub filename: String,
    pub error: String,
}

/// What a batch produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub results: Vec<AnalysisResult>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<Failure>,
    /// Regulation files ignored because of their suffix.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<String>,
    /// Regulation files that could not be read.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub cancelled: bool,
}

/// Check that everything needed is present before touching any file.
pub fn validate(request: &BatchRequest, session: &Session) -> Result<()> {
    if request.regulations.is_empty() {
        return Err(DocError::Validation(
            "upload at least one regulation file first".into(),
        ));
    }
    let Some(contract) = &request.contract else {
        return Err(DocError::Validation("upload a contract file first".into()));
    };
    if !has_suffix(&contract.name, CONTRACT_SUFFIXES) {
        return Err(DocError::Validation(format!(
            "contract must be a .docx file: {}",
            contract.name
        )));
    }
    if !session.has_api_key() {
        return Err(DocError::Validation("enter an API key first".into()));
    }
    Ok(())
}

/// Contract text: every paragraph that has any text, newline-joined.
pub fn read_contract(contract: &Document) -> Result<String> {
    extract_with(contract, ParagraphFilter::NonEmpty)
}

/// Run a full batch against `analyzer`.
///
/// Fails before any processing on validation errors, when the contract
/// cannot be read, or when no regulation loads. Once analysis starts, a
/// failed regulation is recorded and the loop moves on. Setting `cancel`
/// to `true` stops the batch, keeping the results gathered so far.
pub async fn run_batch<A: Analyzer + ?Sized>(
    session: &mut Session,
    analyzer: &A,
    request: &BatchRequest,
    mut cancel: watch::Receiver<bool>,
) -> Result<BatchReport> {
    validate(request, session)?;
    let contract = request
        .contract
        .as_ref()
        .ok_or_else(|| DocError::Validation("upload a contract file first".into()))?;

    let contract_text = read_contract(contract)?;
    let loaded = load_regulations(&request.regulations);
    if loaded.regulations.is_empty() {
        return Err(DocError::NoRegulations);
    }

    session.begin_batch();
    let mut report = BatchReport {
        skipped: loaded.skipped,
        warnings: loaded.warnings,
        ..BatchReport::default()
    };

    let total = loaded.regulations.len();
    for (idx, regulation) in loaded.regulations.iter().enumerate() {
        if *cancel.borrow() {
            report.cancelled = true;
            break;
        }
        tracing::info!(
            regulation = %regulation.filename,
            "analyzing regulation {}/{total}",
            idx + 1
        );

        let outcome = tokio::select! {
            outcome = analyzer.analyze(&contract_text, regulation) => outcome,
            () = cancelled(&mut cancel) => {
                report.cancelled = true;
                break;
            }
        };

        match outcome {
            Ok(content) => session.record(AnalysisResult {
                filename: regulation.filename.clone(),
                content,
            }),
            Err(e) => {
                tracing::error!(regulation = %regulation.filename, error = %e, "analysis failed");
                report.failures.push(Failure {
                    filename: regulation.filename.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    report.results = session.results().to_vec();
    if report.cancelled {
        tracing::warn!(completed = report.results.len(), total, "analysis cancelled");
    } else {
        tracing::info!(
            analyzed = report.results.len(),
            failed = report.failures.len(),
            "analysis complete"
        );
    }
    Ok(report)
}

/// Resolves once the flag is set. Never resolves if the sender is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
