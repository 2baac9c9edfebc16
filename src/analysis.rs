use std::sync::Arc;

use tracing::warn;

use crate::models::{
    AnalysisInput, ImageFindings, ImagingModality, ReportPayload, SessionRecord, TextReasoning,
};
use crate::store::{SESSION_COLLECTION, SessionStore};

/// Coerces the `simple_view` form value. Anything outside the accepted set
/// (case-insensitive) is false.
pub fn parse_view_flag(raw: &str) -> bool {
    matches!(raw.to_lowercase().as_str(), "1" | "true" | "yes")
}

fn derive_modality(input: &AnalysisInput) -> ImagingModality {
    match (&input.image_filename, &input.video_filename) {
        (None, None) => ImagingModality::Unknown,
        (_, Some(_)) => ImagingModality::Video,
        (Some(_), None) => ImagingModality::Image,
    }
}

/// The lay summary is included only for the simple view or for the literal
/// role "Patient". The comparison is case-sensitive.
fn include_patient_friendly(input: &AnalysisInput) -> bool {
    input.simple_view || input.role == "Patient"
}

/// Builds the report for one request. The clinical content is simulated: a
/// real deployment would route text and media to inference models here, but
/// the field shape and the two branching rules (modality derivation and
/// patient-friendly inclusion) are the contract.
pub fn build_report(input: &AnalysisInput) -> ReportPayload {
    let text_reasoning = TextReasoning {
        differential: vec![
            "Viral upper respiratory infection".to_string(),
            "Bacterial pneumonia".to_string(),
            "Asthma exacerbation".to_string(),
        ],
        rationale: "Symptoms and vitals suggest possible lower respiratory tract involvement."
            .to_string(),
    };

    let image_findings = ImageFindings {
        imaging_modality: derive_modality(input),
        key_findings: vec![
            "No obvious fracture".to_string(),
            "Possible left lower lobe opacity".to_string(),
        ],
        quality: "adequate".to_string(),
    };

    let patient_friendly = if include_patient_friendly(input) {
        "You likely have a chest infection. We'll check some blood tests and may start \
         antibiotics. We'll keep an eye on your oxygen levels."
            .to_string()
    } else {
        String::new()
    };

    ReportPayload {
        summary: "Acute cough and dyspnea with possible infectious etiology; correlate imaging \
                  and vitals."
            .to_string(),
        text_reasoning,
        image_findings,
        integrated_assessment: "Clinical features combined with imaging suggest \
                                community-acquired pneumonia; consider antibiotics if bacterial \
                                risk high."
            .to_string(),
        next_steps: vec![
            "Order CBC, CMP, and CRP".to_string(),
            "Obtain pulse oximetry monitoring".to_string(),
            "Consider empiric antibiotics per local guidelines".to_string(),
            "Reassess in 24-48 hours".to_string(),
        ],
        patient_friendly,
        confidence: 0.78,
    }
}

/// Produces the report and logs the session as a best-effort side effect.
#[derive(Clone)]
pub struct AnalysisResponder {
    store: Arc<dyn SessionStore>,
}

impl AnalysisResponder {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Total over its input: persistence problems are logged at the boundary
    /// and the report is returned regardless.
    pub async fn analyze(&self, input: AnalysisInput) -> ReportPayload {
        let report = build_report(&input);
        self.persist(input, &report).await;
        report
    }

    async fn persist(&self, input: AnalysisInput, report: &ReportPayload) {
        let output = match serde_json::to_value(report) {
            Ok(value) => value,
            Err(e) => {
                warn!("session log skipped, report not serializable: {e}");
                return;
            }
        };

        match SessionRecord::new(input, output, Some(report.confidence)) {
            Ok(record) => {
                if let Err(e) = self.store.insert(SESSION_COLLECTION, &record).await {
                    warn!("session log write skipped: {e}");
                }
            }
            Err(e) => warn!("session log rejected: {e}"),
        }
    }
}
