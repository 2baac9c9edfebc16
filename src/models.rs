use serde::{Deserialize, Serialize};

/// Which kind of media accompanied the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImagingModality {
    Unknown,
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextReasoning {
    pub differential: Vec<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFindings {
    pub imaging_modality: ImagingModality,
    pub key_findings: Vec<String>,
    pub quality: String,
}

/// The full clinical report returned by `/analyze`. Transient: built once,
/// returned to the caller, and copied unchanged into the session log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub summary: String,
    pub text_reasoning: TextReasoning,
    pub image_findings: ImageFindings,
    pub integrated_assessment: String,
    pub next_steps: Vec<String>,
    pub patient_friendly: String,
    pub confidence: f64,
}

/// Normalized `/analyze` form fields. Uploaded media keeps only its filename.
#[derive(Debug, Clone, Default)]
pub struct AnalysisInput {
    pub role: String,
    pub simple_view: bool,
    pub symptoms: Option<String>,
    pub vitals: Option<String>,
    pub history: Option<String>,
    pub image_filename: Option<String>,
    pub video_filename: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("confidence {0} is outside [0.0, 1.0]")]
    ConfidenceOutOfRange(f64),
}

/// One persisted clinical interaction. Collection name: `rafaelsession`.
/// Insert-only; the store assigns the document id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub role: String,
    pub simple_view: bool,
    pub symptoms: Option<String>,
    pub vitals: Option<String>,
    pub history: Option<String>,
    pub image_filename: Option<String>,
    pub video_filename: Option<String>,
    pub output: serde_json::Value,
    pub confidence: Option<f64>,
}

impl SessionRecord {
    /// Validates the confidence bound at construction, so out-of-range
    /// records can never reach the store.
    pub fn new(
        input: AnalysisInput,
        output: serde_json::Value,
        confidence: Option<f64>,
    ) -> Result<Self, RecordError> {
        if let Some(c) = confidence {
            if !(0.0..=1.0).contains(&c) {
                return Err(RecordError::ConfidenceOutOfRange(c));
            }
        }

        Ok(Self {
            role: input.role,
            simple_view: input.simple_view,
            symptoms: input.symptoms,
            vitals: input.vitals,
            history: input.history,
            image_filename: input.image_filename,
            video_filename: input.video_filename,
            output,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> AnalysisInput {
        AnalysisInput {
            role: "Clinician".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn confidence_above_one_is_rejected() {
        let result = SessionRecord::new(input(), json!({}), Some(1.5));
        assert!(matches!(
            result,
            Err(RecordError::ConfidenceOutOfRange(c)) if c == 1.5
        ));
    }

    #[test]
    fn confidence_bounds_are_inclusive() {
        assert!(SessionRecord::new(input(), json!({}), Some(0.0)).is_ok());
        assert!(SessionRecord::new(input(), json!({}), Some(1.0)).is_ok());
    }

    #[test]
    fn absent_confidence_is_accepted() {
        let record = SessionRecord::new(input(), json!({}), None).unwrap();
        assert_eq!(record.confidence, None);
        assert_eq!(record.role, "Clinician");
    }

    #[test]
    fn negative_confidence_is_rejected() {
        assert!(SessionRecord::new(input(), json!({}), Some(-0.1)).is_err());
    }

    #[test]
    fn modality_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(ImagingModality::Unknown).unwrap(),
            json!("unknown")
        );
        assert_eq!(
            serde_json::to_value(ImagingModality::Video).unwrap(),
            json!("video")
        );
    }
}
