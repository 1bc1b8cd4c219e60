//! Analyzer engine: upload loading, the analysis request, and response interpretation.
mod engine;
mod interpret;
mod submit;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use interpret::{extract_embedded_json, interpret_payload, interpret_result, NO_SUMMARY};
pub use submit::{Analyzer, AnalyzerSettings, ReqwestAnalyzer, DEFAULT_ENDPOINT};
pub use types::{
    AnalysisReport, AnalysisRequest, AnalyzeError, EngineEvent, FailureKind, MalformedResponse,
    SubmissionId, UploadFile,
};
pub use upload::{infer_mime_type, load_upload, UploadError};
