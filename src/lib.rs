pub mod core;
pub mod export;
pub mod math;
pub mod ocr;
pub mod pipeline;
pub mod summary;

pub use crate::core::config::AnalysisConfig;
pub use crate::core::model::{AnalysisResult, MathOutcome, PageType, Sentence, StudyDocument, Summary};
pub use pipeline::{analyze, AnalysisPipeline, PageText};
