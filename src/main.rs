use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use studyscan::core::config::AnalysisConfig;
use studyscan::core::model::{AnalysisResult, PageType, StudyDocument};
use studyscan::core::page_classifier::{
    ClassifierInput, FixedClassifier, PageClassifier, SignalClassifier,
};
use studyscan::export::{render_json, Exporter, JsonExporter, TextExporter};
use studyscan::ocr::{ClassifierBridge, OcrBridge, PlainTextSource, TextRecognizer};
use studyscan::pipeline::{AnalysisPipeline, PageText};

#[derive(Parser, Debug)]
#[command(name = "studyscan")]
#[command(version, about = "Solve arithmetic and summarize prose from recognized pages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a page that was already recognized to a text file
    Analyze {
        /// Recognized text file
        input: PathBuf,

        /// Page type label (Math, Text, ...); inferred from the text when omitted
        #[arg(long)]
        page_type: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Recognize and analyze a page image with external OCR and classifier scripts
    Scan {
        /// Page image
        image: PathBuf,

        /// OCR script printing a JSON array of {text, confidence}
        #[arg(long)]
        ocr_script: PathBuf,

        /// Classifier script printing {"label": ...}; text signals are used when omitted
        #[arg(long)]
        classifier_script: Option<PathBuf>,

        /// OCR language passed to the script
        #[arg(long, default_value = "eng")]
        lang: String,

        /// Drop OCR lines below this confidence
        #[arg(long, default_value_t = 0.0)]
        min_confidence: f32,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Analyze several recognized text files in parallel
    Batch {
        /// Recognized text files, one page each
        inputs: Vec<PathBuf>,

        /// Page type label applied to every page; inferred per page when omitted
        #[arg(long)]
        page_type: Option<String>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Output directory; results go to stdout as JSON when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format(s) to generate
    #[arg(short, long, value_enum, default_values_t = vec![Format::Json, Format::Text])]
    format: Vec<Format>,

    /// Number of sentences kept in a summary
    #[arg(short, long)]
    sentences: Option<usize>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
enum Format {
    Json,
    Text,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studyscan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            page_type,
            common,
        } => analyze_single(input, page_type, common),
        Commands::Scan {
            image,
            ocr_script,
            classifier_script,
            lang,
            min_confidence,
            common,
        } => scan_image(image, ocr_script, classifier_script, lang, min_confidence, common),
        Commands::Batch {
            inputs,
            page_type,
            common,
        } => analyze_batch(inputs, page_type, common),
    }
}

fn load_config(common: &CommonArgs) -> Result<AnalysisConfig> {
    let mut config = match &common.config {
        Some(path) => AnalysisConfig::from_json_file(path)?,
        None => AnalysisConfig::default(),
    };
    if let Some(sentences) = common.sentences {
        config = config.with_sentence_count(sentences);
    }
    config.validate()?;
    Ok(config)
}

fn classifier_for(page_type: Option<&str>) -> Box<dyn PageClassifier> {
    match page_type {
        Some(label) => Box::new(FixedClassifier(PageType::from_label(label))),
        None => Box::new(SignalClassifier::new()),
    }
}

fn ensure_file(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Input file does not exist: {}", path.display());
    }
    if !path.is_file() {
        anyhow::bail!("Input is not a file: {}", path.display());
    }
    Ok(())
}

fn analyze_single(input: PathBuf, page_type: Option<String>, common: CommonArgs) -> Result<()> {
    ensure_file(&input)?;
    let config = load_config(&common)?;
    let pipeline = AnalysisPipeline::new(config);

    let text = PlainTextSource::new().recognize(&input)?;
    let classifier = classifier_for(page_type.as_deref());
    let page_type = classifier.classify(&ClassifierInput::text(&text));

    tracing::info!(input = %input.display(), "analyzing page");
    let result = pipeline.analyze_recognized(Ok(text), page_type);

    let document = StudyDocument {
        pages: vec![result],
    };
    write_document(&document, &common)
}

fn scan_image(
    image: PathBuf,
    ocr_script: PathBuf,
    classifier_script: Option<PathBuf>,
    lang: String,
    min_confidence: f32,
    common: CommonArgs,
) -> Result<()> {
    ensure_file(&image)?;
    let config = load_config(&common)?;
    let pipeline = AnalysisPipeline::new(config);

    let recognizer = OcrBridge::new(ocr_script)
        .with_lang(lang)
        .with_min_confidence(min_confidence);
    let classifier: Box<dyn PageClassifier> = match classifier_script {
        Some(script) => Box::new(ClassifierBridge::new(script)),
        None => Box::new(SignalClassifier::new()),
    };

    tracing::info!(image = %image.display(), "scanning page");
    let result = pipeline.analyze_page(&recognizer, classifier.as_ref(), &image);

    let document = StudyDocument {
        pages: vec![result],
    };
    write_document(&document, &common)
}

fn analyze_batch(
    inputs: Vec<PathBuf>,
    page_type: Option<String>,
    common: CommonArgs,
) -> Result<()> {
    if inputs.is_empty() {
        anyhow::bail!("No input files specified");
    }

    let config = load_config(&common)?;
    let pipeline = AnalysisPipeline::new(config);
    let source = PlainTextSource::new();
    let classifier = classifier_for(page_type.as_deref());

    tracing::info!(pages = inputs.len(), "batch analyzing");

    let mut failed = 0;
    let mut pages = Vec::with_capacity(inputs.len());
    let mut unclassified = Vec::new();
    for (index, input) in inputs.iter().enumerate() {
        match source.recognize(input) {
            Ok(text) => match classifier.classify(&ClassifierInput::text(&text)) {
                Ok(page_type) => pages.push(PageText::new(text, page_type)),
                Err(err) => {
                    tracing::warn!(input = %input.display(), error = %err, "page classification failed");
                    unclassified.push((index, text));
                    pages.push(PageText::new(String::new(), PageType::Unknown));
                }
            },
            Err(err) => {
                tracing::warn!(input = %input.display(), error = %err, "skipping unreadable page");
                pages.push(PageText::new(String::new(), PageType::Unknown));
                failed += 1;
            }
        }
    }

    let mut results = pipeline.analyze_batch(&pages);
    for (index, text) in unclassified {
        results[index] = AnalysisResult::degraded(text);
    }
    write_document(&StudyDocument { pages: results }, &common)?;

    tracing::info!(succeeded = inputs.len() - failed, failed, "batch finished");
    if failed > 0 {
        anyhow::bail!("{} file(s) could not be read", failed);
    }

    Ok(())
}

fn write_document(document: &StudyDocument, common: &CommonArgs) -> Result<()> {
    let Some(output_dir) = &common.output else {
        println!("{}", render_json(document)?);
        return Ok(());
    };

    for format in &common.format {
        let exporter: Box<dyn Exporter> = match format {
            Format::Json => Box::new(JsonExporter::new(output_dir.clone())),
            Format::Text => Box::new(TextExporter::new(output_dir.clone())),
        };
        let path = exporter
            .export(document)
            .with_context(|| format!("Failed to export to: {}", output_dir.display()))?;
        tracing::info!(path = %path.display(), "results saved");
    }

    Ok(())
}
