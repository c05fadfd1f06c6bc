use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("unknown sentiment method \"{0}\" (expected vader, textblob or finbert)")]
    UnknownMethod(String),

    #[error("neural sentiment model is not configured; set NEWSPULSE_TEI_URL")]
    ModelUnavailable,

    #[error("model inference error: {0}")]
    Model(String),

    #[error("classification worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
