use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while loading or saving an opening book.
#[derive(Debug, thiserror::Error)]
pub enum BookError {
    #[error("failed to read opening book {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse opening book {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "opening book is for a {width}x{height} board, expected {expected_width}x{expected_height}"
    )]
    Dimensions {
        width: usize,
        height: usize,
        expected_width: usize,
        expected_height: usize,
    },

    #[error("opening book entry '{key}' has {len} scores, expected {expected}")]
    EntryLength {
        key: String,
        len: usize,
        expected: usize,
    },

    #[error("opening book key '{0}' is not a legal move sequence")]
    InvalidKey(String),

    #[error("opening book entry '{key}' marks playable column {column} as invalid")]
    PlayableColumnMarked { key: String, column: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons the move selector could not produce a column.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("evaluator returned no scores")]
    EmptyEvaluation,

    #[error("evaluator returned {actual} scores for {expected} columns")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("evaluator marked every column as unplayable")]
    NoLegalColumn,
}

/// Fatal evaluator contract violations that end a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionFault {
    #[error("move selection failed: {0}")]
    Selection(#[from] SelectionError),

    #[error("evaluator chose column {column}, which cannot be played")]
    IllegalChoice { column: usize },
}
