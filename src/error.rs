use miette::Diagnostic;
use thiserror::Error;

/// Main error type for isopack operations
#[derive(Error, Diagnostic, Debug)]
pub enum PackError {
    #[error("IO error: {0}")]
    #[diagnostic(code(isopack::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(isopack::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(isopack::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unknown tile '{name}'")]
    #[diagnostic(code(isopack::unknown_tile))]
    UnknownTile {
        name: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed map: {message}")]
    #[diagnostic(code(isopack::malformed_map))]
    MalformedMap {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Unclassified tile '{name}' at {col},{row}")]
    #[diagnostic(code(isopack::tile_class))]
    UnknownTileClass {
        name: String,
        col: usize,
        row: usize,
        #[help]
        help: Option<String>,
    },

    #[error("Precondition violated: {message}")]
    #[diagnostic(code(isopack::precondition))]
    Precondition {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Validation error: {message}")]
    #[diagnostic(code(isopack::validate))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PackError>;
