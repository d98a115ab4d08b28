use std::io;
use std::path::PathBuf;

/// Errors from serializing a graph.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// No writer is registered for the requested format tag.
    #[error("no writer registered for format '{0}'")]
    UnknownFormat(String),

    /// The target path has no extension to select a writer with.
    #[error("cannot infer output format from {}", .0.display())]
    MissingExtension(PathBuf),

    /// The underlying sink failed.
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
}
