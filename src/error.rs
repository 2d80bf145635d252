/// Error surface of the extraction pipeline.
///
/// Every failure mode maps to one of these variants; each carries a
/// human-readable message and a stable process exit code:
///
/// - `Validation` / `UpstreamRead` → 2 (bad input/config or I/O)
/// - `MalformedDate` / `MalformedValue` → 3 (unusable data)
#[derive(Clone)]
pub enum ExtractError {
    /// Empty input, unknown risk-level key, or missing required column.
    Validation(String),
    /// A row's date field could not be parsed. Dates order every later
    /// stage, so this aborts the whole extraction.
    MalformedDate { line: usize, message: String },
    /// A retained month ended up with no usable selected-column value.
    MalformedValue(String),
    /// Failure surfaced by the row source (file open, CSV tokenization).
    /// Propagated unchanged; the core never retries.
    UpstreamRead(String),
}

impl ExtractError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::Validation(_) | ExtractError::UpstreamRead(_) => 2,
            ExtractError::MalformedDate { .. } | ExtractError::MalformedValue(_) => 3,
        }
    }
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Validation(msg) => write!(f, "{msg}"),
            ExtractError::MalformedDate { line, message } => write!(f, "line {line}: {message}"),
            ExtractError::MalformedValue(msg) => write!(f, "{msg}"),
            ExtractError::UpstreamRead(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::fmt::Debug for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::Validation(msg) => f.debug_tuple("Validation").field(msg).finish(),
            ExtractError::MalformedDate { line, message } => f
                .debug_struct("MalformedDate")
                .field("line", line)
                .field("message", message)
                .finish(),
            ExtractError::MalformedValue(msg) => f.debug_tuple("MalformedValue").field(msg).finish(),
            ExtractError::UpstreamRead(msg) => f.debug_tuple("UpstreamRead").field(msg).finish(),
        }
    }
}

impl std::error::Error for ExtractError {}
