use strum::EnumIs;
use thiserror::Error;
use z3_sys::ErrorCode;

#[derive(Debug, Error, EnumIs)]
pub enum Z3Error {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration file '{file}': {source}")]
    ConfigParseError {
        source: toml::de::Error,
        file: String,
    },

    /// The option could not be forwarded, or the engine refused it.
    #[error("Invalid configuration option '{option}': {message}")]
    InvalidConfig { option: String, message: String },

    /// The engine returned a null handle or ran out of memory.
    #[error("The native engine could not allocate {what}")]
    OutOfResources { what: &'static str },

    /// Error raised by the engine through its own error channel.
    #[error("The native engine reported {code:?}: {message}")]
    Native { code: ErrorCode, message: String },

    #[error("Name `{name}` cannot be passed to the native engine: it contains a NUL byte")]
    InvalidName { name: String },

    #[error(
        "Declaration `{decl}` expects {expected} argument(s) but was applied to {found}. Arguments are never truncated nor padded."
    )]
    ArityMismatch {
        decl: String,
        expected: usize,
        found: usize,
    },

    /// A handle created by another context was passed to this one.
    #[error("A {what} owned by another context cannot be used here")]
    ForeignContext { what: &'static str },

    #[error("Term `{term}` does not denote a function declaration")]
    NotADeclaration { term: String },

    #[error("Term `{term}` is not a numeral")]
    NotANumeral { term: String },

    #[error("Numeral `{term}` does not fit into a `{target}`")]
    NumeralOutOfRange { term: String, target: &'static str },

    #[error("Cannot marshal {count} handles in a single native call")]
    TooManyHandles { count: usize },
}

pub type Z3Result<T> = Result<T, Z3Error>;
