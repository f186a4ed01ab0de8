use thiserror::Error;

pub type Result<T, E = SpellError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum SpellError {
    #[error("spellchecker config is missing the required `field` option")]
    MissingField,
    #[error("field `{0}` is not defined in the schema")]
    UnknownField(String),
    #[error("field `{0}` is not indexed and cannot be spellchecked")]
    FieldNotIndexed(String),
    #[error("invalid value for `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("malformed spellchecker options: {0}")]
    InvalidConfig(String),

    #[error("invalid token {text:?} at {start}..{end}")]
    InvalidToken { text: String, start: usize, end: usize },

    #[error("no index snapshot has been published")]
    NoSnapshot,

    #[error("term dictionary error: {0}")]
    TermDictionary(#[from] fst::Error),
    #[error("word list line {line}: {reason}")]
    WordList { line: usize, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SpellError {
    /// Configuration errors are detected before any token is processed.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            SpellError::MissingField
                | SpellError::UnknownField(_)
                | SpellError::FieldNotIndexed(_)
                | SpellError::InvalidOption { .. }
                | SpellError::InvalidConfig(_)
        )
    }
}
