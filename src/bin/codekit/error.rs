use thiserror::Error;

#[derive(Error, Debug)]
/// Internal enum.
pub enum CliError {
    #[error("--quiet and --verbose cannot be used together")]
    /// Internal variant.
    QuietVerboseConflict,

    #[error("config file already exists: {0} (use --force to overwrite)")]
    /// Internal variant.
    ConfigExists(String),

    #[error("invalid code: {0}")]
    /// Internal variant.
    InvalidCode(String),

    #[error(transparent)]
    /// Internal variant.
    Config(#[from] codekit::ConfigError),

    #[error(transparent)]
    /// Internal variant.
    Codekit(#[from] codekit::Error),
}

/// Internal type alias.
pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Message shown to the user, with a hint where one helps.
    pub fn user_message(&self) -> String {
        match self {
            Self::Codekit(err) => codec_message(err),
            Self::Config(codekit::ConfigError::Codec(err)) => codec_message(err),
            other => other.to_string(),
        }
    }
}

/// Internal helper function.
fn codec_message(err: &codekit::Error) -> String {
    match err {
        codekit::Error::NumberTooLarge { .. } => {
            format!("{err}; retry with a larger --length")
        }
        codekit::Error::LengthNotCoprime { .. } => {
            format!("{err}; pick a different --length")
        }
        other => other.to_string(),
    }
}
