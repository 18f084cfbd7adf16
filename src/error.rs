//! 错误类型定义

use thiserror::Error;

/// 字母表校验失败的具体原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlphabetFault {
    #[error("alphabet must have at least {min} symbols, got {0}", min = crate::alphabet::MIN_ALPHABET_LEN)]
    TooShort(usize),

    #[error("symbol '{0}' is not a letter or digit")]
    InvalidSymbol(char),

    #[error("symbol '{0}' appears more than once")]
    DuplicateSymbol(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(AlphabetFault),

    #[error("invalid prime: {0} (must be a prime >= 3 within u64 range)")]
    InvalidPrime(i128),

    #[error("code length must be at least {min}, got {0}", min = crate::codec::MIN_CODE_LEN)]
    LengthTooShort(usize),

    #[error("code length {length} shares a factor with position prime {prime}")]
    LengthNotCoprime { length: usize, prime: u64 },

    #[error("number {number} does not fit in a code of length {length}")]
    NumberTooLarge { number: u64, length: usize },

    #[error("code invalid")]
    CodeInvalid,
}

impl From<AlphabetFault> for Error {
    fn from(fault: AlphabetFault) -> Self {
        Self::InvalidAlphabet(fault)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
