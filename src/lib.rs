//! codekit - 整数与短码互转
//!
//! 将非负整数编码为定长、带校验位、经过混淆的字母数字短码，并可逆向还原。
//!
//! # 码格式
//!
//! ```text
//! ┌──────────────────────────────────┬──────────┐
//! │  (number * prime1) 的 base 进制  │  校验位  │   → 按 prime2 打散位置
//! │      n-1 位，低位在前 + 扩散     │   1 位   │
//! └──────────────────────────────────┴──────────┘
//!                     总计: n 个字符 (n >= 6)
//! ```
//!
//! 这只是可逆的混淆，不是加密：拿到字母表和两个素数即可还原。
//!
//! # Example
//!
//! ```
//! use codekit::Codec;
//!
//! // 默认字母表 (56 字符) + 素数 23 / 977
//! let codec = Codec::default();
//!
//! let code = codec.encode(2001, 10).unwrap();
//! assert_eq!(code, "g8aUwmJpir");
//!
//! assert_eq!(codec.decode(&code).unwrap(), 2001);
//! assert!(codec.decode("g8aUwmJpiX").is_err()); // 校验位不匹配
//! ```

pub mod alphabet;
pub mod codec;
pub mod error;
pub mod pbox;
pub mod prime;
pub mod shared;

#[cfg(feature = "config")]
pub mod config;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports
pub use alphabet::{Alphabet, DEFAULT_ALPHABET, MIN_ALPHABET_LEN};
pub use codec::{Codec, MIN_CODE_LEN};
pub use error::{AlphabetFault, Error, Result};
pub use prime::{DEFAULT_PRIME1, DEFAULT_PRIME2};
pub use shared::SharedCodec;

#[cfg(feature = "config")]
pub use config::{CodecConfig, ConfigError};
