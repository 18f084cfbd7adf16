//! 编解码参数配置文件 (TOML)
//!
//! 字母表与两个素数就是全部"schema"：想让已签发的码继续可解，就必须保存并沿用它们。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::alphabet::{Alphabet, DEFAULT_ALPHABET};
use crate::codec::Codec;
use crate::prime::{check_prime_signed, DEFAULT_PRIME1, DEFAULT_PRIME2};

/// 覆盖默认配置路径的环境变量
pub const CONFIG_ENV: &str = "CODEKIT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    #[error(transparent)]
    Codec(#[from] crate::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// 配置文件内容；素数用有符号整数读取，负数在构建时报 `InvalidPrime`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub alphabet: String,
    pub prime1: i64,
    pub prime2: i64,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.to_string(),
            prime1: DEFAULT_PRIME1 as i64,
            prime2: DEFAULT_PRIME2 as i64,
        }
    }
}

impl CodecConfig {
    /// # Errors
    /// 当配置路径解析或配置文件读取/解析失败时返回错误。
    pub fn load() -> Result<Self> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    /// 读取配置；文件不存在或为空时使用默认值
    ///
    /// # Errors
    /// 当文件读取或 TOML 解析失败时返回错误。
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// # Errors
    /// 当目录创建、序列化或文件写入失败时返回错误。
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// # Errors
    /// 序列化失败时返回错误。
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 校验参数并构建编解码器
    ///
    /// # Errors
    /// 字母表或素数非法时返回 `ConfigError::Codec`。
    pub fn build(&self) -> Result<Codec> {
        let alphabet = Alphabet::new(&self.alphabet)?;
        let prime1 = check_prime_signed(self.prime1)?;
        let prime2 = check_prime_signed(self.prime2)?;
        Ok(Codec::with_alphabet(alphabet, prime1, prime2)?)
    }
}

/// 默认配置文件路径；设置了 `CODEKIT_CONFIG` 时以其为准
///
/// # Errors
/// 当运行环境缺少必要目录环境变量时返回错误。
pub fn config_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }

    #[cfg(target_os = "windows")]
    {
        let base = std::env::var_os("LOCALAPPDATA")
            .or_else(|| std::env::var_os("APPDATA"))
            .ok_or_else(|| ConfigError::Message("LOCALAPPDATA/APPDATA not set".to_string()))?;
        let mut path = PathBuf::from(base);
        path.push("codekit");
        path.push("config.toml");
        Ok(path)
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var_os("HOME")
            .ok_or_else(|| ConfigError::Message("HOME not set".to_string()))?;
        let mut path = PathBuf::from(home);
        path.push(".codekit");
        path.push("config.toml");
        Ok(path)
    }
}
