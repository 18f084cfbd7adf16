//! 字母表定义
//!
//! 字母表即码的字符集，同时定义了进制：字符在字母表中的位置就是它的数值。

use std::collections::HashMap;
use std::fmt;

use crate::error::{AlphabetFault, Result};

/// 默认字母表：大小写字母 + 数字 2-9，去掉易混淆的 I/l/O/o/0/1，随机排列 (56 字符)
pub const DEFAULT_ALPHABET: &str = "A5iSqnjeZQpmHtVPBW9YaDK2sCMXUrbhuTEzNL7ywfd4vRcgG83FJ6kx";

/// 字母表最小长度
pub const MIN_ALPHABET_LEN: usize = 12;

/// 经过校验的字母表：仅字母和数字，无重复，至少 12 个字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<char>,
    index: HashMap<char, usize>,
}

impl Alphabet {
    /// 从字符串创建字母表
    ///
    /// # Example
    /// ```
    /// use codekit::Alphabet;
    /// let alphabet = Alphabet::new("0123456789abcdef").unwrap();
    /// assert_eq!(alphabet.base(), 16);
    /// assert_eq!(alphabet.index_of('a'), Some(10));
    /// ```
    ///
    /// # Errors
    /// 长度不足、包含非字母数字字符或有重复字符时返回 `InvalidAlphabet`。
    pub fn new(symbols: &str) -> Result<Self> {
        let symbols: Vec<char> = symbols.chars().collect();
        if symbols.len() < MIN_ALPHABET_LEN {
            return Err(AlphabetFault::TooShort(symbols.len()).into());
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &c) in symbols.iter().enumerate() {
            if !c.is_alphanumeric() {
                return Err(AlphabetFault::InvalidSymbol(c).into());
            }
            if index.insert(c, i).is_some() {
                return Err(AlphabetFault::DuplicateSymbol(c).into());
            }
        }

        Ok(Self { symbols, index })
    }

    /// 进制（字母表长度）
    #[must_use]
    pub fn base(&self) -> usize {
        self.symbols.len()
    }

    /// 字符转数值，不在字母表内返回 None
    #[inline]
    #[must_use]
    pub fn index_of(&self, c: char) -> Option<usize> {
        self.index.get(&c).copied()
    }

    /// 数值转字符
    #[inline]
    #[must_use]
    pub fn symbol(&self, digit: usize) -> Option<char> {
        self.symbols.get(digit).copied()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, c: char) -> bool {
        self.index.contains_key(&c)
    }

    #[must_use]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// 打乱字符顺序，生成一个新的私有字母表
    ///
    /// 打乱后的字母表与原字母表互不兼容，已签发的码需用原字母表解码。
    #[cfg(feature = "shuffle")]
    #[must_use]
    pub fn shuffled<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Self {
        use rand::seq::SliceRandom;

        let mut symbols = self.symbols.clone();
        symbols.shuffle(rng);
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        // 默认字母表是常量，不经过校验路径
        let symbols: Vec<char> = DEFAULT_ALPHABET.chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Alphabet {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}
