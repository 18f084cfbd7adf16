//! 整数 ↔ 码 编解码
//!
//! 编码流程 (n 位码):
//! 1. 数值乘以 prime1
//! 2. 转换为 base 进制的 n-1 位（低位在前），同时把最低位乘以位序加到各位上
//! 3. 第 n 位为校验位：前 n-1 位之和乘以 prime1 后取余
//! 4. 按 prime2 的置换表打散位置后映射为字母表字符
//!
//! 解码是上述流程的逆运算，并在还原数值之前先验证字符和校验位。

use std::borrow::Cow;

use num_traits::checked_pow;

use crate::alphabet::Alphabet;
use crate::error::{Error, Result};
use crate::pbox::PBox;
use crate::prime::{check_prime, gcd, DEFAULT_PRIME1, DEFAULT_PRIME2};

/// 码最小长度
pub const MIN_CODE_LEN: usize = 6;

/// 已配置的编解码器：字母表 + 两个素数，构建后不可变，可跨线程共享
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    alphabet: Alphabet,
    prime1: u64,
    prime2: u64,
    /// 以 base 为长度的置换表，码长等于 base 时直接复用
    table: PBox,
}

impl Codec {
    /// 校验参数并创建编解码器
    ///
    /// # Example
    /// ```
    /// use codekit::Codec;
    /// let codec = Codec::new("0123456789abcdefghij", 3, 7).unwrap();
    /// let code = codec.encode(42, 8).unwrap();
    /// assert_eq!(codec.decode(&code).unwrap(), 42);
    /// ```
    ///
    /// # Errors
    /// 字母表非法返回 `InvalidAlphabet`；任一素数非法返回 `InvalidPrime`。
    pub fn new(alphabet: &str, prime1: u64, prime2: u64) -> Result<Self> {
        let alphabet = Alphabet::new(alphabet)?;
        Self::with_alphabet(alphabet, prime1, prime2)
    }

    /// 使用已校验的字母表创建编解码器
    ///
    /// # Errors
    /// 任一素数非法返回 `InvalidPrime`。
    pub fn with_alphabet(alphabet: Alphabet, prime1: u64, prime2: u64) -> Result<Self> {
        let prime1 = check_prime(prime1)?;
        let prime2 = check_prime(prime2)?;
        let table = PBox::new(prime2, alphabet.base());

        tracing::debug!(
            base = alphabet.base(),
            prime1,
            prime2,
            "codec configured with alphabet {alphabet}"
        );

        Ok(Self {
            alphabet,
            prime1,
            prime2,
            table,
        })
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    #[must_use]
    pub fn base(&self) -> usize {
        self.alphabet.base()
    }

    #[must_use]
    pub const fn prime1(&self) -> u64 {
        self.prime1
    }

    #[must_use]
    pub const fn prime2(&self) -> u64 {
        self.prime2
    }

    /// 配置时按 base 构建的置换表
    #[must_use]
    pub fn permutation_table(&self) -> &[usize] {
        self.table.forward()
    }

    /// 将数字编码为 `length` 位码
    ///
    /// # Errors
    /// - `LengthTooShort`: `length < 6`
    /// - `LengthNotCoprime`: `length` 与 prime2 不互素，置换不可逆
    /// - `NumberTooLarge`: `number * prime1` 超出 `length - 1` 位的表示上限
    pub fn encode(&self, number: u64, length: usize) -> Result<String> {
        self.check_length(length)?;
        let pbox = self.pbox_for(length);
        let base = self.base() as u128;

        let mut scaled = u128::from(number) * u128::from(self.prime1);
        if let Some(limit) = self.digit_capacity(length - 1) {
            if scaled >= limit {
                return Err(Error::NumberTooLarge { number, length });
            }
        }

        // 进制转换 + 最低位扩散
        let mut digits = vec![0usize; length];
        let mut checksum = 0u128;
        for i in 0..length - 1 {
            let mixed = (scaled + digits[0] as u128 * i as u128) % base;
            // mixed < base，必定可以放入 usize
            #[allow(clippy::cast_possible_truncation)]
            let digit = mixed as usize;
            digits[i] = digit;
            scaled /= base;
            checksum += digit as u128;
        }

        // 校验位
        #[allow(clippy::cast_possible_truncation)]
        let check = (checksum * u128::from(self.prime1) % base) as usize;
        digits[length - 1] = check;

        // P-box 打散；数位均小于 base，symbol 必定存在
        Ok(pbox
            .scatter(&digits)
            .filter_map(|&d| self.alphabet.symbol(d))
            .collect())
    }

    /// 将码还原为数字
    ///
    /// 码长由字符串自身决定。
    ///
    /// # Errors
    /// 码为空、包含字母表外的字符、校验位不匹配或数值超出 u64 时返回 `CodeInvalid`。
    pub fn decode(&self, code: &str) -> Result<u64> {
        let symbols: Vec<char> = code.chars().collect();
        let n = symbols.len();
        if n == 0 {
            return Err(reject("empty code"));
        }

        // 位置还原
        let pbox = self.pbox_for(n);
        let ordered = pbox
            .gather(&symbols)
            .ok_or_else(|| reject("code length shares a factor with position prime"))?;

        // 字符转数值
        let mut digits = Vec::with_capacity(n);
        for c in ordered {
            let digit = self
                .alphabet
                .index_of(c)
                .ok_or_else(|| reject("symbol outside alphabet"))?;
            digits.push(digit as u128);
        }

        // 校验
        let base = self.base() as u128;
        let sum: u128 = digits[..n - 1].iter().sum();
        if sum * u128::from(self.prime1) % base != digits[n - 1] {
            return Err(reject("checksum mismatch"));
        }

        // 逆运算
        let first = digits[0];
        let mut value = 0u128;
        // 长码的高位权重可能超出 u128，只有对应数位非零时才算溢出
        let mut weight = Some(1u128);
        for (i, &digit) in digits[..n - 1].iter().enumerate() {
            let restored = (digit + (base - first) * i as u128) % base;
            if restored != 0 {
                let term = weight
                    .and_then(|w| restored.checked_mul(w))
                    .ok_or_else(|| reject("value overflows"))?;
                value = value
                    .checked_add(term)
                    .ok_or_else(|| reject("value overflows"))?;
            }
            weight = weight.and_then(|w| w.checked_mul(base));
        }

        u64::try_from(value / u128::from(self.prime1)).map_err(|_| reject("value exceeds u64"))
    }

    /// 仅校验码是否有效
    #[must_use]
    pub fn verify(&self, code: &str) -> bool {
        self.decode(code).is_ok()
    }

    /// `length` 位码可表示的最大数字（超过 u64 时为 `u64::MAX`）
    ///
    /// # Errors
    /// 与 [`Codec::encode`] 的长度检查一致。
    pub fn capacity(&self, length: usize) -> Result<u64> {
        self.check_length(length)?;
        let Some(limit) = self.digit_capacity(length - 1) else {
            return Ok(u64::MAX);
        };
        let max = (limit - 1) / u128::from(self.prime1);
        Ok(u64::try_from(max).unwrap_or(u64::MAX))
    }

    /// `base^digits`，超出 u128 时返回 None（此时任何 u64 数字都放得下）
    fn digit_capacity(&self, digits: usize) -> Option<u128> {
        checked_pow(self.base() as u128, digits)
    }

    fn check_length(&self, length: usize) -> Result<()> {
        if length < MIN_CODE_LEN {
            return Err(Error::LengthTooShort(length));
        }
        if gcd(self.prime2, length as u64) != 1 {
            return Err(Error::LengthNotCoprime {
                length,
                prime: self.prime2,
            });
        }
        Ok(())
    }

    fn pbox_for(&self, length: usize) -> Cow<'_, PBox> {
        if length == self.table.len() {
            Cow::Borrowed(&self.table)
        } else {
            Cow::Owned(PBox::new(self.prime2, length))
        }
    }
}

impl Default for Codec {
    /// 默认配置：默认字母表，素数 23 与 977
    fn default() -> Self {
        let alphabet = Alphabet::default();
        let table = PBox::new(DEFAULT_PRIME2, alphabet.base());
        Self {
            alphabet,
            prime1: DEFAULT_PRIME1,
            prime2: DEFAULT_PRIME2,
            table,
        }
    }
}

fn reject(reason: &'static str) -> Error {
    tracing::debug!(reason, "code rejected");
    Error::CodeInvalid
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::alphabet::DEFAULT_ALPHABET;
    use crate::error::AlphabetFault;

    const VECTORS: [(u64, &str); 8] = [
        (0, "AAAAAAAAAA"),
        (1, "28N2BScrMt"),
        (56, "AAA2AAACAA"),
        (57, "28NcBSckMt"),
        (3136, "AAAAAA2CAA"),
        (2001, "g8aUwmJpir"),
        (201_999, "8eUaADmLVn"),
        (2_049_999_999, "WeccsijggV"),
    ];

    #[test]
    fn test_default_matches_new() {
        let codec = Codec::new(DEFAULT_ALPHABET, 23, 977).unwrap();
        assert_eq!(codec, Codec::default());
        assert_eq!(codec.base(), 56);
    }

    #[test]
    fn test_set_primes() {
        let alphabet = Alphabet::default();
        let cases = [
            (0, 0, Err(Error::InvalidPrime(0))),
            (2, 2, Err(Error::InvalidPrime(2))),
            (7, 21, Err(Error::InvalidPrime(21))),
            (3, 7, Ok(())),
            (23, 977, Ok(())),
        ];
        for (p1, p2, expected) in cases {
            let got = Codec::with_alphabet(alphabet.clone(), p1, p2).map(|_| ());
            assert_eq!(got, expected, "({p1}, {p2})");
        }
    }

    #[test]
    fn test_alphabet_checked_before_primes() {
        assert_eq!(
            Codec::new("abc", 0, 0),
            Err(Error::InvalidAlphabet(AlphabetFault::TooShort(3)))
        );
    }

    #[test]
    fn test_encode_vectors() {
        let codec = Codec::default();
        for (number, code) in VECTORS {
            assert_eq!(codec.encode(number, 10).unwrap(), code, "{number}");
        }
    }

    #[test]
    fn test_decode_vectors() {
        let codec = Codec::default();
        for (number, code) in VECTORS {
            assert_eq!(codec.decode(code).unwrap(), number, "{code}");
        }
    }

    #[test]
    fn test_permutation_table() {
        let codec = Codec::default();
        let table = codec.permutation_table();
        assert_eq!(table.len(), 56);
        for (i, &pos) in table.iter().enumerate() {
            assert_eq!(pos, i * 977 % 56);
        }
    }

    #[test]
    fn test_length_equal_to_base_uses_cached_table() {
        let codec = Codec::new("0123456789abcdefghijk", 5, 13).unwrap();
        assert_eq!(codec.base(), 21);
        let code = codec.encode(123_456, 21).unwrap();
        assert_eq!(code.chars().count(), 21);
        assert_eq!(codec.decode(&code).unwrap(), 123_456);
    }

    #[test]
    fn test_length_too_short() {
        let codec = Codec::default();
        assert_eq!(codec.encode(1, 5), Err(Error::LengthTooShort(5)));
        assert_eq!(codec.encode(0, 0), Err(Error::LengthTooShort(0)));
        assert_eq!(codec.capacity(5), Err(Error::LengthTooShort(5)));
    }

    #[test]
    fn test_zero() {
        let codec = Codec::default();
        for length in [6, 7, 10, 16, 40] {
            let code = codec.encode(0, length).unwrap();
            assert_eq!(code, "A".repeat(length));
            assert_eq!(codec.decode(&code).unwrap(), 0);
        }
    }

    #[test]
    fn test_min_length_boundary() {
        let codec = Codec::default();
        // 56^5 = 550731776, (56^5 - 1) / 23 = 23944859
        let max = codec.capacity(6).unwrap();
        assert_eq!(max, 23_944_859);

        let code = codec.encode(max, 6).unwrap();
        assert_eq!(code, "LrzkWN");
        assert_eq!(codec.decode(&code).unwrap(), max);

        assert_eq!(
            codec.encode(max + 1, 6),
            Err(Error::NumberTooLarge {
                number: max + 1,
                length: 6
            })
        );
    }

    /// 跳过 prime1 缩放，直接把原始值排成码
    #[allow(clippy::cast_possible_truncation)]
    fn raw_code(codec: &Codec, raw: u128, length: usize) -> String {
        let base = codec.base() as u128;
        let mut digits = vec![0usize; length];
        let mut rest = raw;
        for i in 0..length - 1 {
            digits[i] = ((rest + digits[0] as u128 * i as u128) % base) as usize;
            rest /= base;
        }
        let sum: u128 = digits[..length - 1].iter().map(|&d| d as u128).sum();
        digits[length - 1] = (sum * u128::from(codec.prime1()) % base) as usize;
        PBox::new(codec.prime2(), length)
            .scatter(&digits)
            .map(|&d| codec.alphabet().symbol(d).unwrap())
            .collect()
    }

    #[test]
    fn test_unscaled_value_decodes_to_quotient() {
        // 校验位通过即视为有效码，数值按 prime1 向下取整
        let codec = Codec::default();
        let code = raw_code(&codec, 1, 10);
        assert_eq!(code, "5eq5ZnimjS");
        assert_eq!(codec.decode(&code), Ok(0));
        assert_eq!(codec.decode(&raw_code(&codec, 22, 10)), Ok(0));
        assert_eq!(codec.decode(&raw_code(&codec, 24, 10)), Ok(1));
        assert_eq!(codec.decode(&raw_code(&codec, 46, 10)), Ok(2));
    }

    #[test]
    fn test_scaled_equal_to_capacity_is_rejected() {
        // base 46 = 2 * 23，46^5 可被 23 整除
        // 缩放值恰为 46^5 时需要第 6 个数据位，放行会丢掉最高位、解码结果变成 0，
        // 所以上限判断必须是 >= 而不是 >
        let codec = Codec::new("0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJ", 23, 977).unwrap();
        assert_eq!(codec.base(), 46);
        let exact = 46u64.pow(5) / 23;
        assert!(matches!(
            codec.encode(exact, 6),
            Err(Error::NumberTooLarge { .. })
        ));
        let code = codec.encode(exact - 1, 6).unwrap();
        assert_eq!(codec.decode(&code).unwrap(), exact - 1);
    }

    #[test]
    fn test_u64_max_with_long_code() {
        let codec = Codec::default();
        assert!(matches!(
            codec.encode(u64::MAX, 12),
            Err(Error::NumberTooLarge { .. })
        ));
        let code = codec.encode(u64::MAX, 14).unwrap();
        assert_eq!(codec.decode(&code).unwrap(), u64::MAX);
        assert_eq!(codec.capacity(40).unwrap(), u64::MAX);
    }

    #[test]
    fn test_length_not_coprime() {
        let codec = Codec::new("0123456789abcdefghij", 3, 7).unwrap();
        assert_eq!(
            codec.encode(1, 14),
            Err(Error::LengthNotCoprime {
                length: 14,
                prime: 7
            })
        );
        assert_eq!(codec.decode("00000000000000"), Err(Error::CodeInvalid));
        assert!(codec.encode(1, 13).is_ok());
    }

    #[test]
    fn test_decode_unknown_symbol() {
        let codec = Codec::default();
        assert_eq!(codec.decode("28N2BScrM0"), Err(Error::CodeInvalid));
        assert_eq!(codec.decode("28N2BS=rMt"), Err(Error::CodeInvalid));
        assert_eq!(codec.decode(""), Err(Error::CodeInvalid));
    }

    #[test]
    fn test_single_substitution_detected() {
        let codec = Codec::default();
        for (_, code) in VECTORS {
            let symbols: Vec<char> = code.chars().collect();
            for pos in 0..symbols.len() {
                for &c in codec.alphabet().symbols() {
                    if c == symbols[pos] {
                        continue;
                    }
                    let mut mutated = symbols.clone();
                    mutated[pos] = c;
                    let mutated: String = mutated.into_iter().collect();
                    assert_eq!(codec.decode(&mutated), Err(Error::CodeInvalid), "{mutated}");
                }
            }
        }
    }

    #[test]
    fn test_other_configuration_rejects() {
        let other = Codec::new(DEFAULT_ALPHABET, 29, 977).unwrap();
        for (number, code) in VECTORS.iter().skip(1) {
            assert_ne!(other.decode(code).ok(), Some(*number), "{code}");
        }
    }

    #[test]
    fn test_verify() {
        let codec = Codec::default();
        assert!(codec.verify("WeccsijggV"));
        assert!(!codec.verify("WeccsijggW"));
    }

    #[test]
    fn test_sequential_codes_differ_widely() {
        let codec = Codec::default();
        let a = codec.encode(1000, 10).unwrap();
        let b = codec.encode(1001, 10).unwrap();
        let same = a.chars().zip(b.chars()).filter(|(x, y)| x == y).count();
        assert!(same < 5, "{a} vs {b}");
    }
}
