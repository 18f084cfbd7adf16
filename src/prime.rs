//! 素数校验
//!
//! 使用确定性 Miller-Rabin，对全部 u64 取值给出准确结果。
//! 这里只做参数合法性检查，不承担任何安全保证。

use crate::error::{Error, Result};

/// 默认数值混淆素数
pub const DEFAULT_PRIME1: u64 = 23;

/// 默认位置混淆素数
pub const DEFAULT_PRIME2: u64 = 977;

/// 可用素数下限
pub const MIN_PRIME: u64 = 3;

// 前 12 个素数作为见证数，覆盖 u64 全范围
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// 判断 n 是否为素数
#[must_use]
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0u32;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for &a in &WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// 校验混淆用素数：>= 3 且为素数
///
/// # Errors
/// 不满足条件时返回 `InvalidPrime`。
pub fn check_prime(p: u64) -> Result<u64> {
    if p < MIN_PRIME || !is_prime(p) {
        return Err(Error::InvalidPrime(i128::from(p)));
    }
    Ok(p)
}

/// 校验任意有符号输入（如配置文件中的整数），超出 u64 范围同样视为非法
///
/// # Errors
/// 负数或不满足 [`check_prime`] 时返回 `InvalidPrime`。
pub fn check_prime_signed(p: i64) -> Result<u64> {
    let p = u64::try_from(p).map_err(|_| Error::InvalidPrime(i128::from(p)))?;
    check_prime(p)
}

#[must_use]
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    #[allow(clippy::cast_possible_truncation)]
    let r = (u128::from(a) * u128::from(b) % u128::from(m)) as u64;
    r
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut r = 1u64;
    base %= m;
    while exp != 0 {
        if exp & 1 == 1 {
            r = mul_mod(r, base, m);
        }
        exp >>= 1;
        base = mul_mod(base, base, m);
    }
    r
}
