//! 位置置换表 (P-box)
//!
//! 第 i 个输出位置取第 `(i * prime) mod size` 个数位，使相邻输出字符不对应相邻的数位权重。

use crate::prime::gcd;

/// 由素数和长度决定的位置置换表，构建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PBox {
    prime: u64,
    forward: Vec<usize>,
}

impl PBox {
    #[must_use]
    pub fn new(prime: u64, size: usize) -> Self {
        let forward = if size == 0 {
            Vec::new()
        } else {
            let step = prime % size as u64;
            (0..size as u64)
                .map(|i| {
                    // i, step < size，乘积在 u128 中不会溢出
                    #[allow(clippy::cast_possible_truncation)]
                    let pos = (u128::from(i) * u128::from(step) % size as u128) as usize;
                    pos
                })
                .collect()
        };
        Self { prime, forward }
    }

    #[must_use]
    pub const fn prime(&self) -> u64 {
        self.prime
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// 置换表本身：`forward()[i] == (i * prime) mod size`
    #[must_use]
    pub fn forward(&self) -> &[usize] {
        &self.forward
    }

    /// 仅当素数与长度互素时置换才是双射，才能被还原
    #[must_use]
    pub fn is_bijective(&self) -> bool {
        gcd(self.prime, self.len() as u64) == 1
    }

    /// 逆置换：`inverse()[forward()[i]] == i`；非双射时返回 None
    #[must_use]
    pub fn inverse(&self) -> Option<Vec<usize>> {
        if !self.is_bijective() {
            return None;
        }
        let mut inverse = vec![0; self.len()];
        for (i, &pos) in self.forward.iter().enumerate() {
            inverse[pos] = i;
        }
        Some(inverse)
    }

    /// 打散：`out[i] = items[forward[i]]`
    ///
    /// 调用方保证 `items.len() == self.len()`。
    pub fn scatter<'a, T>(&'a self, items: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.forward.iter().map(move |&pos| &items[pos])
    }

    /// 还原 [`PBox::scatter`]：`out[forward[i]] = items[i]`
    ///
    /// 长度不匹配或非双射时返回 None。
    #[must_use]
    pub fn gather<T: Copy>(&self, items: &[T]) -> Option<Vec<T>> {
        if items.len() != self.len() {
            return None;
        }
        let inverse = self.inverse()?;
        Some(inverse.iter().map(|&i| items[i]).collect())
    }
}
