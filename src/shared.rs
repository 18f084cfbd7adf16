//! 可整体替换配置的共享编解码器
//!
//! 读取方拿到的是不可变快照 (`Arc<Codec>`)，替换配置只交换指针，
//! 编解码过程中不持有锁，也不会看到更新到一半的配置。

use std::sync::{Arc, PoisonError, RwLock};

use crate::codec::Codec;
use crate::error::Result;

#[derive(Debug, Default)]
pub struct SharedCodec {
    current: RwLock<Arc<Codec>>,
}

impl SharedCodec {
    #[must_use]
    pub fn new(codec: Codec) -> Self {
        Self {
            current: RwLock::new(Arc::new(codec)),
        }
    }

    /// 当前配置的快照，替换配置不影响已取出的快照
    #[must_use]
    pub fn snapshot(&self) -> Arc<Codec> {
        // 锁内只有一个完整的 Arc，中毒后内容仍然可用
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// 用新参数重新配置
    ///
    /// 先完整构建并校验新编解码器，成功后再替换；失败时保留原配置。
    ///
    /// # Errors
    /// 参数非法时返回 `InvalidAlphabet` 或 `InvalidPrime`。
    pub fn reconfigure(&self, alphabet: &str, prime1: u64, prime2: u64) -> Result<Arc<Codec>> {
        let codec = Codec::new(alphabet, prime1, prime2)?;
        Ok(self.replace(codec))
    }

    /// 替换为已构建的编解码器，返回旧配置
    pub fn replace(&self, codec: Codec) -> Arc<Codec> {
        let next = Arc::new(codec);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let previous = std::mem::replace(&mut *guard, next);
        drop(guard);
        tracing::debug!("shared codec configuration replaced");
        previous
    }

    /// 使用当前快照编码
    ///
    /// # Errors
    /// 同 [`Codec::encode`]。
    pub fn encode(&self, number: u64, length: usize) -> Result<String> {
        self.snapshot().encode(number, length)
    }

    /// 使用当前快照解码
    ///
    /// # Errors
    /// 同 [`Codec::decode`]。
    pub fn decode(&self, code: &str) -> Result<u64> {
        self.snapshot().decode(code)
    }
}

impl From<Codec> for SharedCodec {
    fn from(codec: Codec) -> Self {
        Self::new(codec)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::thread;

    #[test]
    fn test_failed_reconfigure_keeps_previous() {
        let shared = SharedCodec::default();
        assert!(matches!(
            shared.reconfigure("short", 23, 977),
            Err(Error::InvalidAlphabet(_))
        ));
        assert_eq!(
            shared.reconfigure("0123456789abcdefghij", 7, 21),
            Err(Error::InvalidPrime(21))
        );
        assert_eq!(shared.encode(1, 10).unwrap(), "28N2BScrMt");
    }

    #[test]
    fn test_reconfigure_changes_output() {
        let shared = SharedCodec::default();
        let before = shared.snapshot();
        let previous = shared.reconfigure("0123456789abcdefghij", 3, 7).unwrap();

        assert!(Arc::ptr_eq(&before, &previous));
        assert_ne!(shared.encode(1, 10).unwrap(), "28N2BScrMt");
        assert_eq!(shared.snapshot().base(), 20);

        // 替换前取出的快照仍按旧配置工作
        assert_eq!(before.decode("28N2BScrMt").unwrap(), 1);
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(SharedCodec::default());
        let handles: Vec<_> = (0..4u64)
            .map(|t| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for n in (t * 1000)..(t * 1000 + 200) {
                        let codec = shared.snapshot();
                        let code = codec.encode(n, 10).unwrap();
                        assert_eq!(codec.decode(&code).unwrap(), n);
                    }
                })
            })
            .collect();

        shared.reconfigure("0123456789abcdefghijklmn", 5, 11).unwrap();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
