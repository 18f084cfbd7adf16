pub mod alphabet;
pub mod capacity;
pub mod config;
pub mod decode;
pub mod encode;
pub mod verify;

/// Code length used when `--length` is omitted.
pub const DEFAULT_LENGTH: usize = 10;
