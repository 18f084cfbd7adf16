//! C FFI 导出
//!
//! 提供 C ABI 接口供 C/Swift/其他语言调用。编解码器以不透明指针传递，
//! 由 `codekit_codec_new` / `codekit_codec_default` 创建，`codekit_codec_free` 释放。

// FFI 模块需要 unsafe 代码
#![allow(unsafe_code)]

use std::ffi::{c_char, CStr};
use std::ptr;

use crate::codec::Codec;
use crate::error::Error;

/// FFI 错误码
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodekitStatus {
    Success = 0,
    InvalidAlphabet = -1,
    InvalidPrime = -2,
    LengthTooShort = -3,
    LengthNotCoprime = -4,
    NumberTooLarge = -5,
    CodeInvalid = -6,
    NullPointer = -7,
    InvalidUtf8 = -8,
    BufferTooSmall = -9,
}

impl From<&Error> for CodekitStatus {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidAlphabet(_) => Self::InvalidAlphabet,
            Error::InvalidPrime(_) => Self::InvalidPrime,
            Error::LengthTooShort(_) => Self::LengthTooShort,
            Error::LengthNotCoprime { .. } => Self::LengthNotCoprime,
            Error::NumberTooLarge { .. } => Self::NumberTooLarge,
            Error::CodeInvalid => Self::CodeInvalid,
        }
    }
}

unsafe fn set_status(out: *mut i32, status: CodekitStatus) {
    if !out.is_null() {
        *out = status as i32;
    }
}

/// 创建编解码器
///
/// 失败时返回空指针，并在 `out_status` 非空时写入错误码。
///
/// # Safety
/// - `alphabet` 必须是有效的 C 字符串
/// - `out_status` 为空或指向可写的 i32
#[no_mangle]
pub unsafe extern "C" fn codekit_codec_new(
    alphabet: *const c_char,
    prime1: u64,
    prime2: u64,
    out_status: *mut i32,
) -> *mut Codec {
    if alphabet.is_null() {
        set_status(out_status, CodekitStatus::NullPointer);
        return ptr::null_mut();
    }

    let Ok(alphabet) = CStr::from_ptr(alphabet).to_str() else {
        set_status(out_status, CodekitStatus::InvalidUtf8);
        return ptr::null_mut();
    };

    match Codec::new(alphabet, prime1, prime2) {
        Ok(codec) => {
            set_status(out_status, CodekitStatus::Success);
            Box::into_raw(Box::new(codec))
        }
        Err(err) => {
            set_status(out_status, CodekitStatus::from(&err));
            ptr::null_mut()
        }
    }
}

/// 创建默认配置的编解码器
#[no_mangle]
pub extern "C" fn codekit_codec_default() -> *mut Codec {
    Box::into_raw(Box::new(Codec::default()))
}

/// 释放编解码器
///
/// # Safety
/// - `codec` 必须来自 `codekit_codec_new` / `codekit_codec_default`，且只释放一次
#[no_mangle]
pub unsafe extern "C" fn codekit_codec_free(codec: *mut Codec) {
    if !codec.is_null() {
        drop(Box::from_raw(codec));
    }
}

/// 编码
///
/// 成功时写入 UTF-8 码及结尾的 0。
///
/// # Safety
/// - `codec` 必须是有效的编解码器指针
/// - `out` 必须指向至少 `out_len` 字节的可写缓冲区
#[no_mangle]
pub unsafe extern "C" fn codekit_encode(
    codec: *const Codec,
    number: u64,
    length: usize,
    out: *mut c_char,
    out_len: usize,
) -> i32 {
    if codec.is_null() || out.is_null() {
        return CodekitStatus::NullPointer as i32;
    }

    match (*codec).encode(number, length) {
        Ok(code) => {
            let bytes = code.as_bytes();
            if bytes.len() + 1 > out_len {
                return CodekitStatus::BufferTooSmall as i32;
            }
            ptr::copy_nonoverlapping(bytes.as_ptr(), out.cast::<u8>(), bytes.len());
            *out.add(bytes.len()) = 0; // null terminator
            CodekitStatus::Success as i32
        }
        Err(err) => CodekitStatus::from(&err) as i32,
    }
}

/// 解码
///
/// # Safety
/// - `codec` 必须是有效的编解码器指针
/// - `code` 必须是有效的 C 字符串
/// - `out_number` 必须是有效指针
#[no_mangle]
pub unsafe extern "C" fn codekit_decode(
    codec: *const Codec,
    code: *const c_char,
    out_number: *mut u64,
) -> i32 {
    if codec.is_null() || code.is_null() || out_number.is_null() {
        return CodekitStatus::NullPointer as i32;
    }

    let Ok(code) = CStr::from_ptr(code).to_str() else {
        return CodekitStatus::InvalidUtf8 as i32;
    };

    match (*codec).decode(code) {
        Ok(number) => {
            *out_number = number;
            CodekitStatus::Success as i32
        }
        Err(err) => CodekitStatus::from(&err) as i32,
    }
}
