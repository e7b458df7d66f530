use core::any::Any;

use thiserror::Error;

use crate::error::codes;

/// 编解码错误域。协作方自有错误域，装配层不包装也不转译。
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// 入参的具体类型与编解码实现不匹配。
    #[error("codec expects `{expected}`")]
    TypeMismatch {
        /// 实现期望的类型名。
        expected: &'static str,
    },

    /// 字节序列无法解码。
    #[error("decode failed: {reason}")]
    Decode {
        /// 人类可读的失败原因。
        reason: String,
    },
}

impl CodecError {
    /// 返回稳定错误码。
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => codes::CODEC_TYPE_MISMATCH,
            Self::Decode { .. } => codes::CODEC_DECODE,
        }
    }
}

/// 表值的对外序列化契约。
///
/// # 设计背景（Why）
/// - 表（变更日志主题）中的值以字节存放，而调用方以领域类型操作；编解码器
///   是两者之间唯一的转换点，由调用方在构造 View/Emitter 时注入。
///
/// # 契约说明（What）
/// - 值以 `dyn Any` 传递以保持对象安全，实现负责向具体类型降转；
/// - 编码与解码必须互逆：`decode(encode(v))` 产出与 `v` 等值的对象；
/// - 实现需 `Send + Sync + 'static`，编解码器会被配置记录跨线程共享。
///
/// # 设计权衡（Trade-offs）
/// - 放弃泛型化接口换取可装入配置槽位的对象安全；类型安全检查因此推迟到
///   运行时，以 [`CodecError::TypeMismatch`] 显式失败。
pub trait Codec: Send + Sync + 'static {
    /// 将领域值编码为字节序列。
    fn encode(&self, value: &(dyn Any + Send)) -> Result<Vec<u8>, CodecError>;

    /// 将字节序列解码为领域值。
    fn decode(&self, data: &[u8]) -> Result<Box<dyn Any + Send>, CodecError>;
}

/// 原样传递字节的编解码器，适用于值本身就是 `Vec<u8>` 的表。
#[derive(Clone, Copy, Debug, Default)]
pub struct Bytes;

impl Codec for Bytes {
    fn encode(&self, value: &(dyn Any + Send)) -> Result<Vec<u8>, CodecError> {
        value
            .downcast_ref::<Vec<u8>>()
            .cloned()
            .ok_or(CodecError::TypeMismatch { expected: "Vec<u8>" })
    }

    fn decode(&self, data: &[u8]) -> Result<Box<dyn Any + Send>, CodecError> {
        Ok(Box::new(data.to_vec()))
    }
}
