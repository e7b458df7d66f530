//! 本地键值存储的契约与缺省布局。
//!
//! # 模块定位（Why）
//! - 持久化存储引擎是外部协作方，本模块只定义装配层消费/暴露的最小契约：
//!   [`Storage`] 句柄、[`StorageBuilder`] 工厂以及对外文档化的目录布局；
//! - 内存实现 [`MemoryStorage`](memory::MemoryStorage) 供测试与无持久化场景使用。
//!
//! # 持久布局契约（What）
//! - Processor 状态：`<base>/processor/<group>`；
//! - View 状态：`<base>/view`；
//! - 两个命名空间在组之间、角色之间永不冲突，运维可直接检视该布局；
//!   任何缺省存储构建器都依赖此约定。

mod memory;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::common::{Group, Partition};
use crate::error::codes;

pub use memory::{MemoryStorage, memory_builder};

/// 存储错误域。协作方自有错误域，装配层不包装也不转译。
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    /// 底层引擎 I/O 失败。
    #[error("storage io failure: {reason}")]
    Io {
        /// 人类可读的失败原因。
        reason: String,
    },
}

impl StorageError {
    /// 返回稳定错误码。
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => codes::STORAGE_IO,
        }
    }
}

/// 单个表分区的本地存储句柄。
///
/// # 契约说明（What）
/// - 所有方法通过共享引用访问，实现负责内部同步；句柄会被恢复循环与查询
///   路径并发共享；
/// - `set`/`delete` 必须在返回时对后续 `get`/`has` 可见。
pub trait Storage: Send + Sync {
    /// 判断键是否存在。
    fn has(&self, key: &str) -> Result<bool, StorageError>;

    /// 读取键对应的值，不存在时返回 `None`。
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// 写入键值对，覆盖旧值。
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

    /// 删除键；键不存在时视为成功。
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// 存储构建器：为表主题的每个分区创建一个本地存储。
pub type StorageBuilder =
    Arc<dyn Fn(&str, Partition) -> Result<Arc<dyn Storage>, StorageError> + Send + Sync>;

/// 缺省存储根目录。
pub const DEFAULT_BASE_PATH: &str = "/tmp/strom";

/// 返回 Processor 状态的缺省存储路径：`<base>/processor/<group>`。
pub fn default_processor_storage_path(group: &Group) -> PathBuf {
    Path::new(DEFAULT_BASE_PATH)
        .join("processor")
        .join(group.as_str())
}

/// 返回 View 状态的缺省存储路径：`<base>/view`。
pub fn default_view_storage_path() -> PathBuf {
    Path::new(DEFAULT_BASE_PATH).join("view")
}
