use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::{Storage, StorageBuilder, StorageError};
use crate::common::Partition;

/// 基于哈希表的内存存储。
///
/// # 设计背景（Why）
/// - 测试与一次性任务不需要持久化引擎；内存实现让恢复语义（set/delete）
///   可以在无 I/O 的前提下被完整验证。
///
/// # 契约说明（What）
/// - 内部以 `parking_lot::RwLock` 同步，句柄可被多线程共享；
/// - 进程退出即丢失全部数据，不参与持久布局契约。
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// 构造空存储。
    pub fn new() -> Self {
        Self::default()
    }

    /// 返回当前键数量，仅供测试与诊断使用。
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// 判断存储是否为空。
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn has(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.read().contains_key(key))
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_owned(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// 返回内存存储构建器：每个 (topic, partition) 组合创建一个独立存储。
pub fn memory_builder() -> StorageBuilder {
    Arc::new(|_topic: &str, _partition: Partition| {
        Ok(Arc::new(MemoryStorage::new()) as Arc<dyn Storage>)
    })
}
