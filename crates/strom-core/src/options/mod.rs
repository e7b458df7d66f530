//! 三类实体的配置装配层。
//!
//! # 模块定位（Why）
//! - 调用方以有序选项清单描述诉求；装配器在内置默认值之上按序套用、校验
//!   必选依赖、回填缺省工厂，产出不可再变的配置记录——这是可插拔协作方
//!   （存储、消费者、生产者、主题管理器、日志、散列、更新回调）唯一的
//!   汇合点。
//!
//! # 装配算法（How）
//! 1. 播种：客户端标识 = [`DEFAULT_CLIENT_ID`]、日志器 = 进程缺省、散列 =
//!    FNV-1a 32 位构造器、（Processor）空值策略 = Ignore、（Processor/View）
//!    分区通道容量 = 10、更新回调 = [`default_update`]；
//! 2. 按调用方给定顺序套用每个选项，后写者胜（对标量与工厂槽位一致生效）；
//! 3. 校验：Processor 与 View 的 storage 槽位必须已设置，否则以
//!    [`OptionsError::MissingStorageBuilder`](crate::OptionsError::MissingStorageBuilder)
//!    失败；Emitter 没有必选槽位；
//! 4. 回填：未设置的消费者/生产者/主题管理器槽位取
//!    [`transport`](crate::transport) 模块的包级缺省；
//! 5. 返回完整配置或错误，全有或全无，绝不返回部分装配结果。
//!
//! # 所有权模型（What）
//! - 累加器由单次装配调用独占，装配结束后即不存在；返回的配置类型所有
//!   工厂槽位均为非空（由类型系统保证），可安全移交给实体构造器。
//!
//! # 设计权衡（Trade-offs）
//! - 刻意保留存储必选 / 传输可选的不对称：Processor 与 View 离开本地状态
//!   无法工作，而传输始终有合理缺省。这是策略取向，不是疏漏，不要“修平”。

pub mod emitter;
pub mod processor;
pub mod view;

use std::sync::Arc;

use crate::common::Partition;
use crate::storage::{Storage, StorageError};

/// 缺省客户端标识。
pub const DEFAULT_CLIENT_ID: &str = "strom";

/// 分区通道的缺省缓冲容量。
pub(crate) const DEFAULT_PARTITION_CHANNEL_SIZE: usize = 10;

/// 值缺席消息的处理策略。
///
/// 变更日志与输入流中都会出现值缺席（墓碑）消息，该策略决定 Processor
/// 如何对待它们；缺省为 [`NilHandling::Ignore`]。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NilHandling {
    /// 丢弃值缺席的消息。
    #[default]
    Ignore,
    /// 将缺席值原样传给处理回调。
    Process,
    /// 先交由解码器处理，再传给处理回调。
    Decode,
}

/// 恢复路径的更新回调：`(storage, partition, key, value-or-absent)` → 结果。
///
/// 外部恢复循环对表变更日志中的每条消息调用一次，这里是存储被改写的
/// 唯一入口。
pub type UpdateCallback = Arc<
    dyn Fn(&dyn Storage, Partition, &str, Option<&[u8]>) -> Result<(), StorageError>
        + Send
        + Sync,
>;

/// 缺省更新回调：值缺席则删除键，否则写入键值。
///
/// 这是 Processor 与 View 在未提供自定义回调时使用的规范恢复语义；
/// 自定义回调若要保留部分缺省行为，可直接委托本函数。
pub fn default_update(
    storage: &dyn Storage,
    _partition: Partition,
    key: &str,
    value: Option<&[u8]>,
) -> Result<(), StorageError> {
    match value {
        None => storage.delete(key),
        Some(value) => storage.set(key, value),
    }
}

/// 将 [`default_update`] 包装为可装入配置槽位的回调值。
pub(crate) fn default_update_callback() -> UpdateCallback {
    Arc::new(|storage, partition, key, value| default_update(storage, partition, key, value))
}
