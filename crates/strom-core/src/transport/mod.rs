//! 消息传输层的契约与缺省工厂。
//!
//! # 模块定位（Why）
//! - broker 后端的消费者/生产者实现是外部协作方；本模块定义装配层消费/暴露
//!   的最小契约与包级缺省构建器，装配器在回填阶段直接引用后者；
//! - 在尚未接入 broker 后端的部署中，缺省构建器落到进程内 loopback 实现
//!   （[`loopback`]），保证回填产物始终可用。
//!
//! # 契约概览（What）
//! - [`Consumer`]：订阅主题并逐条拉取 [`Message`]；
//! - [`Producer`]：按键的分区散列向主题发射消息；
//! - [`TopicManager`]：创建主题并查询分区元数据；
//! - 三个 `default_*_builder` 函数是回填表的唯一来源，两次调用返回的
//!   构建器功能等价。

pub mod loopback;

use std::sync::Arc;

use thiserror::Error;

use crate::common::Partition;
use crate::error::codes;
use crate::hasher::HasherBuilder;

/// 传输错误域。协作方自有错误域，装配层不包装也不转译。
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TransportError {
    /// 访问了未创建的主题。
    #[error("unknown topic `{topic}`")]
    UnknownTopic {
        /// 目标主题名。
        topic: String,
    },

    /// 句柄已关闭，后续操作被拒绝。
    #[error("transport handle already closed")]
    Closed,
}

impl TransportError {
    /// 返回稳定错误码。
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownTopic { .. } => codes::TRANSPORT_UNKNOWN_TOPIC,
            Self::Closed => codes::TRANSPORT_CLOSED,
        }
    }
}

/// 从主题读出的一条消息。
///
/// `value` 为 `None` 表示该键的墓碑记录（值缺席）；下游如何处理由
/// [`NilHandling`](crate::options::NilHandling) 策略决定。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// 来源主题。
    pub topic: String,
    /// 来源分区。
    pub partition: Partition,
    /// 分区内偏移量。
    pub offset: i64,
    /// 消息键。
    pub key: String,
    /// 消息值；`None` 表示值缺席。
    pub value: Option<Vec<u8>>,
}

/// 消息消费者契约。
///
/// 句柄被单一消费循环独占（`&mut self`），实现无须内部同步。
pub trait Consumer: Send {
    /// 订阅一组主题；主题必须已存在。
    fn subscribe(&mut self, topics: &[String]) -> Result<(), TransportError>;

    /// 拉取下一条消息；当前无可用消息时返回 `None`。
    fn poll(&mut self) -> Result<Option<Message>, TransportError>;

    /// 关闭消费者并释放订阅。
    fn close(&mut self) -> Result<(), TransportError>;
}

/// 消息生产者契约。
///
/// 实现必须线程安全：同一句柄会被多个发射路径共享。
pub trait Producer: Send + Sync {
    /// 向主题发射一条消息，分区由键的散列决定。
    fn emit(&self, topic: &str, key: &str, value: &[u8]) -> Result<(), TransportError>;

    /// 关闭生产者；关闭后 `emit` 返回 [`TransportError::Closed`]。
    fn close(&self) -> Result<(), TransportError>;
}

/// 主题元数据管理契约。
pub trait TopicManager: Send + Sync {
    /// 确保流主题存在；幂等。
    fn ensure_stream_exists(&self, topic: &str, npar: Partition) -> Result<(), TransportError>;

    /// 确保表主题（变更日志）存在；幂等。
    fn ensure_table_exists(&self, topic: &str, npar: Partition) -> Result<(), TransportError>;

    /// 查询主题的分区编号列表。
    fn partitions(&self, topic: &str) -> Result<Vec<Partition>, TransportError>;

    /// 关闭管理器；关闭后的任何操作返回 [`TransportError::Closed`]。
    fn close(&self) -> Result<(), TransportError>;
}

/// 消费者构建器：`(brokers, group, client_id)` → 消费者句柄。
pub type ConsumerBuilder = Arc<
    dyn Fn(&[String], &str, &str) -> Result<Box<dyn Consumer>, TransportError> + Send + Sync,
>;

/// 生产者构建器：`(brokers, client_id, hasher)` → 生产者句柄。
pub type ProducerBuilder = Arc<
    dyn Fn(&[String], &str, HasherBuilder) -> Result<Arc<dyn Producer>, TransportError>
        + Send
        + Sync,
>;

/// 主题管理器构建器：`(brokers)` → 主题管理器句柄。
pub type TopicManagerBuilder =
    Arc<dyn Fn(&[String]) -> Result<Arc<dyn TopicManager>, TransportError> + Send + Sync>;

/// 返回缺省消费者构建器（进程内 loopback）。
pub fn default_consumer_builder() -> ConsumerBuilder {
    Arc::new(|_brokers: &[String], group: &str, client_id: &str| {
        Ok(Box::new(loopback::LoopbackConsumer::attach(group, client_id))
            as Box<dyn Consumer>)
    })
}

/// 返回缺省生产者构建器（进程内 loopback）。
pub fn default_producer_builder() -> ProducerBuilder {
    Arc::new(|_brokers: &[String], client_id: &str, hasher: HasherBuilder| {
        Ok(Arc::new(loopback::LoopbackProducer::attach(client_id, hasher))
            as Arc<dyn Producer>)
    })
}

/// 返回缺省主题管理器构建器（进程内 loopback）。
pub fn default_topic_manager_builder() -> TopicManagerBuilder {
    Arc::new(|_brokers: &[String]| {
        Ok(Arc::new(loopback::LoopbackTopicManager::attach()) as Arc<dyn TopicManager>)
    })
}
