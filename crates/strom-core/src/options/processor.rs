//! Processor 的选项族与装配入口。
//!
//! 选项构造函数与 [`view`](super::view)、[`emitter`](super::emitter) 模块
//! 同名同义但互不相通：每个函数只产出本实体的选项值，语义约束全部推迟到
//! [`resolve`] 执行时。

use std::sync::Arc;

use crate::common::Group;
use crate::error::{EntityKind, OptionsError};
use crate::hasher::{HasherBuilder, default_hasher};
use crate::logger::{self, Logger};
use crate::storage::StorageBuilder;
use crate::transport::{
    self, ConsumerBuilder, ProducerBuilder, TopicManagerBuilder,
};

use super::{
    DEFAULT_CLIENT_ID, DEFAULT_PARTITION_CHANNEL_SIZE, NilHandling, UpdateCallback,
    default_update_callback,
};

/// Processor 的单条配置指令。
///
/// 每个变体在套用时恰好改写累加器的一个字段，构造阶段无副作用、无校验；
/// 同一字段被多次指定时，调用方顺序中靠后者生效。
pub enum ProcessorOption {
    /// 替换日志器。
    Logger(Arc<dyn Logger>),
    /// 替换客户端标识。
    ClientId(String),
    /// 替换恢复路径的更新回调。
    UpdateCallback(UpdateCallback),
    /// 替换分区通道缓冲容量。
    PartitionChannelSize(usize),
    /// 替换分区散列构造器。
    Hasher(HasherBuilder),
    /// 替换值缺席处理策略。
    NilHandling(NilHandling),
    /// 设置分区存储构建器（必选依赖）。
    StorageBuilder(StorageBuilder),
    /// 替换消费者构建器。
    ConsumerBuilder(ConsumerBuilder),
    /// 替换生产者构建器。
    ProducerBuilder(ProducerBuilder),
    /// 替换主题管理器构建器。
    TopicManagerBuilder(TopicManagerBuilder),
}

/// 使用指定日志器。
pub fn with_logger(logger: Arc<dyn Logger>) -> ProcessorOption {
    ProcessorOption::Logger(logger)
}

/// 使用指定客户端标识向 broker 表明身份。
pub fn with_client_id(client_id: impl Into<String>) -> ProcessorOption {
    ProcessorOption::ClientId(client_id.into())
}

/// 使用指定回调处理恢复期间读到的每条变更日志消息。
pub fn with_update_callback(callback: UpdateCallback) -> ProcessorOption {
    ProcessorOption::UpdateCallback(callback)
}

/// 替换分区通道的缓冲容量。容量为 0 时通道退化为同步交接，常用于测试。
pub fn with_partition_channel_size(size: usize) -> ProcessorOption {
    ProcessorOption::PartitionChannelSize(size)
}

/// 替换键到分区的散列构造器。
pub fn with_hasher(hasher: HasherBuilder) -> ProcessorOption {
    ProcessorOption::Hasher(hasher)
}

/// 配置值缺席消息的处理策略（缺省 Ignore）。
pub fn with_nil_handling(policy: NilHandling) -> ProcessorOption {
    ProcessorOption::NilHandling(policy)
}

/// 设置各分区本地存储的构建器。Processor 的必选依赖。
pub fn with_storage_builder(builder: StorageBuilder) -> ProcessorOption {
    ProcessorOption::StorageBuilder(builder)
}

/// 替换缺省消费者构建器。
pub fn with_consumer_builder(builder: ConsumerBuilder) -> ProcessorOption {
    ProcessorOption::ConsumerBuilder(builder)
}

/// 替换缺省生产者构建器。
pub fn with_producer_builder(builder: ProducerBuilder) -> ProcessorOption {
    ProcessorOption::ProducerBuilder(builder)
}

/// 替换缺省主题管理器构建器。
pub fn with_topic_manager_builder(builder: TopicManagerBuilder) -> ProcessorOption {
    ProcessorOption::TopicManagerBuilder(builder)
}

/// 装配期间的累加器：标量字段先行播种，工厂槽位以 `Option` 表达未设置。
struct ProcessorAccumulator {
    logger: Arc<dyn Logger>,
    client_id: String,
    update_callback: UpdateCallback,
    partition_channel_size: usize,
    hasher: HasherBuilder,
    nil_handling: NilHandling,
    storage: Option<StorageBuilder>,
    consumer: Option<ConsumerBuilder>,
    producer: Option<ProducerBuilder>,
    topic_manager: Option<TopicManagerBuilder>,
}

impl ProcessorAccumulator {
    fn seeded() -> Self {
        Self {
            logger: logger::default(),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            update_callback: default_update_callback(),
            partition_channel_size: DEFAULT_PARTITION_CHANNEL_SIZE,
            hasher: default_hasher(),
            nil_handling: NilHandling::default(),
            storage: None,
            consumer: None,
            producer: None,
            topic_manager: None,
        }
    }
}

impl ProcessorOption {
    fn apply(self, acc: &mut ProcessorAccumulator) {
        match self {
            Self::Logger(logger) => acc.logger = logger,
            Self::ClientId(client_id) => acc.client_id = client_id,
            Self::UpdateCallback(callback) => acc.update_callback = callback,
            Self::PartitionChannelSize(size) => acc.partition_channel_size = size,
            Self::Hasher(hasher) => acc.hasher = hasher,
            Self::NilHandling(policy) => acc.nil_handling = policy,
            Self::StorageBuilder(builder) => acc.storage = Some(builder),
            Self::ConsumerBuilder(builder) => acc.consumer = Some(builder),
            Self::ProducerBuilder(builder) => acc.producer = Some(builder),
            Self::TopicManagerBuilder(builder) => acc.topic_manager = Some(builder),
        }
    }
}

/// Processor 的已装配配置。
///
/// 所有工厂槽位均为非空：或来自调用方选项，或来自文档化的缺省回填。
/// 记录在装配结束后不再变化，可安全移交给实体构造器。
pub struct ProcessorConfig {
    group: Group,
    logger: Arc<dyn Logger>,
    client_id: String,
    update_callback: UpdateCallback,
    partition_channel_size: usize,
    hasher: HasherBuilder,
    nil_handling: NilHandling,
    storage: StorageBuilder,
    consumer: ConsumerBuilder,
    producer: ProducerBuilder,
    topic_manager: TopicManagerBuilder,
}

impl ProcessorConfig {
    /// 所属消费组。
    pub fn group(&self) -> &Group {
        &self.group
    }

    /// 日志器句柄。
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// 客户端标识。
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// 恢复路径的更新回调。
    pub fn update_callback(&self) -> &UpdateCallback {
        &self.update_callback
    }

    /// 分区通道缓冲容量。
    pub fn partition_channel_size(&self) -> usize {
        self.partition_channel_size
    }

    /// 分区散列构造器。
    pub fn hasher(&self) -> &HasherBuilder {
        &self.hasher
    }

    /// 值缺席处理策略。
    pub fn nil_handling(&self) -> NilHandling {
        self.nil_handling
    }

    /// 分区存储构建器。
    pub fn storage_builder(&self) -> &StorageBuilder {
        &self.storage
    }

    /// 消费者构建器。
    pub fn consumer_builder(&self) -> &ConsumerBuilder {
        &self.consumer
    }

    /// 生产者构建器。
    pub fn producer_builder(&self) -> &ProducerBuilder {
        &self.producer
    }

    /// 主题管理器构建器。
    pub fn topic_manager_builder(&self) -> &TopicManagerBuilder {
        &self.topic_manager
    }
}

impl std::fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("group", &self.group)
            .field("client_id", &self.client_id)
            .field("partition_channel_size", &self.partition_channel_size)
            .field("nil_handling", &self.nil_handling)
            .finish_non_exhaustive()
    }
}

/// 装配 Processor 配置。
///
/// 算法见[模块文档](super)；装配同步完成、无阻塞点，失败时立即返回错误，
/// 不产生部分装配结果。
///
/// # Errors
///
/// 套用全部选项后 storage 槽位仍为空时返回
/// [`OptionsError::MissingStorageBuilder`]。
pub fn resolve(
    group: &Group,
    options: impl IntoIterator<Item = ProcessorOption>,
) -> Result<ProcessorConfig, OptionsError> {
    let mut acc = ProcessorAccumulator::seeded();
    for option in options {
        option.apply(&mut acc);
    }

    let storage = acc.storage.ok_or(OptionsError::MissingStorageBuilder {
        entity: EntityKind::Processor,
    })?;

    Ok(ProcessorConfig {
        group: group.clone(),
        logger: acc.logger,
        client_id: acc.client_id,
        update_callback: acc.update_callback,
        partition_channel_size: acc.partition_channel_size,
        hasher: acc.hasher,
        nil_handling: acc.nil_handling,
        storage,
        consumer: acc
            .consumer
            .unwrap_or_else(transport::default_consumer_builder),
        producer: acc
            .producer
            .unwrap_or_else(transport::default_producer_builder),
        topic_manager: acc
            .topic_manager
            .unwrap_or_else(transport::default_topic_manager_builder),
    })
}
