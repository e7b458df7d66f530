//! View 的选项族与装配入口。
//!
//! View 是某张分区化表的只读物化副本，装配上与 Processor 的差异有三处：
//! 没有生产者槽位、表编解码器由构造调用直接给出，以及主题管理器选项包裹
//! 的是现成实例而非构建器（见 [`with_topic_manager`]）。

use std::sync::Arc;

use crate::codec::Codec;
use crate::common::Table;
use crate::error::{EntityKind, OptionsError};
use crate::hasher::{HasherBuilder, default_hasher};
use crate::logger::{self, Logger};
use crate::storage::StorageBuilder;
use crate::transport::{self, ConsumerBuilder, TopicManager, TopicManagerBuilder};

use super::{
    DEFAULT_CLIENT_ID, DEFAULT_PARTITION_CHANNEL_SIZE, UpdateCallback, default_update_callback,
};

/// View 的单条配置指令。
///
/// 套用语义与 [`ProcessorOption`](super::processor::ProcessorOption) 一致：
/// 构造无副作用，后写者胜；唯一的例外是 [`ViewOption::TopicManager`]，
/// 它在套用时即可失败（见 [`with_topic_manager`]）。
pub enum ViewOption {
    /// 替换日志器。
    Logger(Arc<dyn Logger>),
    /// 替换客户端标识。
    ClientId(String),
    /// 替换更新回调。
    UpdateCallback(UpdateCallback),
    /// 替换分区通道缓冲容量。
    PartitionChannelSize(usize),
    /// 替换分区散列构造器。
    Hasher(HasherBuilder),
    /// 设置分区存储构建器（必选依赖）。
    StorageBuilder(StorageBuilder),
    /// 替换消费者构建器。
    ConsumerBuilder(ConsumerBuilder),
    /// 包裹调用方提供的主题管理器实例。
    TopicManager(Option<Arc<dyn TopicManager>>),
}

/// 使用指定日志器。
pub fn with_logger(logger: Arc<dyn Logger>) -> ViewOption {
    ViewOption::Logger(logger)
}

/// 使用指定客户端标识向 broker 表明身份。
pub fn with_client_id(client_id: impl Into<String>) -> ViewOption {
    ViewOption::ClientId(client_id.into())
}

/// 使用指定回调处理同步期间读到的每条变更日志消息。
pub fn with_update_callback(callback: UpdateCallback) -> ViewOption {
    ViewOption::UpdateCallback(callback)
}

/// 替换分区通道的缓冲容量。容量为 0 时通道退化为同步交接，常用于测试。
pub fn with_partition_channel_size(size: usize) -> ViewOption {
    ViewOption::PartitionChannelSize(size)
}

/// 替换键到分区的散列构造器。
pub fn with_hasher(hasher: HasherBuilder) -> ViewOption {
    ViewOption::Hasher(hasher)
}

/// 设置各分区本地存储的构建器。View 的必选依赖。
pub fn with_storage_builder(builder: StorageBuilder) -> ViewOption {
    ViewOption::StorageBuilder(builder)
}

/// 替换缺省消费者构建器。
pub fn with_consumer_builder(builder: ConsumerBuilder) -> ViewOption {
    ViewOption::ConsumerBuilder(builder)
}

/// 包裹调用方提供的主题管理器实例。
///
/// # 契约说明（What）
/// - `Some(tm)`：装配后的主题管理器构建器对任意 broker 列表都返回该实例；
/// - `None`：选项在**套用时**立即以
///   [`OptionsError::NilTopicManager`] 失败——显式给出的空实例是调用方
///   错误，绝不静默退回缺省回填（后者只服务于“未设置”）。
pub fn with_topic_manager(topic_manager: Option<Arc<dyn TopicManager>>) -> ViewOption {
    ViewOption::TopicManager(topic_manager)
}

struct ViewAccumulator {
    logger: Arc<dyn Logger>,
    client_id: String,
    update_callback: UpdateCallback,
    partition_channel_size: usize,
    hasher: HasherBuilder,
    storage: Option<StorageBuilder>,
    consumer: Option<ConsumerBuilder>,
    topic_manager: Option<TopicManagerBuilder>,
}

impl ViewAccumulator {
    fn seeded() -> Self {
        Self {
            logger: logger::default(),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            update_callback: default_update_callback(),
            partition_channel_size: DEFAULT_PARTITION_CHANNEL_SIZE,
            hasher: default_hasher(),
            storage: None,
            consumer: None,
            topic_manager: None,
        }
    }
}

impl ViewOption {
    fn apply(self, acc: &mut ViewAccumulator) -> Result<(), OptionsError> {
        match self {
            Self::Logger(logger) => acc.logger = logger,
            Self::ClientId(client_id) => acc.client_id = client_id,
            Self::UpdateCallback(callback) => acc.update_callback = callback,
            Self::PartitionChannelSize(size) => acc.partition_channel_size = size,
            Self::Hasher(hasher) => acc.hasher = hasher,
            Self::StorageBuilder(builder) => acc.storage = Some(builder),
            Self::ConsumerBuilder(builder) => acc.consumer = Some(builder),
            Self::TopicManager(Some(instance)) => {
                let builder: TopicManagerBuilder =
                    Arc::new(move |_brokers: &[String]| Ok(instance.clone()));
                acc.topic_manager = Some(builder);
            }
            Self::TopicManager(None) => return Err(OptionsError::NilTopicManager),
        }
        Ok(())
    }
}

/// View 的已装配配置。
pub struct ViewConfig {
    table: Table,
    codec: Arc<dyn Codec>,
    logger: Arc<dyn Logger>,
    client_id: String,
    update_callback: UpdateCallback,
    partition_channel_size: usize,
    hasher: HasherBuilder,
    storage: StorageBuilder,
    consumer: ConsumerBuilder,
    topic_manager: TopicManagerBuilder,
}

impl ViewConfig {
    /// 物化的表主题。
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// 表值编解码器。
    pub fn codec(&self) -> &Arc<dyn Codec> {
        &self.codec
    }

    /// 日志器句柄。
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// 客户端标识。
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// 同步路径的更新回调。
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

    /// 分区存储构建器。
    pub fn storage_builder(&self) -> &StorageBuilder {
        &self.storage
    }

    /// 消费者构建器。
    pub fn consumer_builder(&self) -> &ConsumerBuilder {
        &self.consumer
    }

    /// 主题管理器构建器。
    pub fn topic_manager_builder(&self) -> &TopicManagerBuilder {
        &self.topic_manager
    }
}

impl std::fmt::Debug for ViewConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewConfig")
            .field("table", &self.table)
            .field("client_id", &self.client_id)
            .field("partition_channel_size", &self.partition_channel_size)
            .finish_non_exhaustive()
    }
}

/// 装配 View 配置。
///
/// 算法见[模块文档](super)。与 Processor 的区别：表主题与编解码器由构造
/// 调用直接给出，不经选项；没有生产者槽位。
///
/// # Errors
///
/// - 选项套用阶段：[`OptionsError::NilTopicManager`]（显式空实例）；
/// - 校验阶段：[`OptionsError::MissingStorageBuilder`]（storage 槽位为空）。
pub fn resolve(
    table: &Table,
    codec: Arc<dyn Codec>,
    options: impl IntoIterator<Item = ViewOption>,
) -> Result<ViewConfig, OptionsError> {
    let mut acc = ViewAccumulator::seeded();
    for option in options {
        option.apply(&mut acc)?;
    }

    let storage = acc.storage.ok_or(OptionsError::MissingStorageBuilder {
        entity: EntityKind::View,
    })?;

    Ok(ViewConfig {
        table: table.clone(),
        codec,
        logger: acc.logger,
        client_id: acc.client_id,
        update_callback: acc.update_callback,
        partition_channel_size: acc.partition_channel_size,
        hasher: acc.hasher,
        storage,
        consumer: acc
            .consumer
            .unwrap_or_else(transport::default_consumer_builder),
        topic_manager: acc
            .topic_manager
            .unwrap_or_else(transport::default_topic_manager_builder),
    })
}
