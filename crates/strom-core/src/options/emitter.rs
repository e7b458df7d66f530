//! Emitter 的选项族与装配入口。
//!
//! Emitter 只向主题生产消息、不持有本地状态，因此既没有存储槽位也没有
//! 消费者槽位：它是三类实体中唯一没有必选工厂依赖的，装配永远不会因
//! 缺失构建器而失败。

use std::sync::Arc;

use crate::codec::Codec;
use crate::error::OptionsError;
use crate::hasher::{HasherBuilder, default_hasher};
use crate::logger::{self, Logger};
use crate::transport::{self, ProducerBuilder, TopicManagerBuilder};

use super::DEFAULT_CLIENT_ID;

/// Emitter 的单条配置指令。
///
/// 套用语义与其余两个实体一致：构造无副作用，后写者胜。
pub enum EmitterOption {
    /// 替换日志器。
    Logger(Arc<dyn Logger>),
    /// 替换客户端标识。
    ClientId(String),
    /// 替换分区散列构造器。
    Hasher(HasherBuilder),
    /// 替换生产者构建器。
    ProducerBuilder(ProducerBuilder),
    /// 替换主题管理器构建器。
    TopicManagerBuilder(TopicManagerBuilder),
}

/// 使用指定日志器。
pub fn with_logger(logger: Arc<dyn Logger>) -> EmitterOption {
    EmitterOption::Logger(logger)
}

/// 使用指定客户端标识向 broker 表明身份。
pub fn with_client_id(client_id: impl Into<String>) -> EmitterOption {
    EmitterOption::ClientId(client_id.into())
}

/// 替换键到分区的散列构造器。
pub fn with_hasher(hasher: HasherBuilder) -> EmitterOption {
    EmitterOption::Hasher(hasher)
}

/// 替换缺省生产者构建器。
pub fn with_producer_builder(builder: ProducerBuilder) -> EmitterOption {
    EmitterOption::ProducerBuilder(builder)
}

/// 替换缺省主题管理器构建器。
pub fn with_topic_manager_builder(builder: TopicManagerBuilder) -> EmitterOption {
    EmitterOption::TopicManagerBuilder(builder)
}

struct EmitterAccumulator {
    logger: Arc<dyn Logger>,
    client_id: String,
    hasher: HasherBuilder,
    producer: Option<ProducerBuilder>,
    topic_manager: Option<TopicManagerBuilder>,
}

impl EmitterAccumulator {
    fn seeded() -> Self {
        Self {
            logger: logger::default(),
            client_id: DEFAULT_CLIENT_ID.to_owned(),
            hasher: default_hasher(),
            producer: None,
            topic_manager: None,
        }
    }
}

impl EmitterOption {
    fn apply(self, acc: &mut EmitterAccumulator) {
        match self {
            Self::Logger(logger) => acc.logger = logger,
            Self::ClientId(client_id) => acc.client_id = client_id,
            Self::Hasher(hasher) => acc.hasher = hasher,
            Self::ProducerBuilder(builder) => acc.producer = Some(builder),
            Self::TopicManagerBuilder(builder) => acc.topic_manager = Some(builder),
        }
    }
}

/// Emitter 的已装配配置。
pub struct EmitterConfig {
    codec: Arc<dyn Codec>,
    logger: Arc<dyn Logger>,
    client_id: String,
    hasher: HasherBuilder,
    producer: ProducerBuilder,
    topic_manager: TopicManagerBuilder,
}

impl EmitterConfig {
    /// 发射值编解码器。
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

    /// 分区散列构造器。
    pub fn hasher(&self) -> &HasherBuilder {
        &self.hasher
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

/// 装配 Emitter 配置。
///
/// 算法见[模块文档](super)。Emitter 没有必选槽位，当前实现不会失败；
/// 返回 `Result` 以与其余实体的装配入口保持同一签名形态，也为将来的
/// 校验保留余地。
pub fn resolve(
    codec: Arc<dyn Codec>,
    options: impl IntoIterator<Item = EmitterOption>,
) -> Result<EmitterConfig, OptionsError> {
    let mut acc = EmitterAccumulator::seeded();
    for option in options {
        option.apply(&mut acc);
    }

    Ok(EmitterConfig {
        codec,
        logger: acc.logger,
        client_id: acc.client_id,
        hasher: acc.hasher,
        producer: acc
            .producer
            .unwrap_or_else(transport::default_producer_builder),
        topic_manager: acc
            .topic_manager
            .unwrap_or_else(transport::default_topic_manager_builder),
    })
}
