use core::fmt;

use thiserror::Error;

/// 配置装配所服务的实体种类。
///
/// # 契约说明（What）
/// - 仅用于错误信息与日志中的责任定位，`Display` 输出稳定的小写名称；
/// - 三类实体的选项族互不相通，装配入口分别位于
///   [`processor`](crate::options::processor)、[`view`](crate::options::view)
///   与 [`emitter`](crate::options::emitter) 模块。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// 消费消息流并维护分区化本地状态的处理器。
    Processor,
    /// 通过更新回调保持同步的只读物化副本。
    View,
    /// 仅向主题生产消息、不持有本地存储的发射器。
    Emitter,
}

impl EntityKind {
    /// 返回稳定的小写名称。
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Processor => "processor",
            Self::View => "view",
            Self::Emitter => "emitter",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 配置装配阶段的错误域。
///
/// # 设计背景（Why）
/// - 装配是同步、一次性的：任何错误都必须立即返回给构造调用方，不存在重试
///   或部分成功；把错误收敛为封闭枚举，调用方可以精确匹配并给出修复指引。
/// - 协作方（存储、传输、编解码）各自维护独立错误域，装配层既不包装也不转译。
///
/// # 契约说明（What）
/// - 所有变体均为致命错误，装配以全有或全无方式结束；
/// - [`OptionsError::code`] 暴露 `<域>.<语义>` 形式的稳定错误码，供日志与
///   告警系统聚合，见 [`codes`]。
///
/// # 设计权衡（Trade-offs）
/// - 变体刻意保持粗粒度：缺失必选构建器只区分实体种类而不区分调用位置，
///   避免错误面随选项族膨胀。
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// Processor 或 View 在套用全部选项后仍未设置 storage 构建器。
    ///
    /// 该校验发生在装配第 3 步（校验必选字段），早于缺省回填；Emitter 没有
    /// 必选工厂槽位，永远不会产生此错误。
    #[error("{entity}: storage builder not set")]
    MissingStorageBuilder {
        /// 缺失构建器的实体种类。
        entity: EntityKind,
    },

    /// 调用方显式包裹了一个缺席的 topic manager 实例。
    ///
    /// 与“未设置”语义严格区分：未设置触发缺省回填，显式包裹空实例则在
    /// 选项套用时立即失败，绝不静默退回缺省实现。
    #[error("topic manager cannot be nil")]
    NilTopicManager,
}

impl OptionsError {
    /// 返回稳定错误码。
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingStorageBuilder { .. } => codes::OPTIONS_MISSING_STORAGE_BUILDER,
            Self::NilTopicManager => codes::OPTIONS_NIL_TOPIC_MANAGER,
        }
    }
}

/// 全 crate 共享的稳定错误码常量，确保可观测性系统拥有不变的识别符。
///
/// 错误码遵循 `<域>.<语义>` 命名约定，跨组件日志可据此检索与聚合。
pub mod codes {
    /// Processor/View 装配缺失 storage 构建器。
    pub const OPTIONS_MISSING_STORAGE_BUILDER: &str = "options.missing_storage_builder";
    /// 选项显式包裹了空的 topic manager 实例。
    pub const OPTIONS_NIL_TOPIC_MANAGER: &str = "options.nil_topic_manager";
    /// 存储引擎 I/O 失败。
    pub const STORAGE_IO: &str = "storage.io";
    /// 传输层访问了未创建的主题。
    pub const TRANSPORT_UNKNOWN_TOPIC: &str = "transport.unknown_topic";
    /// 传输句柄已关闭。
    pub const TRANSPORT_CLOSED: &str = "transport.closed";
    /// 编解码入参类型与实现不匹配。
    pub const CODEC_TYPE_MISMATCH: &str = "codec.type_mismatch";
    /// 字节序列无法解码。
    pub const CODEC_DECODE: &str = "codec.decode";
}
