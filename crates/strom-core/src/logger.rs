use std::sync::Arc;

/// 对象安全的日志契约。
///
/// # 设计背景（Why）
/// - 装配层与恢复循环都需要向宿主日志系统输出诊断信息，但不应绑定具体后端；
///   通过最小 trait 桥接 `tracing`、`log` 或自研实现。
///
/// # 契约说明（What）
/// - 所有方法需线程安全且快速返回，日志格式由实现决定；
/// - 实现必须满足 `Send + Sync + 'static`，以便作为配置记录的一部分跨线程传递。
///
/// # 风险提示（Trade-offs）
/// - 接口只接受已格式化的消息字符串，牺牲结构化字段换取最小依赖面；
///   需要结构化输出的实现可在内部解析或直接改用 `tracing` 宏。
pub trait Logger: Send + Sync + 'static {
    /// 输出 DEBUG 级别日志。
    fn debug(&self, message: &str);

    /// 输出 INFO 级别日志。
    fn info(&self, message: &str);

    /// 输出 WARN 级别日志。
    fn warn(&self, message: &str);

    /// 输出 ERROR 级别日志。
    fn error(&self, message: &str);
}

/// 将日志转发给 `tracing` 生态的缺省实现。
///
/// 所有事件携带 `target = "strom"`，订阅端可按 target 过滤本工具包的输出。
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "strom", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "strom", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "strom", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "strom", "{message}");
    }
}

/// 返回进程缺省日志器。
///
/// 装配器在播种阶段使用该实现；调用方可通过各实体的 `with_logger` 选项整体替换。
/// 实现为零尺寸类型，重复构造不产生额外开销。
pub fn default() -> Arc<dyn Logger> {
    Arc::new(TracingLogger)
}
