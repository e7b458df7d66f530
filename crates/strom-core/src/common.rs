use core::fmt;

/// 分区编号。与主流 broker 协议保持一致采用 `i32`，负值不会出现在正常路径上。
pub type Partition = i32;

/// 消费组名，同时标识一个 Processor 的状态主题归属。
///
/// # 设计背景（Why）
/// - 组名是路由与持久化布局的共同锚点：消费组订阅、状态主题命名与本地存储目录
///   均由它派生，使用 newtype 避免与普通字符串混用。
///
/// # 契约说明（What）
/// - 组名在工具包内被视为不透明标识，装配层不做字符集校验；
/// - [`Group::table`] 派生该组的变更日志主题名，格式固定为 `<group>-table`，
///   该格式是对外文档化的持久契约，运维可据此直接定位主题。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Group(String);

impl Group {
    /// 构造组名。
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 以字符串视图访问组名。
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 派生该组状态表的变更日志主题名。
    pub fn table(&self) -> Table {
        Table(format!("{}-table", self.0))
    }
}

impl From<&str> for Group {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 表主题名：承载某张分区化键值表的变更日志主题。
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Table(String);

impl Table {
    /// 构造表主题名。
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// 以字符串视图访问主题名。
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Table {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
