use std::sync::Arc;

/// 32 位分区散列状态的契约。
///
/// # 设计背景（Why）
/// - 键到分区的映射必须跨进程、跨实例完全确定：同一个键在任何一个实例上都
///   要路由到同一个分区，否则状态恢复与查询将彼此错位。
///
/// # 契约说明（What）
/// - `write` 按字节流式吸收输入，`sum32` 返回当前摘要且不改变状态；
/// - `reset` 将状态恢复到初始值，便于复用同一实例处理多个键；
/// - 实现必须是纯函数式的确定性算法，禁止引入随机种子。
pub trait PartitionHasher: Send {
    /// 吸收一段输入字节。
    fn write(&mut self, bytes: &[u8]);

    /// 返回当前 32 位摘要。
    fn sum32(&self) -> u32;

    /// 重置为初始状态。
    fn reset(&mut self);
}

/// 分区散列构造器：每次调用产出一个全新的散列状态。
pub type HasherBuilder = Arc<dyn Fn() -> Box<dyn PartitionHasher> + Send + Sync>;

const FNV32A_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32A_PRIME: u32 = 0x0100_0193;

/// 32 位 FNV-1a 散列状态。
///
/// 参数取自 FNV 参考定义（offset basis `0x811c9dc5`、prime `0x01000193`），
/// 任何独立构造的实例对相同输入产出相同摘要，是缺省分区路由的确定性来源。
#[derive(Clone, Debug)]
pub struct Fnv32a {
    state: u32,
}

impl Fnv32a {
    /// 以初始偏移量构造新状态。
    pub fn new() -> Self {
        Self {
            state: FNV32A_OFFSET_BASIS,
        }
    }
}

impl Default for Fnv32a {
    fn default() -> Self {
        Self::new()
    }
}

impl PartitionHasher for Fnv32a {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(FNV32A_PRIME);
        }
    }

    fn sum32(&self) -> u32 {
        self.state
    }

    fn reset(&mut self) {
        self.state = FNV32A_OFFSET_BASIS;
    }
}

/// 返回缺省分区散列构造器（32 位 FNV-1a）。
///
/// 装配器在播种阶段使用该构造器；两次独立调用返回的构造器功能等价，
/// 对相同字节序列产出相同摘要。
pub fn default_hasher() -> HasherBuilder {
    Arc::new(|| Box::new(Fnv32a::new()))
}
