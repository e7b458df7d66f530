#![deny(unsafe_code)]
#![doc = "strom-core: 基于变更日志（change log）的流处理工具包核心契约。"]
#![doc = ""]
#![doc = "== 定位与边界 =="]
#![doc = "本 crate 承载三类客户端实体（Processor / View / Emitter）的配置装配层："]
#![doc = "调用方以有序的选项列表描述诉求，装配器在默认值之上按序套用、校验必选依赖、"]
#![doc = "回填缺省工厂，最终产出完整且自洽的配置记录。装配过程不做任何 I/O，"]
#![doc = "也不启动消费或恢复循环——那些属于外部子系统。"]
#![doc = ""]
#![doc = "== 协作方契约 =="]
#![doc = "持久化存储引擎、broker 后端的消费者/生产者实现与分区恢复循环均为外部协作方；"]
#![doc = "本 crate 仅定义它们的最小契约（[`storage::Storage`]、[`transport::Consumer`] 等），"]
#![doc = "并提供进程内 loopback 与内存实现作为缺省回填与测试替身。"]

pub mod codec;
pub mod common;
pub mod error;
pub mod hasher;
pub mod logger;
pub mod options;
pub mod storage;
pub mod transport;

pub use codec::Codec;
pub use common::{Group, Partition, Table};
pub use error::{EntityKind, OptionsError};
pub use hasher::{HasherBuilder, PartitionHasher, default_hasher};
pub use logger::Logger;
pub use options::{NilHandling, UpdateCallback, default_update, emitter, processor, view};
pub use storage::{Storage, StorageBuilder};
pub use transport::{
    Consumer, ConsumerBuilder, Message, Producer, ProducerBuilder, TopicManager,
    TopicManagerBuilder,
};
