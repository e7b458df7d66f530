//! 进程内 loopback 传输。
//!
//! # 模块定位（Why）
//! - 缺省传输构建器需要一个无须外部 broker 即可工作的实现：本地开发、测试
//!   与单进程部署直接通过进程内总线路由消息；
//! - 分区路由复用与 broker 后端完全相同的散列语义（键散列对分区数取模），
//!   保证切换后端时键的归属不变。
//!
//! # 共享模型（What）
//! - 所有句柄挂接到同一个进程级 [`LoopbackHub`]；hub 经 `OnceLock` 一次性
//!   构造，之后只读共享，主题表内部以 `parking_lot::RwLock` 同步；
//! - 消费者按订阅顺序轮询主题与分区，保证单分区内的消息顺序。

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use super::{Consumer, Message, Producer, TopicManager, TransportError};
use crate::common::Partition;
use crate::hasher::HasherBuilder;

static HUB: OnceLock<Arc<LoopbackHub>> = OnceLock::new();

/// 返回进程级 loopback 总线。
pub fn process_hub() -> Arc<LoopbackHub> {
    HUB.get_or_init(|| Arc::new(LoopbackHub::new())).clone()
}

#[derive(Default)]
struct PartitionQueue {
    messages: VecDeque<Message>,
    next_offset: i64,
}

struct TopicState {
    queues: Vec<PartitionQueue>,
}

impl TopicState {
    fn new(npar: Partition) -> Self {
        let npar = npar.max(1) as usize;
        Self {
            queues: (0..npar).map(|_| PartitionQueue::default()).collect(),
        }
    }
}

/// 进程内消息总线：主题 → 分区队列。
///
/// 生产者写入、消费者弹出均在锁内完成；队列无界，背压治理属于
/// broker 后端的职责范围，这里不做模拟。
pub struct LoopbackHub {
    topics: RwLock<HashMap<String, TopicState>>,
}

impl LoopbackHub {
    fn new() -> Self {
        Self {
            topics: RwLock::new(HashMap::new()),
        }
    }

    /// 幂等地创建主题；已存在时保留原有分区数。
    pub fn ensure_topic(&self, topic: &str, npar: Partition) {
        self.topics
            .write()
            .entry(topic.to_owned())
            .or_insert_with(|| TopicState::new(npar));
    }

    /// 查询主题的分区编号列表。
    pub fn partitions(&self, topic: &str) -> Result<Vec<Partition>, TransportError> {
        let topics = self.topics.read();
        let state = topics.get(topic).ok_or_else(|| TransportError::UnknownTopic {
            topic: topic.to_owned(),
        })?;
        Ok((0..state.queues.len() as Partition).collect())
    }

    /// 向主题追加一条消息，返回其落点 (partition, offset)。
    pub fn publish(
        &self,
        topic: &str,
        key: &str,
        value: Option<Vec<u8>>,
        hasher: &HasherBuilder,
    ) -> Result<(Partition, i64), TransportError> {
        let mut topics = self.topics.write();
        let state = topics.get_mut(topic).ok_or_else(|| TransportError::UnknownTopic {
            topic: topic.to_owned(),
        })?;
        let mut hash = hasher();
        hash.write(key.as_bytes());
        let partition = (hash.sum32() % state.queues.len() as u32) as Partition;
        let queue = &mut state.queues[partition as usize];
        let offset = queue.next_offset;
        queue.next_offset += 1;
        queue.messages.push_back(Message {
            topic: topic.to_owned(),
            partition,
            offset,
            key: key.to_owned(),
            value,
        });
        Ok((partition, offset))
    }

    fn pop(&self, topic: &str) -> Option<Message> {
        let mut topics = self.topics.write();
        let state = topics.get_mut(topic)?;
        state
            .queues
            .iter_mut()
            .find_map(|queue| queue.messages.pop_front())
    }
}

/// 挂接在进程总线上的消费者。
pub struct LoopbackConsumer {
    hub: Arc<LoopbackHub>,
    group: String,
    topics: Vec<String>,
    cursor: usize,
    closed: bool,
}

impl LoopbackConsumer {
    /// 以消费组与客户端标识挂接到进程总线。
    pub fn attach(group: &str, _client_id: &str) -> Self {
        Self {
            hub: process_hub(),
            group: group.to_owned(),
            topics: Vec::new(),
            cursor: 0,
            closed: false,
        }
    }

    /// 返回该消费者的消费组名。
    pub fn group(&self) -> &str {
        &self.group
    }
}

impl Consumer for LoopbackConsumer {
    fn subscribe(&mut self, topics: &[String]) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        for topic in topics {
            // 订阅前校验主题存在，提前暴露配置错误。
            self.hub.partitions(topic)?;
        }
        self.topics.extend(topics.iter().cloned());
        Ok(())
    }

    fn poll(&mut self) -> Result<Option<Message>, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        for step in 0..self.topics.len() {
            let index = (self.cursor + step) % self.topics.len();
            if let Some(message) = self.hub.pop(&self.topics[index]) {
                self.cursor = (index + 1) % self.topics.len();
                return Ok(Some(message));
            }
        }
        Ok(None)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        self.topics.clear();
        Ok(())
    }
}

/// 挂接在进程总线上的生产者。
pub struct LoopbackProducer {
    hub: Arc<LoopbackHub>,
    hasher: HasherBuilder,
    closed: AtomicBool,
}

impl LoopbackProducer {
    /// 以客户端标识与分区散列构造器挂接到进程总线。
    pub fn attach(_client_id: &str, hasher: HasherBuilder) -> Self {
        Self {
            hub: process_hub(),
            hasher,
            closed: AtomicBool::new(false),
        }
    }
}

impl Producer for LoopbackProducer {
    fn emit(&self, topic: &str, key: &str, value: &[u8]) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        self.hub
            .publish(topic, key, Some(value.to_vec()), &self.hasher)
            .map(|_| ())
    }

    fn close(&self) -> Result<(), TransportError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

/// 挂接在进程总线上的主题管理器。
pub struct LoopbackTopicManager {
    hub: Arc<LoopbackHub>,
    closed: AtomicBool,
}

impl LoopbackTopicManager {
    /// 挂接到进程总线。
    pub fn attach() -> Self {
        Self {
            hub: process_hub(),
            closed: AtomicBool::new(false),
        }
    }

    fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        Ok(())
    }
}

impl TopicManager for LoopbackTopicManager {
    fn ensure_stream_exists(&self, topic: &str, npar: Partition) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.hub.ensure_topic(topic, npar);
        Ok(())
    }

    fn ensure_table_exists(&self, topic: &str, npar: Partition) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.hub.ensure_topic(topic, npar);
        Ok(())
    }

    fn partitions(&self, topic: &str) -> Result<Vec<Partition>, TransportError> {
        self.ensure_open()?;
        self.hub.partitions(topic)
    }

    fn close(&self) -> Result<(), TransportError> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::default_hasher;

    /// 验证：向未创建的主题发布立即失败。
    #[test]
    fn publish_to_unknown_topic_fails() {
        let hub = LoopbackHub::new();
        let err = hub
            .publish("missing", "k", None, &default_hasher())
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::UnknownTopic {
                topic: "missing".into()
            }
        );
    }

    /// 验证：相同键总是落到相同分区（散列确定性在路由层生效）。
    #[test]
    fn same_key_routes_to_same_partition() {
        let hub = LoopbackHub::new();
        hub.ensure_topic("t", 8);
        let hasher = default_hasher();
        let (first, _) = hub.publish("t", "key", None, &hasher).unwrap();
        let (second, _) = hub.publish("t", "key", None, &hasher).unwrap();
        assert_eq!(first, second);
    }

    /// 验证：ensure_topic 幂等，重复创建不重置分区数。
    #[test]
    fn ensure_topic_is_idempotent() {
        let hub = LoopbackHub::new();
        hub.ensure_topic("t", 4);
        hub.ensure_topic("t", 16);
        assert_eq!(hub.partitions("t").unwrap().len(), 4);
    }

    /// 验证：偏移量按分区独立计数，每个分区内从 0 起连续递增。
    #[test]
    fn offsets_are_contiguous_within_each_partition() {
        use std::collections::HashMap;

        let hub = LoopbackHub::new();
        hub.ensure_topic("t", 4);
        let hasher = default_hasher();
        for index in 0..24 {
            hub.publish("t", &format!("key-{index}"), None, &hasher)
                .unwrap();
        }
        let mut seen: HashMap<Partition, Vec<i64>> = HashMap::new();
        while let Some(message) = hub.pop("t") {
            seen.entry(message.partition).or_default().push(message.offset);
        }
        assert!(seen.len() > 1, "键应当散布到多个分区");
        for offsets in seen.values() {
            let expected: Vec<i64> = (0..offsets.len() as i64).collect();
            assert_eq!(offsets, &expected);
        }
    }

    /// 验证：主题管理器关闭后拒绝后续操作，close 本身幂等。
    #[test]
    fn closed_topic_manager_rejects_operations() {
        let manager = LoopbackTopicManager::attach();
        manager
            .ensure_stream_exists("loopback-manager-close-stream", 2)
            .unwrap();
        manager.close().unwrap();
        manager.close().unwrap();
        assert_eq!(
            manager.partitions("loopback-manager-close-stream"),
            Err(TransportError::Closed)
        );
        assert_eq!(
            manager.ensure_table_exists("loopback-manager-close-table", 2),
            Err(TransportError::Closed)
        );
    }
}
