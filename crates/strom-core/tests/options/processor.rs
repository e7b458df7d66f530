pub mod processor {
    //! Processor 装配测试：覆盖后写者胜、必选存储校验、缺省回填与端到端场景。

    use std::sync::Arc;

    use proptest::prelude::*;

    use strom_core::options::processor;
    use strom_core::storage::{MemoryStorage, Storage, StorageBuilder};
    use strom_core::{EntityKind, Group, NilHandling, OptionsError};

    /// 构造一个总是返回同一存储实例的构建器，便于断言槽位身份。
    fn shared_storage() -> (Arc<dyn Storage>, StorageBuilder) {
        let shared: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let handle = shared.clone();
        let builder: StorageBuilder =
            Arc::new(move |_topic: &str, _partition: i32| Ok(handle.clone()));
        (shared, builder)
    }

    /// 端到端场景：`[ClientId("x"), StorageBuilder(S), ClientId("y")]`。
    ///
    /// - **意图 (Why)**：一次性验证后写者胜、必选槽位直通与缺省回填三条性质；
    /// - **契约 (What)**：client_id 取末次写入值 "y"，storage 构建器产出受控
    ///   实例 S，传输槽位回填为可用缺省，空值策略保持 Ignore。
    #[test]
    fn end_to_end_resolution_matches_documented_semantics() {
        let (shared, builder) = shared_storage();
        let config = processor::resolve(
            &Group::new("orders"),
            [
                processor::with_client_id("x"),
                processor::with_storage_builder(builder),
                processor::with_client_id("y"),
            ],
        )
        .expect("storage builder supplied, resolution must succeed");

        assert_eq!(config.client_id(), "y");
        assert_eq!(config.nil_handling(), NilHandling::Ignore);
        assert_eq!(config.group().as_str(), "orders");

        let storage = (config.storage_builder())("orders-table", 0).unwrap();
        assert!(Arc::ptr_eq(&storage, &shared), "storage slot must pass through untouched");

        // 回填的传输构建器必须立即可用。
        let manager = (config.topic_manager_builder())(&[]).unwrap();
        manager.ensure_stream_exists("processor-e2e-stream", 4).unwrap();
        assert_eq!(manager.partitions("processor-e2e-stream").unwrap().len(), 4);
        let _consumer = (config.consumer_builder())(&[], "orders", config.client_id()).unwrap();
        let _producer =
            (config.producer_builder())(&[], config.client_id(), config.hasher().clone()).unwrap();
    }

    /// 验证：未提供 storage 构建器时装配必定失败，且错误点名 "storage"。
    #[test]
    fn missing_storage_builder_is_fatal() {
        let err = processor::resolve(
            &Group::new("orders"),
            [processor::with_client_id("x")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            OptionsError::MissingStorageBuilder {
                entity: EntityKind::Processor
            }
        );
        assert!(err.to_string().contains("storage"));
        assert_eq!(err.code(), "options.missing_storage_builder");
    }

    /// 验证：同一字段的后写者胜不受无关选项插入影响。
    #[test]
    fn last_write_wins_survives_interleaving() {
        let (_, builder) = shared_storage();
        let config = processor::resolve(
            &Group::new("orders"),
            [
                processor::with_nil_handling(NilHandling::Process),
                processor::with_client_id("first"),
                processor::with_partition_channel_size(0),
                processor::with_nil_handling(NilHandling::Decode),
                processor::with_storage_builder(builder),
                processor::with_client_id("second"),
            ],
        )
        .unwrap();

        assert_eq!(config.client_id(), "second");
        assert_eq!(config.nil_handling(), NilHandling::Decode);
        assert_eq!(config.partition_channel_size(), 0);
    }

    /// 验证：播种的缺省值在无相关选项时原样保留。
    #[test]
    fn seeded_defaults_survive_resolution() {
        let (_, builder) = shared_storage();
        let config = processor::resolve(
            &Group::new("orders"),
            [processor::with_storage_builder(builder)],
        )
        .unwrap();

        assert_eq!(config.client_id(), "strom");
        assert_eq!(config.partition_channel_size(), 10);
        assert_eq!(config.nil_handling(), NilHandling::Ignore);
    }

    /// 验证：两次空输入装配得到功能等价的缺省散列构造器。
    #[test]
    fn default_hashers_are_functionally_equivalent_across_resolutions() {
        let (_, builder_a) = shared_storage();
        let (_, builder_b) = shared_storage();
        let first = processor::resolve(
            &Group::new("orders"),
            [processor::with_storage_builder(builder_a)],
        )
        .unwrap();
        let second = processor::resolve(
            &Group::new("orders"),
            [processor::with_storage_builder(builder_b)],
        )
        .unwrap();

        let mut a = (first.hasher())();
        let mut b = (second.hasher())();
        a.write(b"routing-key");
        b.write(b"routing-key");
        assert_eq!(a.sum32(), b.sum32());
    }

    /// 验证：播种的缺省更新回调执行规范的 set/delete 恢复语义。
    #[test]
    fn seeded_update_callback_applies_set_delete_semantics() {
        let (_, builder) = shared_storage();
        let config = processor::resolve(
            &Group::new("orders"),
            [processor::with_storage_builder(builder)],
        )
        .unwrap();

        let storage = MemoryStorage::new();
        (config.update_callback())(&storage, 3, "k", Some(&[1, 2])).unwrap();
        assert_eq!(storage.get("k").unwrap(), Some(vec![1, 2]));
        (config.update_callback())(&storage, 3, "k", None).unwrap();
        assert!(!storage.has("k").unwrap());
    }

    proptest! {
        /// 性质：任意非空 client_id 序列按序套用后，最终值恒为末位元素。
        #[test]
        fn last_client_id_always_wins(ids in proptest::collection::vec("[a-z0-9]{1,12}", 1..8)) {
            let (_, builder) = shared_storage();
            let mut options = vec![processor::with_storage_builder(builder)];
            options.extend(ids.iter().map(|id| processor::with_client_id(id.clone())));
            let config = processor::resolve(&Group::new("orders"), options).unwrap();
            prop_assert_eq!(config.client_id(), ids.last().unwrap());
        }
    }
}
