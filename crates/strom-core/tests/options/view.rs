pub mod view {
    //! View 装配测试：覆盖必选存储校验、实例包裹、空实例防护与后写者胜。

    use std::sync::Arc;

    use strom_core::codec::Bytes;
    use strom_core::options::view;
    use strom_core::storage::{MemoryStorage, Storage, StorageBuilder};
    use strom_core::transport::loopback::LoopbackTopicManager;
    use strom_core::{EntityKind, OptionsError, Table, TopicManager};

    fn memory_storage_builder() -> StorageBuilder {
        Arc::new(|_topic: &str, _partition: i32| {
            Ok(Arc::new(MemoryStorage::new()) as Arc<dyn Storage>)
        })
    }

    /// 验证：未提供 storage 构建器时装配必定失败，实体标注为 view。
    #[test]
    fn missing_storage_builder_is_fatal() {
        let err = view::resolve(
            &Table::new("orders-table"),
            Arc::new(Bytes),
            [view::with_client_id("x")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            OptionsError::MissingStorageBuilder {
                entity: EntityKind::View
            }
        );
    }

    /// 验证：显式包裹空实例在套用阶段立即失败，绝不退回缺省回填。
    ///
    /// - **意图 (Why)**：区分“未设置”（合法，触发回填）与“显式置空”
    ///   （调用方错误，必须可见地失败）；
    /// - **契约 (What)**：即便 storage 构建器齐备，装配也要以
    ///   [`OptionsError::NilTopicManager`] 结束。
    #[test]
    fn explicit_nil_topic_manager_is_rejected_at_application_time() {
        let err = view::resolve(
            &Table::new("orders-table"),
            Arc::new(Bytes),
            [
                view::with_storage_builder(memory_storage_builder()),
                view::with_topic_manager(None),
            ],
        )
        .unwrap_err();
        assert_eq!(err, OptionsError::NilTopicManager);
        assert_eq!(err.to_string(), "topic manager cannot be nil");
        assert_eq!(err.code(), "options.nil_topic_manager");
    }

    /// 验证：包裹的实例被原样装入，构建器对任意 broker 列表返回同一实例。
    #[test]
    fn wrapped_topic_manager_instance_passes_through() {
        let instance: Arc<dyn TopicManager> = Arc::new(LoopbackTopicManager::attach());
        let config = view::resolve(
            &Table::new("orders-table"),
            Arc::new(Bytes),
            [
                view::with_storage_builder(memory_storage_builder()),
                view::with_topic_manager(Some(instance.clone())),
            ],
        )
        .unwrap();

        let built = (config.topic_manager_builder())(&[]).unwrap();
        assert!(Arc::ptr_eq(&built, &instance));
        let rebuilt = (config.topic_manager_builder())(&["broker:9092".to_owned()]).unwrap();
        assert!(Arc::ptr_eq(&rebuilt, &instance));
    }

    /// 验证：未设置主题管理器时回填缺省构建器且立即可用。
    #[test]
    fn unset_topic_manager_backfills_default() {
        let config = view::resolve(
            &Table::new("orders-table"),
            Arc::new(Bytes),
            [view::with_storage_builder(memory_storage_builder())],
        )
        .unwrap();

        let manager = (config.topic_manager_builder())(&[]).unwrap();
        manager.ensure_table_exists("view-backfill-table", 2).unwrap();
        assert_eq!(manager.partitions("view-backfill-table").unwrap().len(), 2);
    }

    /// 验证：client_id 后写者胜，表主题与编解码器按构造入参直通。
    #[test]
    fn scalars_follow_last_write_wins() {
        let config = view::resolve(
            &Table::new("orders-table"),
            Arc::new(Bytes),
            [
                view::with_client_id("first"),
                view::with_storage_builder(memory_storage_builder()),
                view::with_client_id("second"),
                view::with_partition_channel_size(0),
            ],
        )
        .unwrap();

        assert_eq!(config.client_id(), "second");
        assert_eq!(config.partition_channel_size(), 0);
        assert_eq!(config.table().as_str(), "orders-table");
    }
}
