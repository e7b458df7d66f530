pub mod emitter {
    //! Emitter 装配测试：无必选依赖的装配路径与缺省回填。

    use std::sync::Arc;

    use strom_core::codec::Bytes;
    use strom_core::options::emitter;
    use strom_core::{default_hasher, HasherBuilder};

    /// 验证：空选项清单装配成功——Emitter 没有必选工厂依赖。
    ///
    /// 与 Processor/View 的存储必选形成刻意的不对称，此测试钉住该策略。
    #[test]
    fn resolves_without_any_option() {
        let config = emitter::resolve(Arc::new(Bytes), []).unwrap();

        assert_eq!(config.client_id(), "strom");
        let manager = (config.topic_manager_builder())(&[]).unwrap();
        manager.ensure_stream_exists("emitter-default-stream", 1).unwrap();
        let producer =
            (config.producer_builder())(&[], config.client_id(), config.hasher().clone()).unwrap();
        producer.emit("emitter-default-stream", "k", &[1]).unwrap();
    }

    /// 验证：标量与工厂槽位均遵循后写者胜。
    #[test]
    fn scalars_and_slots_follow_last_write_wins() {
        let marker: HasherBuilder = default_hasher();
        let config = emitter::resolve(
            Arc::new(Bytes),
            [
                emitter::with_client_id("first"),
                emitter::with_hasher(default_hasher()),
                emitter::with_client_id("second"),
                emitter::with_hasher(marker.clone()),
            ],
        )
        .unwrap();

        assert_eq!(config.client_id(), "second");
        assert!(Arc::ptr_eq(config.hasher(), &marker));
    }
}
