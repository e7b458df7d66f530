//! 配置装配集成测试入口，覆盖三类实体的选项套用、校验与回填行为。
//!
//! # 模块目的（Why）
//! - 汇集全部装配相关的集成测试，便于统一运行与过滤
//!   （`cargo test -p strom-core --test options`）；
//! - 覆盖装配层承诺的可测性质：后写者胜、必选依赖校验、缺省回填、
//!   空实例防护与端到端装配场景。
//!
//! # 结构概览（What）
//! - `tests::options::processor`：Processor 选项族与装配；
//! - `tests::options::view`：View 选项族、实例包裹与空实例防护；
//! - `tests::options::emitter`：Emitter 无必选依赖的装配路径。

pub mod tests {
    //! 集成测试命名空间：将装配测试归档在 `tests::options` 之下，便于过滤。
    pub mod options {
        //! 配置装配相关的集成测试集合。
        include!("processor.rs");
        include!("view.rs");
        include!("emitter.rs");
    }
}
