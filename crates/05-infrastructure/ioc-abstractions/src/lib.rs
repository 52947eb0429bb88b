//! # IoC Abstractions
//!
//! 容器抽象层，定义类型发现、Bean 定义注册和 Bean 获取的核心接口。
//!
//! ## 核心接口
//!
//! - [`TypeDiscovery`] - 类型发现接口（外部协作者）
//! - [`BeanDefinitionRegistry`] - Bean 定义注册表接口
//! - [`BeanFactory`] - Bean 工厂接口
//! - [`ResolveContext`] - 依赖解析上下文

pub mod container;
pub mod discovery;
pub mod factory;
pub mod registry;
pub mod resolver;

pub use container::*;
pub use discovery::*;
pub use factory::*;
pub use registry::*;
pub use resolver::*;
