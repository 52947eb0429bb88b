//! # IoC Common
//!
//! 这个 crate 提供了 Lorn IoC 容器的公共元数据模型、能力接口和错误类型。
//!
//! ## 核心类型
//!
//! - [`TypeDescriptor`] - 可发现类型声明的元数据
//! - [`BeanDefinition`] - 具名组件的构造描述
//! - [`Scope`] - Bean 作用域
//! - [`BeanNameAware`] / [`InitializingBean`] / [`BeanPostProcessor`] - 能力接口
//! - [`BeanError`] - 容器错误类型
//!
//! ## 设计原则
//!
//! - 显式登记能力适配器，不依赖运行时反射
//! - 按名称匹配依赖
//! - 注册后的元数据不可变

pub mod capability;
pub mod conventions;
pub mod descriptor;
pub mod errors;
pub mod metadata;

pub use capability::*;
pub use conventions::*;
pub use descriptor::*;
pub use errors::*;
pub use metadata::*;
