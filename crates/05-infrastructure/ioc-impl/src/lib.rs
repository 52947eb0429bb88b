//! # IoC 容器实现
//!
//! 提供应用上下文、Bean 定义注册表、单例缓存、后置处理器链和内存类型目录的具体实现。
//!
//! ## 快速开始
//!
//! ```
//! use ioc_abstractions::{BeanFactoryExt, ComponentScan};
//! use ioc_common::TypeDescriptor;
//! use ioc_impl::{ApplicationContext, StaticTypeDiscovery};
//! use std::sync::Arc;
//!
//! #[derive(Default)]
//! struct Repository;
//!
//! #[derive(Default)]
//! struct Service {
//!     repository: Option<Arc<Repository>>,
//! }
//!
//! let discovery = StaticTypeDiscovery::new();
//! discovery
//!     .register("app", TypeDescriptor::builder::<Repository>().component("repository").default_constructor())
//!     .register(
//!         "app",
//!         TypeDescriptor::builder::<Service>()
//!             .component("service")
//!             .default_constructor()
//!             .autowired("repository", |s: &mut Service, r: Arc<Repository>| s.repository = Some(r)),
//!     );
//!
//! let context = ApplicationContext::with_defaults(ComponentScan::new("app"), &discovery).unwrap();
//! let service = context.get_bean_of::<Service>("service").unwrap();
//! let repository = context.get_bean_of::<Repository>("repository").unwrap();
//! assert!(Arc::ptr_eq(service.repository.as_ref().unwrap(), &repository));
//! ```

pub mod builder;
pub mod context;
pub mod discovery;
pub mod logging;
pub mod post_processor;
pub mod registry;
pub mod singleton;

pub use builder::ApplicationContextBuilder;
pub use context::ApplicationContext;
pub use discovery::StaticTypeDiscovery;
pub use logging::{init_logging, LoggingConfig};
pub use post_processor::PostProcessorChain;
pub use registry::DefaultBeanDefinitionRegistry;
pub use singleton::SingletonCache;

#[cfg(test)]
mod tests;
