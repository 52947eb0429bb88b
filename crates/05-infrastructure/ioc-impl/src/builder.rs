//! 应用上下文构建器

use crate::context::ApplicationContext;
use crate::logging::{init_logging, LoggingConfig};
use ioc_abstractions::{ComponentScan, Configuration, ContainerConfig, TypeDiscovery};
use ioc_common::{BeanError, BeanResult};
use std::sync::Arc;
use tracing::debug;

/// 应用上下文构建器
///
/// ```
/// use ioc_impl::{ApplicationContextBuilder, StaticTypeDiscovery};
/// use ioc_abstractions::{BeanFactoryExt, ComponentScan};
/// use ioc_common::TypeDescriptor;
///
/// #[derive(Default)]
/// struct Greeter;
///
/// let discovery = StaticTypeDiscovery::new();
/// discovery.register(
///     "app",
///     TypeDescriptor::builder::<Greeter>()
///         .unnamed_component()
///         .default_constructor(),
/// );
///
/// let context = ApplicationContextBuilder::new()
///     .component_scan(ComponentScan::new("app"))
///     .discovery(discovery)
///     .build()
///     .unwrap();
///
/// assert!(context.get_bean_of::<Greeter>("greeter").is_ok());
/// ```
#[derive(Default)]
pub struct ApplicationContextBuilder {
    /// 扫描根
    scan: Option<ComponentScan>,
    /// 类型发现器
    discovery: Option<Arc<dyn TypeDiscovery>>,
    /// 容器配置
    config: ContainerConfig,
    /// 日志配置，设置后在构建时安装日志订阅器
    logging: Option<LoggingConfig>,
}

impl ApplicationContextBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置扫描根
    pub fn component_scan(mut self, scan: ComponentScan) -> Self {
        self.scan = Some(scan);
        self
    }

    /// 使用配置根类型声明的扫描根
    pub fn configuration<C: Configuration>(self) -> Self {
        self.component_scan(C::component_scan())
    }

    /// 设置类型发现器
    pub fn discovery<D: TypeDiscovery + 'static>(self, discovery: D) -> Self {
        self.shared_discovery(Arc::new(discovery))
    }

    /// 设置共享的类型发现器
    pub fn shared_discovery(mut self, discovery: Arc<dyn TypeDiscovery>) -> Self {
        debug!("设置类型发现器: {}", discovery.name());
        self.discovery = Some(discovery);
        self
    }

    /// 设置容器配置
    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// 构建时初始化日志系统
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = Some(logging);
        self
    }

    /// 构建并启动容器
    pub fn build(self) -> BeanResult<ApplicationContext> {
        if let Some(logging) = &self.logging {
            init_logging(logging)?;
        }

        let scan = self
            .scan
            .ok_or_else(|| BeanError::configuration("未设置组件扫描根"))?;
        let discovery = self
            .discovery
            .ok_or_else(|| BeanError::configuration("未设置类型发现器"))?;

        ApplicationContext::new(scan, discovery.as_ref(), self.config)
    }
}
