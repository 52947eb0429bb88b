//! 类型发现抽象接口
//!
//! 容器只依赖"给定命名空间，返回其中可发现的类型及其声明的元数据"这一窄接口，
//! 具体的发现机制由外部实现。

use ioc_common::{BeanResult, TypeDescriptor};

/// 命名空间分隔符
pub const NAMESPACE_SEPARATOR: &str = "::";

/// 类型发现器 trait
pub trait TypeDiscovery: Send + Sync {
    /// 发现命名空间中的候选类型
    ///
    /// 命名空间无法解析时返回 [`ioc_common::BeanError::Discovery`]
    fn discover(&self, namespace: &str) -> BeanResult<Vec<TypeDescriptor>>;

    /// 获取发现器名称
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// 组件扫描根描述
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentScan {
    base_namespace: String,
}

impl ComponentScan {
    /// 创建扫描描述，`.` 和 `::` 两种分隔符均可
    pub fn new(base_namespace: impl AsRef<str>) -> Self {
        Self {
            base_namespace: normalize_namespace(base_namespace.as_ref()),
        }
    }

    /// 待扫描的命名空间
    pub fn base_namespace(&self) -> &str {
        &self.base_namespace
    }
}

/// 配置根 trait
///
/// 实现该 trait 的标记类型声明容器要扫描的命名空间
///
/// ```
/// use ioc_abstractions::{ComponentScan, Configuration};
///
/// struct AppConfig;
///
/// impl Configuration for AppConfig {
///     fn component_scan() -> ComponentScan {
///         ComponentScan::new("app.service")
///     }
/// }
///
/// assert_eq!(AppConfig::component_scan().base_namespace(), "app::service");
/// ```
pub trait Configuration {
    /// 组件扫描描述
    fn component_scan() -> ComponentScan;
}

/// 规范化命名空间：统一使用 `::` 分隔，去掉首尾分隔符和空白
pub fn normalize_namespace(namespace: &str) -> String {
    namespace
        .trim()
        .replace('.', NAMESPACE_SEPARATOR)
        .split(NAMESPACE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(NAMESPACE_SEPARATOR)
}
