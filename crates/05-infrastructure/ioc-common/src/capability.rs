//! 能力接口定义
//!
//! Bean 类型可以选择实现的可选行为。容器不要求任何基础 trait，
//! 只在创建时通过类型描述中登记的适配器检测这些能力。

use crate::errors::BoxError;
use std::any::Any;
use std::sync::Arc;

/// 构造中的 Bean 实例（独占、可变、可被钩子替换）
pub type BeanInstance = Box<dyn Any + Send + Sync>;

/// 构造完成、可共享的 Bean 实例
pub type SharedBean = Arc<dyn Any + Send + Sync>;

/// 名称感知能力
///
/// 在依赖注入完成后、其他生命周期步骤之前收到自己的注册名称
pub trait BeanNameAware {
    /// 设置 Bean 名称
    fn set_bean_name(&mut self, name: &str);
}

/// 初始化回调能力
///
/// 在初始化前钩子之后、初始化后钩子之前调用。
///
/// 回调作用于初始化前钩子返回的实例：若钩子把实例替换成了其他类型（例如包装为代理），
/// 新实例不再具备该能力，回调会被跳过并记录一条警告日志。
/// 替换为同类型的新实例时，回调照常作用于新实例。
pub trait InitializingBean {
    /// 所有依赖设置完成后调用
    fn after_properties_set(&mut self) -> Result<(), BoxError>;
}

/// Bean 后置处理器
///
/// 在每个 Bean 的初始化回调前后调用，可以返回原实例或替换后的实例（例如代理包装）。
/// 多个处理器按注册顺序组合，每个处理器接收上一个的输出。
///
/// # 示例
///
/// ```
/// use ioc_common::{BeanInstance, BeanPostProcessor, BoxError};
///
/// struct LoggingPostProcessor;
///
/// impl BeanPostProcessor for LoggingPostProcessor {
///     fn post_process_after_initialization(
///         &self,
///         bean: BeanInstance,
///         bean_name: &str,
///     ) -> Result<BeanInstance, BoxError> {
///         println!("initialized: {bean_name}");
///         Ok(bean)
///     }
/// }
/// ```
pub trait BeanPostProcessor: Send + Sync {
    /// 在初始化回调之前调用
    fn post_process_before_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        Ok(bean)
    }

    /// 在初始化回调之后调用，代理包装的扩展点
    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        Ok(bean)
    }

    /// 处理器名称（用于日志和错误信息）
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
