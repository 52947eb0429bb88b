//! Bean 工厂抽象接口
//!
//! 面向使用者的按名称获取 Bean 的接口

use ioc_common::{BeanError, BeanResult, SharedBean};
use std::any::Any;
use std::sync::Arc;

/// Bean 工厂 trait
pub trait BeanFactory: Send + Sync {
    /// 按名称获取 Bean
    ///
    /// 单例返回缓存实例（首次请求时创建），原型每次创建新实例
    fn get_bean(&self, name: &str) -> BeanResult<SharedBean>;

    /// 检查是否存在指定名称的 Bean 定义
    fn contains_bean(&self, name: &str) -> bool;

    /// 指定 Bean 是否为单例
    fn is_singleton(&self, name: &str) -> BeanResult<bool>;

    /// 指定 Bean 是否为原型
    fn is_prototype(&self, name: &str) -> BeanResult<bool>;
}

/// 带类型的 Bean 获取扩展
pub trait BeanFactoryExt: BeanFactory {
    /// 按名称获取 Bean 并转换为具体类型
    ///
    /// 实例类型不符时（例如被后置处理器替换为代理）返回 [`BeanError::TypeMismatch`]
    fn get_bean_of<T: Any + Send + Sync>(&self, name: &str) -> BeanResult<Arc<T>> {
        self.get_bean(name)?
            .downcast::<T>()
            .map_err(|_| BeanError::TypeMismatch {
                bean_name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }
}

impl<F: BeanFactory + ?Sized> BeanFactoryExt for F {}
