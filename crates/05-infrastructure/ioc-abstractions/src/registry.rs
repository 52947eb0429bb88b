//! Bean 定义注册表抽象接口

use ioc_common::{BeanDefinition, BeanResult};

/// Bean 定义注册表 trait
///
/// 启动时一次性填充，之后只读
pub trait BeanDefinitionRegistry: Send + Sync {
    /// 注册 Bean 定义，同名定义的处理由实现决定（覆盖或报错）
    fn register_bean_definition(
        &mut self,
        name: String,
        definition: BeanDefinition,
    ) -> BeanResult<()>;

    /// 获取 Bean 定义，不存在时返回 [`ioc_common::BeanError::UnknownBean`]
    fn get_bean_definition(&self, name: &str) -> BeanResult<&BeanDefinition>;

    /// 检查是否已注册
    fn contains_bean_definition(&self, name: &str) -> bool;

    /// 已注册的名称（注册顺序）
    fn bean_definition_names(&self) -> Vec<String>;

    /// 已注册的定义数量
    fn bean_definition_count(&self) -> usize;
}
