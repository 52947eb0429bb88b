//! Bean 定义注册表实现

use ioc_abstractions::BeanDefinitionRegistry;
use ioc_common::{BeanDefinition, BeanError, BeanResult};
use std::collections::HashMap;
use tracing::{debug, warn};

/// 默认的 Bean 定义注册表
///
/// 按名称索引，同时保留首次注册的顺序，供启动时按顺序预创建单例
#[derive(Debug)]
pub struct DefaultBeanDefinitionRegistry {
    /// 名称到定义的映射
    definitions: HashMap<String, BeanDefinition>,
    /// 注册顺序
    names: Vec<String>,
    /// 是否允许同名覆盖
    allow_overriding: bool,
}

impl DefaultBeanDefinitionRegistry {
    /// 创建允许同名覆盖的注册表
    pub fn new() -> Self {
        Self::with_overriding(true)
    }

    /// 创建注册表，并指定同名定义的处理方式
    pub fn with_overriding(allow_overriding: bool) -> Self {
        Self {
            definitions: HashMap::new(),
            names: Vec::new(),
            allow_overriding,
        }
    }

    /// 是否允许同名覆盖
    pub fn allows_overriding(&self) -> bool {
        self.allow_overriding
    }

    /// 单例定义的名称（注册顺序）
    pub fn singleton_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .filter(|name| {
                self.definitions
                    .get(name.as_str())
                    .map_or(false, BeanDefinition::is_singleton)
            })
            .map(String::as_str)
    }
}

impl Default for DefaultBeanDefinitionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BeanDefinitionRegistry for DefaultBeanDefinitionRegistry {
    fn register_bean_definition(
        &mut self,
        name: String,
        definition: BeanDefinition,
    ) -> BeanResult<()> {
        if let Some(existing) = self.definitions.get(&name) {
            if !self.allow_overriding {
                return Err(BeanError::DuplicateBean { bean_name: name });
            }
            warn!(
                "Bean 定义被覆盖: {} ({} -> {})",
                name,
                existing.type_info(),
                definition.type_info()
            );
        } else {
            self.names.push(name.clone());
        }

        debug!(
            "注册 Bean 定义: {} ({}), 作用域: {}",
            name,
            definition.type_info(),
            definition.scope()
        );
        self.definitions.insert(name, definition);
        Ok(())
    }

    fn get_bean_definition(&self, name: &str) -> BeanResult<&BeanDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| BeanError::unknown_bean(name))
    }

    fn contains_bean_definition(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    fn bean_definition_names(&self) -> Vec<String> {
        self.names.clone()
    }

    fn bean_definition_count(&self) -> usize {
        self.definitions.len()
    }
}
