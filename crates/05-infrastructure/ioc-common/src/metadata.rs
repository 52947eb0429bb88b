//! 元数据定义
//!
//! 提供 Bean 定义、作用域和类型的元数据信息

use crate::descriptor::TypeDescriptor;
use crate::errors::ScopeParseError;
use std::any::TypeId;
use std::fmt;
use std::str::FromStr;

/// 类型信息
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// 类型名称（不包含模块路径）
    pub name: String,
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub module_path: String,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        let full_name = std::any::type_name::<T>();
        Self {
            name: short_type_name(full_name).to_string(),
            id: TypeId::of::<T>(),
            module_path: full_name.to_string(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module_path)
    }
}

/// 去掉泛型参数和模块路径
fn short_type_name(full_name: &str) -> &str {
    let without_generics = full_name.split('<').next().unwrap_or(full_name);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
}

/// Bean 作用域
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// 单例模式，容器内唯一实例
    #[default]
    Singleton,
    /// 原型模式，每次请求创建新实例
    Prototype,
}

impl Scope {
    /// 作用域标记值
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Singleton => "singleton",
            Self::Prototype => "prototype",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "singleton" => Ok(Self::Singleton),
            "prototype" => Ok(Self::Prototype),
            _ => Err(ScopeParseError {
                value: s.to_string(),
            }),
        }
    }
}

/// Bean 定义
///
/// 描述如何构造一个具名组件。注册后不可变，只提供只读访问。
#[derive(Debug, Clone)]
pub struct BeanDefinition {
    target: TypeDescriptor,
    scope: Scope,
}

impl BeanDefinition {
    /// 创建新的 Bean 定义
    pub fn new(target: TypeDescriptor, scope: Scope) -> Self {
        Self { target, scope }
    }

    /// 目标类型描述
    pub fn target(&self) -> &TypeDescriptor {
        &self.target
    }

    /// 目标类型信息
    pub fn type_info(&self) -> &TypeInfo {
        self.target.type_info()
    }

    /// 作用域
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// 是否为单例
    pub fn is_singleton(&self) -> bool {
        self.scope == Scope::Singleton
    }

    /// 是否为原型
    pub fn is_prototype(&self) -> bool {
        self.scope == Scope::Prototype
    }
}
