//! 错误类型定义

use std::fmt;
use thiserror::Error;

/// 用户代码（构造函数、回调、钩子）返回的错误
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Bean 生命周期中的阶段，用于在错误中标明失败的步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecyclePhase {
    /// 启动扫描时实例化后置处理器
    PostProcessorConstruction,
    /// 初始化前钩子
    BeforeInitialization,
    /// 初始化回调
    AfterPropertiesSet,
    /// 初始化后钩子
    AfterInitialization,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self {
            Self::PostProcessorConstruction => "post-processor construction",
            Self::BeforeInitialization => "before-initialization",
            Self::AfterPropertiesSet => "after-properties-set",
            Self::AfterInitialization => "after-initialization",
        };
        f.write_str(phase)
    }
}

/// 容器错误类型
#[derive(Error, Debug)]
pub enum BeanError {
    #[error("命名空间无法解析: {namespace}, 原因: {message}")]
    Discovery { namespace: String, message: String },

    #[error("Bean 实例化失败: {bean_name} ({type_name}), 原因: {source}")]
    Instantiation {
        bean_name: String,
        type_name: String,
        source: BoxError,
    },

    #[error("Bean 未注册: {bean_name}")]
    UnknownBean { bean_name: String },

    #[error("Bean 初始化失败: {bean_name}, 阶段: {phase}, 原因: {source}")]
    Initialization {
        bean_name: String,
        phase: LifecyclePhase,
        source: BoxError,
    },

    #[error("Bean 依赖创建失败: {bean_name} -> {dependency}, 原因: {source}")]
    Dependency {
        bean_name: String,
        dependency: String,
        source: Box<BeanError>,
    },

    #[error("Bean 类型不匹配: {bean_name}, 期望类型: {expected}")]
    TypeMismatch {
        bean_name: String,
        expected: &'static str,
    },

    #[error("Bean 名称重复: {bean_name}")]
    DuplicateBean { bean_name: String },

    #[error("Bean 定义无效: {type_name}, 原因: {message}")]
    InvalidDefinition { type_name: String, message: String },

    #[error("检测到循环依赖: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("依赖解析深度超出限制: {max_depth}, 解析链: {dependency_chain}")]
    ResolutionDepthExceeded {
        max_depth: usize,
        dependency_chain: String,
    },

    #[error("容器配置错误: {message}")]
    Configuration { message: String },
}

impl BeanError {
    /// 创建发现错误
    pub fn discovery(namespace: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Discovery {
            namespace: namespace.into(),
            message: message.into(),
        }
    }

    /// 创建未注册错误
    pub fn unknown_bean(bean_name: impl Into<String>) -> Self {
        Self::UnknownBean {
            bean_name: bean_name.into(),
        }
    }

    /// 创建配置错误
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// 出错的 Bean 名称（如果错误与某个 Bean 相关）
    pub fn bean_name(&self) -> Option<&str> {
        match self {
            Self::Instantiation { bean_name, .. }
            | Self::UnknownBean { bean_name }
            | Self::Initialization { bean_name, .. }
            | Self::Dependency { bean_name, .. }
            | Self::TypeMismatch { bean_name, .. }
            | Self::DuplicateBean { bean_name } => Some(bean_name),
            _ => None,
        }
    }

    /// 最初的失败原因，沿依赖链展开 [`BeanError::Dependency`]
    pub fn root_cause(&self) -> &BeanError {
        let mut error = self;
        while let Self::Dependency { source, .. } = error {
            error = source.as_ref();
        }
        error
    }
}

/// 类型擦除后的向下转型失败
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("向下转型失败, 期望类型: {expected}")]
pub struct DowncastError {
    /// 期望的具体类型名称
    pub expected: &'static str,
}

impl DowncastError {
    /// 为类型 `T` 创建转型错误
    pub fn of<T: ?Sized>() -> Self {
        Self {
            expected: std::any::type_name::<T>(),
        }
    }
}

/// 作用域解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知的作用域: {value}")]
pub struct ScopeParseError {
    /// 原始标记值
    pub value: String,
}

/// 结果类型别名
pub type BeanResult<T> = Result<T, BeanError>;
