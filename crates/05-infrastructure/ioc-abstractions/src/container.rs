//! 容器配置与统计信息

use crate::resolver::DEFAULT_MAX_RESOLUTION_DEPTH;
use ioc_common::{BeanError, BeanResult};
use serde::Deserialize;
use std::str::FromStr;
use tracing::debug;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "IOC_";

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 启动时是否立即创建所有单例
    pub eager_init_singletons: bool,
    /// 是否允许同名 Bean 定义覆盖
    pub allow_bean_definition_overriding: bool,
    /// 最大解析深度
    pub max_resolution_depth: usize,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            eager_init_singletons: true,
            allow_bean_definition_overriding: true,
            max_resolution_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
        }
    }
}

impl ContainerConfig {
    /// 设置是否立即创建单例
    pub fn with_eager_init_singletons(mut self, enabled: bool) -> Self {
        self.eager_init_singletons = enabled;
        self
    }

    /// 设置是否允许同名覆盖
    pub fn with_bean_definition_overriding(mut self, allowed: bool) -> Self {
        self.allow_bean_definition_overriding = allowed;
        self
    }

    /// 设置最大解析深度
    pub fn with_max_resolution_depth(mut self, depth: usize) -> Self {
        self.max_resolution_depth = depth;
        self
    }

    /// 从进程环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> BeanResult<Self> {
        Self::from_vars(std::env::vars())
    }

    /// 从键值对加载配置，只识别带 `IOC_` 前缀的键
    pub fn from_vars<I, K, V>(vars: I) -> BeanResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let Some(key) = key.as_ref().strip_prefix(ENV_PREFIX) else {
                continue;
            };
            let value = value.as_ref();

            match key {
                "EAGER_INIT_SINGLETONS" => {
                    config.eager_init_singletons = parse_value(key, value)?;
                }
                "ALLOW_BEAN_DEFINITION_OVERRIDING" => {
                    config.allow_bean_definition_overriding = parse_value(key, value)?;
                }
                "MAX_RESOLUTION_DEPTH" => {
                    config.max_resolution_depth = parse_value(key, value)?;
                }
                _ => continue,
            }
            debug!("加载容器配置: {}{} = {}", ENV_PREFIX, key, value);
        }

        config.validate()?;
        Ok(config)
    }

    /// 校验配置，无论配置来自环境变量、反序列化还是代码构造
    pub fn validate(&self) -> BeanResult<()> {
        if self.max_resolution_depth == 0 {
            return Err(BeanError::configuration("max_resolution_depth 必须大于 0"));
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> BeanResult<T> {
    value.trim().parse().map_err(|_| {
        BeanError::configuration(format!("无法解析配置项 {ENV_PREFIX}{key}: {value}"))
    })
}

/// 容器统计信息
#[derive(Debug, Clone)]
pub struct ContainerStats {
    /// 已注册的 Bean 定义数量
    pub registered_definitions: usize,
    /// 已创建的单例数量
    pub created_singletons: usize,
    /// 后置处理器数量
    pub post_processors: usize,
    /// 启动完成时间
    pub started_at: chrono::DateTime<chrono::Utc>,
}
