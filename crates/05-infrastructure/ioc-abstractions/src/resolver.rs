//! 依赖解析上下文
//!
//! 在递归的依赖解析过程中记录解析链，用于报告循环依赖和限制解析深度

use ioc_common::{BeanError, BeanResult};

/// 默认最大解析深度
pub const DEFAULT_MAX_RESOLUTION_DEPTH: usize = 100;

/// 解析上下文
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<String>,
    /// 最大解析深度
    max_depth: usize,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolution_chain: Vec::new(),
            max_depth,
        }
    }

    /// 将 Bean 名称压入解析链
    ///
    /// 名称已在链中时返回 [`BeanError::CircularDependency`]，
    /// 超出最大深度时返回 [`BeanError::ResolutionDepthExceeded`]
    pub fn enter(&mut self, name: &str) -> BeanResult<()> {
        if self.resolution_chain.iter().any(|entry| entry == name) {
            return Err(BeanError::CircularDependency {
                dependency_chain: self.describe_with(name),
            });
        }
        if self.resolution_chain.len() >= self.max_depth {
            return Err(BeanError::ResolutionDepthExceeded {
                max_depth: self.max_depth,
                dependency_chain: self.describe_with(name),
            });
        }
        self.resolution_chain.push(name.to_string());
        Ok(())
    }

    /// 从解析链中弹出最近的 Bean 名称
    pub fn exit(&mut self) {
        self.resolution_chain.pop();
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    /// 当前解析链
    pub fn chain(&self) -> &[String] {
        &self.resolution_chain
    }

    /// 正在解析的 Bean（链尾）
    pub fn current(&self) -> Option<&str> {
        self.resolution_chain.last().map(String::as_str)
    }

    fn describe_with(&self, name: &str) -> String {
        self.resolution_chain
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(name))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl Default for ResolveContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RESOLUTION_DEPTH)
    }
}
