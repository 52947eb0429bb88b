//! 单例缓存
//!
//! 单例名称集合在启动时固定，每个名称对应一个一次性初始化单元。
//! 同一单例的并发首次请求中只有一个执行创建，其余请求阻塞等待并得到同一实例；
//! 创建失败时不缓存任何内容，之后的请求会重新尝试。

use ioc_common::{BeanError, BeanResult, SharedBean};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;

/// 单例缓存
#[derive(Debug, Default)]
pub struct SingletonCache {
    cells: HashMap<String, OnceCell<SharedBean>>,
}

impl SingletonCache {
    /// 为给定的单例名称创建空缓存
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: names
                .into_iter()
                .map(|name| (name.into(), OnceCell::new()))
                .collect(),
        }
    }

    /// 获取已创建的单例
    pub fn get(&self, name: &str) -> Option<SharedBean> {
        self.cells.get(name).and_then(OnceCell::get).map(Arc::clone)
    }

    /// 获取单例，尚未创建时调用 `create` 创建并缓存
    pub fn get_or_try_create<F>(&self, name: &str, create: F) -> BeanResult<SharedBean>
    where
        F: FnOnce() -> BeanResult<SharedBean>,
    {
        let cell = self
            .cells
            .get(name)
            .ok_or_else(|| BeanError::unknown_bean(name))?;
        cell.get_or_try_init(create).map(Arc::clone)
    }

    /// 缓存是否管理该名称
    pub fn contains(&self, name: &str) -> bool {
        self.cells.contains_key(name)
    }

    /// 单例是否已创建
    pub fn is_created(&self, name: &str) -> bool {
        self.cells.get(name).map_or(false, |cell| cell.get().is_some())
    }

    /// 已创建的单例数量
    pub fn created_count(&self) -> usize {
        self.cells.values().filter(|cell| cell.get().is_some()).count()
    }

    /// 管理的单例数量
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// 是否没有任何单例
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
