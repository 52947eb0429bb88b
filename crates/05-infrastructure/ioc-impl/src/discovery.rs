//! 内存类型目录
//!
//! 以命名空间为键保存类型描述，供容器扫描使用。
//! 适合在程序启动时集中登记组件，或在测试中构造任意组件图。

use dashmap::DashMap;
use ioc_abstractions::{normalize_namespace, TypeDiscovery, NAMESPACE_SEPARATOR};
use ioc_common::{BeanError, BeanResult, TypeDescriptor};
use tracing::debug;

/// 内存类型目录
#[derive(Debug, Default)]
pub struct StaticTypeDiscovery {
    /// 命名空间到类型描述（登记顺序）的映射
    namespaces: DashMap<String, Vec<TypeDescriptor>>,
    /// 是否包含子命名空间
    recursive: bool,
}

impl StaticTypeDiscovery {
    /// 创建空目录，只返回直接位于命名空间下的类型
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置是否包含子命名空间中的类型
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 是否包含子命名空间
    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    /// 在命名空间下登记类型
    pub fn register(
        &self,
        namespace: impl AsRef<str>,
        descriptor: impl Into<TypeDescriptor>,
    ) -> &Self {
        let namespace = normalize_namespace(namespace.as_ref());
        let descriptor = descriptor.into();
        debug!("登记类型: {} -> {}", namespace, descriptor.type_info());
        self.namespaces.entry(namespace).or_default().push(descriptor);
        self
    }

    /// 登记一个空命名空间（可解析但不包含类型）
    pub fn register_namespace(&self, namespace: impl AsRef<str>) -> &Self {
        self.namespaces
            .entry(normalize_namespace(namespace.as_ref()))
            .or_default();
        self
    }

    /// 已登记的命名空间（排序）
    pub fn namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self.namespaces.iter().map(|e| e.key().clone()).collect();
        namespaces.sort();
        namespaces
    }

    /// 已登记的类型总数
    pub fn type_count(&self) -> usize {
        self.namespaces.iter().map(|e| e.value().len()).sum()
    }
}

/// `candidate` 是否等于 `namespace` 或位于其下
fn is_within(candidate: &str, namespace: &str) -> bool {
    if namespace.is_empty() || candidate == namespace {
        return true;
    }
    candidate
        .strip_prefix(namespace)
        .map_or(false, |rest| rest.starts_with(NAMESPACE_SEPARATOR))
}

impl TypeDiscovery for StaticTypeDiscovery {
    fn discover(&self, namespace: &str) -> BeanResult<Vec<TypeDescriptor>> {
        let namespace = normalize_namespace(namespace);

        let mut matched: Vec<(String, Vec<TypeDescriptor>)> = self
            .namespaces
            .iter()
            .filter(|entry| is_within(entry.key(), &namespace))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        if matched.is_empty() {
            return Err(BeanError::discovery(namespace, "命名空间不存在"));
        }
        matched.sort_by(|a, b| a.0.cmp(&b.0));

        let types: Vec<TypeDescriptor> = matched
            .into_iter()
            .filter(|(key, _)| self.recursive || *key == namespace)
            .flat_map(|(_, types)| types)
            .collect();

        debug!("命名空间 {} 中发现 {} 个类型", namespace, types.len());
        Ok(types)
    }

    fn name(&self) -> &str {
        "StaticTypeDiscovery"
    }
}
