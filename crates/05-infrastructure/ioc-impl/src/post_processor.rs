//! 后置处理器链

use ioc_common::{BeanError, BeanInstance, BeanPostProcessor, BeanResult, BoxError, LifecyclePhase};
use std::fmt;
use std::sync::Arc;
use tracing::{error, trace};

/// 后置处理器链
///
/// 按注册顺序组合：每个处理器接收上一个处理器返回的实例
#[derive(Clone, Default)]
pub struct PostProcessorChain {
    processors: Vec<Arc<dyn BeanPostProcessor>>,
}

impl PostProcessorChain {
    /// 创建空链
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加处理器
    pub fn push(&mut self, processor: Arc<dyn BeanPostProcessor>) {
        self.processors.push(processor);
    }

    /// 处理器数量
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// 处理器名称（注册顺序）
    pub fn names(&self) -> Vec<&str> {
        self.processors.iter().map(|processor| processor.name()).collect()
    }

    /// 依次调用初始化前钩子
    pub fn apply_before_initialization(
        &self,
        bean: BeanInstance,
        bean_name: &str,
    ) -> BeanResult<BeanInstance> {
        self.apply(bean, bean_name, LifecyclePhase::BeforeInitialization, |processor, bean| {
            processor.post_process_before_initialization(bean, bean_name)
        })
    }

    /// 依次调用初始化后钩子
    pub fn apply_after_initialization(
        &self,
        bean: BeanInstance,
        bean_name: &str,
    ) -> BeanResult<BeanInstance> {
        self.apply(bean, bean_name, LifecyclePhase::AfterInitialization, |processor, bean| {
            processor.post_process_after_initialization(bean, bean_name)
        })
    }

    fn apply<F>(
        &self,
        bean: BeanInstance,
        bean_name: &str,
        phase: LifecyclePhase,
        hook: F,
    ) -> BeanResult<BeanInstance>
    where
        F: Fn(&dyn BeanPostProcessor, BeanInstance) -> Result<BeanInstance, BoxError>,
    {
        self.processors.iter().try_fold(bean, |bean, processor| {
            trace!("调用后置处理器 {} ({}): {}", processor.name(), phase, bean_name);
            hook(processor.as_ref(), bean).map_err(|source| {
                error!(
                    "后置处理器 {} 处理 Bean {} 失败 ({}): {}",
                    processor.name(),
                    bean_name,
                    phase,
                    source
                );
                BeanError::Initialization {
                    bean_name: bean_name.to_string(),
                    phase,
                    source: format!("{}: {}", processor.name(), source).into(),
                }
            })
        })
    }
}

impl fmt::Debug for PostProcessorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
