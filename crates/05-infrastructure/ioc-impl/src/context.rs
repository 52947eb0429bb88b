//! 应用上下文
//!
//! 容器的具体实现：启动时扫描命名空间、登记 Bean 定义、收集后置处理器并预创建单例，
//! 之后按名称提供 Bean。

use crate::post_processor::PostProcessorChain;
use crate::registry::DefaultBeanDefinitionRegistry;
use crate::singleton::SingletonCache;
use chrono::{DateTime, Utc};
use ioc_abstractions::{
    BeanDefinitionRegistry, BeanFactory, ComponentScan, Configuration, ContainerConfig,
    ContainerStats, ResolveContext, TypeDiscovery,
};
use ioc_common::{
    BeanDefinition, BeanError, BeanResult, LifecyclePhase, NamingConventions, Scope,
    ScopeParseError, SharedBean, TypeDescriptor,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// 应用上下文
///
/// # 启动
///
/// [`ApplicationContext::new`] 依次执行：
///
/// 1. 通过 [`TypeDiscovery`] 发现扫描根命名空间中的类型（不递归子命名空间，除非发现器另有设置）
/// 2. 为每个带组件标记的类型登记 Bean 定义；具备后置处理器能力的类型在此时实例化（不注入依赖）
///    并加入后置处理器链，同时也作为普通 Bean 登记
/// 3. 按登记顺序预创建所有单例（可通过 [`ContainerConfig::eager_init_singletons`] 关闭）
///
/// 任何一步失败都会中止启动并返回错误。
///
/// # 并发
///
/// 启动过程本身不是并发安全的：启动期间不能有其他线程调用 `get_bean`。
/// 构造函数只在启动完成后才返回上下文，因此这一前提由类型系统保证。
/// 启动完成后注册表只读，`get_bean` 可以在任意多个线程中并发调用：
/// 同一单例的并发首次请求只会创建一次，所有调用方得到同一实例。
///
/// 不支持循环依赖。单线程解析中的循环会被识别为 [`BeanError::CircularDependency`]；
/// 多个线程从不同入口同时进入同一个循环时可能相互等待。
pub struct ApplicationContext {
    /// 容器ID
    id: Uuid,
    /// 扫描根
    scan: ComponentScan,
    /// 容器配置
    config: ContainerConfig,
    /// Bean 定义注册表
    registry: DefaultBeanDefinitionRegistry,
    /// 单例缓存
    singletons: SingletonCache,
    /// 后置处理器链
    post_processors: PostProcessorChain,
    /// 启动完成时间
    started_at: DateTime<Utc>,
}

impl ApplicationContext {
    /// 扫描命名空间并启动容器
    pub fn new(
        scan: ComponentScan,
        discovery: &dyn TypeDiscovery,
        config: ContainerConfig,
    ) -> BeanResult<Self> {
        config.validate()?;

        let id = Uuid::new_v4();
        info!(
            "开始启动容器: {} (扫描命名空间: {}, 发现器: {})",
            id,
            scan.base_namespace(),
            discovery.name()
        );

        let candidates = discovery.discover(scan.base_namespace()).map_err(|e| {
            error!("类型发现失败: {}", e);
            e
        })?;
        debug!("发现 {} 个候选类型", candidates.len());

        let (registry, post_processors) = Self::load_definitions(candidates, &config)?;
        let singletons = SingletonCache::new(registry.singleton_names());

        let context = Self {
            id,
            scan,
            config,
            registry,
            singletons,
            post_processors,
            started_at: Utc::now(),
        };

        if context.config.eager_init_singletons {
            context.preinstantiate_singletons()?;
        }

        info!(
            "容器启动完成: {} ({} 个 Bean 定义, {} 个单例已创建, {} 个后置处理器)",
            context.id,
            context.registry.bean_definition_count(),
            context.singletons.created_count(),
            context.post_processors.len()
        );
        Ok(context)
    }

    /// 使用默认配置启动容器
    pub fn with_defaults(scan: ComponentScan, discovery: &dyn TypeDiscovery) -> BeanResult<Self> {
        Self::new(scan, discovery, ContainerConfig::default())
    }

    /// 从配置根类型启动容器
    pub fn from_configuration<C: Configuration>(discovery: &dyn TypeDiscovery) -> BeanResult<Self> {
        Self::with_defaults(C::component_scan(), discovery)
    }

    /// 登记候选类型，收集后置处理器
    fn load_definitions(
        candidates: Vec<TypeDescriptor>,
        config: &ContainerConfig,
    ) -> BeanResult<(DefaultBeanDefinitionRegistry, PostProcessorChain)> {
        let mut registry =
            DefaultBeanDefinitionRegistry::with_overriding(config.allow_bean_definition_overriding);
        let mut post_processors = PostProcessorChain::new();

        for descriptor in candidates {
            if !descriptor.is_component() {
                debug!("跳过未标记为组件的类型: {}", descriptor.type_info());
                continue;
            }

            let name = NamingConventions::resolve_bean_name(&descriptor);
            let scope = parse_scope(&descriptor)?;

            if let Some(processor) = descriptor.instantiate_post_processor() {
                let processor = processor.map_err(|source| {
                    error!("后置处理器实例化失败: {} ({}): {}", name, descriptor.type_info(), source);
                    BeanError::Initialization {
                        bean_name: name.clone(),
                        phase: LifecyclePhase::PostProcessorConstruction,
                        source,
                    }
                })?;
                info!("注册后置处理器: {} ({})", name, processor.name());
                post_processors.push(processor);
            }

            registry.register_bean_definition(name, BeanDefinition::new(descriptor, scope))?;
        }

        Ok((registry, post_processors))
    }

    /// 按登记顺序创建所有单例
    fn preinstantiate_singletons(&self) -> BeanResult<()> {
        for name in self.registry.bean_definition_names() {
            if self.registry.get_bean_definition(&name)?.is_singleton() {
                self.get_bean(&name).map_err(|e| {
                    error!("单例预创建失败: {}: {}", name, e);
                    e
                })?;
            }
        }
        Ok(())
    }

    /// 解析 Bean，`context` 记录当前的解析链
    fn resolve(&self, name: &str, context: &mut ResolveContext) -> BeanResult<SharedBean> {
        let definition = self.registry.get_bean_definition(name)?;

        if definition.is_singleton() {
            if let Some(bean) = self.singletons.get(name) {
                return Ok(bean);
            }
        }

        context.enter(name)?;
        let result = match definition.scope() {
            Scope::Singleton => self
                .singletons
                .get_or_try_create(name, || self.create_bean(name, definition, context)),
            Scope::Prototype => self.create_bean(name, definition, context),
        };
        context.exit();
        result
    }

    /// 按生命周期创建一个实例
    fn create_bean(
        &self,
        name: &str,
        definition: &BeanDefinition,
        context: &mut ResolveContext,
    ) -> BeanResult<SharedBean> {
        let target = definition.target();
        debug!(
            "开始创建 Bean: {} ({}), 作用域: {}",
            name,
            target.type_info(),
            definition.scope()
        );

        // 实例化
        let mut bean = target.instantiate().map_err(|source| {
            error!("Bean 实例化失败: {} ({}): {}", name, target.type_info(), source);
            BeanError::Instantiation {
                bean_name: name.to_string(),
                type_name: target.type_info().to_string(),
                source,
            }
        })?;

        // 依赖注入，按槽位声明顺序
        for slot in target.dependency_slots() {
            debug!("注入依赖: {}.{}", name, slot.field());
            let dependency = self.resolve(slot.field(), context).map_err(|e| {
                error!("Bean {} 的依赖 {} 解析失败: {}", name, slot.field(), e);
                match e {
                    // 解析链已包含外层 Bean
                    BeanError::CircularDependency { .. }
                    | BeanError::ResolutionDepthExceeded { .. } => e,
                    source => BeanError::Dependency {
                        bean_name: name.to_string(),
                        dependency: slot.field().to_string(),
                        source: Box::new(source),
                    },
                }
            })?;
            slot.inject(&mut bean, dependency).map_err(|e| {
                error!("Bean {} 的依赖 {} 类型不匹配: {}", name, slot.field(), e);
                BeanError::TypeMismatch {
                    bean_name: slot.field().to_string(),
                    expected: e.expected,
                }
            })?;
        }

        if target.apply_bean_name(&mut bean, name) {
            debug!("已设置 Bean 名称: {}", name);
        }

        let mut bean = self.post_processors.apply_before_initialization(bean, name)?;

        match target.apply_after_properties_set(&mut bean) {
            Some(result) => {
                result.map_err(|source| {
                    error!("Bean 初始化回调失败: {}: {}", name, source);
                    BeanError::Initialization {
                        bean_name: name.to_string(),
                        phase: LifecyclePhase::AfterPropertiesSet,
                        source,
                    }
                })?;
                debug!("已调用初始化回调: {}", name);
            }
            None if target.is_initializing() => {
                warn!(
                    "Bean {} 已被初始化前钩子替换为其他类型, 跳过 {} 的初始化回调",
                    name,
                    target.type_info()
                );
            }
            None => {}
        }

        let bean = self.post_processors.apply_after_initialization(bean, name)?;

        debug!("Bean 创建完成: {}", name);
        Ok(Arc::from(bean))
    }

    /// 容器ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 扫描根
    pub fn component_scan(&self) -> &ComponentScan {
        &self.scan
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 启动完成时间
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// 已登记的 Bean 名称（登记顺序）
    pub fn bean_definition_names(&self) -> Vec<String> {
        self.registry.bean_definition_names()
    }

    /// 获取 Bean 定义
    pub fn bean_definition(&self, name: &str) -> BeanResult<&BeanDefinition> {
        self.registry.get_bean_definition(name)
    }

    /// 后置处理器数量
    pub fn post_processor_count(&self) -> usize {
        self.post_processors.len()
    }

    /// 统计信息
    pub fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_definitions: self.registry.bean_definition_count(),
            created_singletons: self.singletons.created_count(),
            post_processors: self.post_processors.len(),
            started_at: self.started_at,
        }
    }
}

/// 解析作用域标记，未标记时为单例
fn parse_scope(descriptor: &TypeDescriptor) -> BeanResult<Scope> {
    descriptor.scope_marker().map_or(Ok(Scope::default()), |marker| {
        marker.parse().map_err(|e: ScopeParseError| {
            error!("Bean 定义无效: {}: {}", descriptor.type_info(), e);
            BeanError::InvalidDefinition {
                type_name: descriptor.type_info().to_string(),
                message: e.to_string(),
            }
        })
    })
}

impl BeanFactory for ApplicationContext {
    fn get_bean(&self, name: &str) -> BeanResult<SharedBean> {
        let mut context = ResolveContext::new(self.config.max_resolution_depth);
        self.resolve(name, &mut context)
    }

    fn contains_bean(&self, name: &str) -> bool {
        self.registry.contains_bean_definition(name)
    }

    fn is_singleton(&self, name: &str) -> BeanResult<bool> {
        Ok(self.registry.get_bean_definition(name)?.is_singleton())
    }

    fn is_prototype(&self, name: &str) -> BeanResult<bool> {
        Ok(self.registry.get_bean_definition(name)?.is_prototype())
    }
}

impl fmt::Debug for ApplicationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplicationContext")
            .field("id", &self.id)
            .field("scan", &self.scan)
            .field("config", &self.config)
            .field("bean_definitions", &self.registry.bean_definition_names())
            .field("post_processors", &self.post_processors)
            .field("started_at", &self.started_at)
            .finish()
    }
}
