//! 类型描述
//!
//! 可发现类型所声明的元数据：组件标记、作用域标记、无参构造函数、依赖槽位，
//! 以及显式登记的能力适配器。描述通过 [`TypeDescriptor::builder`] 以强类型方式构建，
//! 构建完成后擦除具体类型，由容器在运行时使用。

use crate::capability::{BeanInstance, BeanNameAware, BeanPostProcessor, InitializingBean, SharedBean};
use crate::errors::{BoxError, DowncastError};
use crate::metadata::TypeInfo;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

type ConstructorFn = Arc<dyn Fn() -> Result<BeanInstance, BoxError> + Send + Sync>;
type InjectorFn = Arc<dyn Fn(&mut BeanInstance, SharedBean) -> Result<(), DowncastError> + Send + Sync>;
type NameAwareFn = Arc<dyn Fn(&mut BeanInstance, &str) -> bool + Send + Sync>;
type InitializingFn = Arc<dyn Fn(&mut BeanInstance) -> Option<Result<(), BoxError>> + Send + Sync>;
type PostProcessorFn =
    Arc<dyn Fn(BeanInstance) -> Result<Arc<dyn BeanPostProcessor>, DowncastError> + Send + Sync>;

/// 组件标记
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMarker {
    name: Option<String>,
}

impl ComponentMarker {
    /// 显式声明的组件名称
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// 依赖槽位
///
/// 按字段名匹配：注入时查找与字段同名的 Bean
#[derive(Clone)]
pub struct DependencySlot {
    field: String,
    dependency_type: &'static str,
    injector: InjectorFn,
}

impl DependencySlot {
    /// 字段名（即被依赖 Bean 的名称）
    pub fn field(&self) -> &str {
        &self.field
    }

    /// 字段期望的依赖类型
    pub fn dependency_type(&self) -> &'static str {
        self.dependency_type
    }

    /// 将依赖实例赋值到目标实例的字段
    pub fn inject(&self, target: &mut BeanInstance, dependency: SharedBean) -> Result<(), DowncastError> {
        (self.injector)(target, dependency)
    }
}

impl fmt::Debug for DependencySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencySlot")
            .field("field", &self.field)
            .field("dependency_type", &self.dependency_type)
            .finish()
    }
}

/// 类型描述
#[derive(Clone)]
pub struct TypeDescriptor {
    type_info: TypeInfo,
    component: Option<ComponentMarker>,
    scope: Option<String>,
    constructor: Option<ConstructorFn>,
    slots: Vec<DependencySlot>,
    name_aware: Option<NameAwareFn>,
    initializing: Option<InitializingFn>,
    post_processor: Option<PostProcessorFn>,
}

impl TypeDescriptor {
    /// 为类型 `T` 创建描述构建器
    pub fn builder<T: Any + Send + Sync>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder {
            descriptor: Self {
                type_info: TypeInfo::of::<T>(),
                component: None,
                scope: None,
                constructor: None,
                slots: Vec::new(),
                name_aware: None,
                initializing: None,
                post_processor: None,
            },
            _marker: PhantomData,
        }
    }

    /// 目标类型信息
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 组件标记
    pub fn component(&self) -> Option<&ComponentMarker> {
        self.component.as_ref()
    }

    /// 是否带有组件标记
    pub fn is_component(&self) -> bool {
        self.component.is_some()
    }

    /// 作用域标记的原始值
    pub fn scope_marker(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// 是否有可访问的无参构造函数
    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// 依赖槽位（声明顺序）
    pub fn dependency_slots(&self) -> &[DependencySlot] {
        &self.slots
    }

    /// 是否具备名称感知能力
    pub fn is_name_aware(&self) -> bool {
        self.name_aware.is_some()
    }

    /// 是否具备初始化回调能力
    pub fn is_initializing(&self) -> bool {
        self.initializing.is_some()
    }

    /// 是否具备后置处理器能力
    pub fn is_post_processor(&self) -> bool {
        self.post_processor.is_some()
    }

    /// 调用无参构造函数
    pub fn instantiate(&self) -> Result<BeanInstance, BoxError> {
        match &self.constructor {
            Some(constructor) => constructor(),
            None => Err(format!("{} 没有可访问的无参构造函数", self.type_info).into()),
        }
    }

    /// 回调名称感知能力，实例不具备该能力时返回 `false`
    pub fn apply_bean_name(&self, bean: &mut BeanInstance, name: &str) -> bool {
        self.name_aware
            .as_ref()
            .map_or(false, |adapter| adapter(bean, name))
    }

    /// 回调初始化能力，实例不具备该能力时返回 `None`
    pub fn apply_after_properties_set(&self, bean: &mut BeanInstance) -> Option<Result<(), BoxError>> {
        self.initializing.as_ref().and_then(|adapter| adapter(bean))
    }

    /// 实例化后置处理器（无依赖注入），类型不具备该能力时返回 `None`
    pub fn instantiate_post_processor(&self) -> Option<Result<Arc<dyn BeanPostProcessor>, BoxError>> {
        let adapter = self.post_processor.as_ref()?;
        Some(
            self.instantiate()
                .and_then(|bean| adapter(bean).map_err(BoxError::from)),
        )
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_info", &self.type_info)
            .field("component", &self.component)
            .field("scope", &self.scope)
            .field("constructor", &self.constructor.as_ref().map(|_| "<function>"))
            .field("slots", &self.slots)
            .field("name_aware", &self.is_name_aware())
            .field("initializing", &self.is_initializing())
            .field("post_processor", &self.is_post_processor())
            .finish()
    }
}

/// 类型描述构建器
///
/// # 示例
///
/// ```
/// use ioc_common::TypeDescriptor;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct OrderService;
///
/// #[derive(Default)]
/// struct UserService {
///     order_service: Option<Arc<OrderService>>,
/// }
///
/// let descriptor = TypeDescriptor::builder::<UserService>()
///     .component("userService")
///     .scope("prototype")
///     .default_constructor()
///     .autowired("order_service", |s: &mut UserService, dep: Arc<OrderService>| {
///         s.order_service = Some(dep);
///     })
///     .build();
///
/// assert!(descriptor.is_component());
/// assert_eq!(descriptor.dependency_slots()[0].field(), "order_service");
/// ```
pub struct TypeDescriptorBuilder<T> {
    descriptor: TypeDescriptor,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> TypeDescriptorBuilder<T> {
    /// 标记为组件，并指定注册名称
    pub fn component(mut self, name: impl Into<String>) -> Self {
        self.descriptor.component = Some(ComponentMarker {
            name: Some(name.into()),
        });
        self
    }

    /// 标记为组件，名称按命名约定推导
    pub fn unnamed_component(mut self) -> Self {
        self.descriptor.component = Some(ComponentMarker::default());
        self
    }

    /// 设置作用域标记
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.descriptor.scope = Some(scope.into());
        self
    }

    /// 设置无参构造函数
    pub fn constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> Result<T, BoxError> + Send + Sync + 'static,
    {
        self.descriptor.constructor = Some(Arc::new(move || {
            constructor().map(|bean| Box::new(bean) as BeanInstance)
        }));
        self
    }

    /// 使用 `Default` 作为无参构造函数
    pub fn default_constructor(self) -> Self
    where
        T: Default,
    {
        self.constructor(|| Ok(T::default()))
    }

    /// 声明依赖槽位
    pub fn autowired<D, F>(mut self, field: impl Into<String>, setter: F) -> Self
    where
        D: Any + Send + Sync,
        F: Fn(&mut T, Arc<D>) + Send + Sync + 'static,
    {
        let injector: InjectorFn = Arc::new(
            move |target: &mut BeanInstance, dependency: SharedBean| -> Result<(), DowncastError> {
                let target = target.downcast_mut::<T>().ok_or_else(DowncastError::of::<T>)?;
                let dependency = dependency
                    .downcast::<D>()
                    .map_err(|_| DowncastError::of::<D>())?;
                setter(target, dependency);
                Ok(())
            },
        );
        self.descriptor.slots.push(DependencySlot {
            field: field.into(),
            dependency_type: std::any::type_name::<D>(),
            injector,
        });
        self
    }

    /// 登记名称感知能力
    pub fn name_aware(mut self) -> Self
    where
        T: BeanNameAware,
    {
        self.descriptor.name_aware = Some(Arc::new(|bean: &mut BeanInstance, name: &str| {
            match bean.downcast_mut::<T>() {
                Some(bean) => {
                    bean.set_bean_name(name);
                    true
                }
                None => false,
            }
        }));
        self
    }

    /// 登记初始化回调能力
    pub fn initializing(mut self) -> Self
    where
        T: InitializingBean,
    {
        self.descriptor.initializing = Some(Arc::new(|bean: &mut BeanInstance| {
            bean.downcast_mut::<T>()
                .map(|bean| bean.after_properties_set())
        }));
        self
    }

    /// 登记后置处理器能力
    pub fn post_processor(mut self) -> Self
    where
        T: BeanPostProcessor,
    {
        self.descriptor.post_processor = Some(Arc::new(|bean: BeanInstance| {
            bean.downcast::<T>()
                .map(|processor| Arc::<T>::from(processor) as Arc<dyn BeanPostProcessor>)
                .map_err(|_| DowncastError::of::<T>())
        }));
        self
    }

    /// 完成构建并擦除具体类型
    pub fn build(self) -> TypeDescriptor {
        self.descriptor
    }
}

impl<T> From<TypeDescriptorBuilder<T>> for TypeDescriptor {
    fn from(builder: TypeDescriptorBuilder<T>) -> Self {
        builder.descriptor
    }
}
