//! Bean 生命周期顺序与后置处理器链测试

use ioc_abstractions::{BeanFactory, BeanFactoryExt, ComponentScan, ContainerConfig};
use ioc_common::{
    BeanInstance, BeanNameAware, BeanPostProcessor, BoxError, InitializingBean, TypeDescriptor,
};
use ioc_impl::{ApplicationContext, StaticTypeDiscovery};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// 初始化测试日志系统（只初始化一次）
fn init_test_logger() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

type Log = Arc<Mutex<Vec<String>>>;

/// 记录每个步骤的组件
struct Tracked {
    log: Log,
    dependency: Option<Arc<Plain>>,
}

impl BeanNameAware for Tracked {
    fn set_bean_name(&mut self, name: &str) {
        self.log.lock().push(format!("name({name})"));
    }
}

impl InitializingBean for Tracked {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        self.log.lock().push("init(tracked)".to_string());
        Ok(())
    }
}

#[derive(Default)]
struct Plain;

/// 记录钩子调用的后置处理器
struct Recorder {
    label: &'static str,
    log: Log,
}

impl BeanPostProcessor for Recorder {
    fn post_process_before_initialization(
        &self,
        bean: BeanInstance,
        bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        self.log.lock().push(format!("{}.before({bean_name})", self.label));
        Ok(bean)
    }

    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        self.log.lock().push(format!("{}.after({bean_name})", self.label));
        Ok(bean)
    }
}

fn recorder(label: &'static str, log: &Log) -> TypeDescriptor {
    let log = log.clone();
    TypeDescriptor::builder::<Recorder>()
        .component(label)
        .constructor(move || {
            Ok(Recorder {
                label,
                log: log.clone(),
            })
        })
        .post_processor()
        .build()
}

fn tracked(log: &Log) -> TypeDescriptor {
    let log = log.clone();
    TypeDescriptor::builder::<Tracked>()
        .component("tracked")
        .constructor(move || {
            log.lock().push("instantiate(tracked)".to_string());
            Ok(Tracked {
                log: log.clone(),
                dependency: None,
            })
        })
        .autowired("plain", |tracked: &mut Tracked, plain: Arc<Plain>| {
            tracked.log.lock().push("inject(tracked)".to_string());
            tracked.dependency = Some(plain);
        })
        .name_aware()
        .initializing()
        .build()
}

fn plain() -> TypeDescriptor {
    TypeDescriptor::builder::<Plain>()
        .component("plain")
        .default_constructor()
        .build()
}

#[test]
fn test_creation_steps_run_in_order() {
    init_test_logger();
    let log: Log = Arc::default();
    let discovery = StaticTypeDiscovery::new();
    discovery
        .register("app", recorder("p1", &log))
        .register("app", recorder("p2", &log))
        .register("app", plain())
        .register("app", tracked(&log));

    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context = ApplicationContext::new(ComponentScan::new("app"), &discovery, config).unwrap();
    assert_eq!(context.post_processor_count(), 2);

    let bean = context.get_bean_of::<Tracked>("tracked").unwrap();
    let plain = context.get_bean_of::<Plain>("plain").unwrap();
    assert!(Arc::ptr_eq(bean.dependency.as_ref().unwrap(), &plain));

    let steps: Vec<String> = log
        .lock()
        .iter()
        .filter(|entry| entry.contains("tracked"))
        .cloned()
        .collect();
    assert_eq!(
        steps,
        vec![
            "instantiate(tracked)",
            "inject(tracked)",
            "name(tracked)",
            "p1.before(tracked)",
            "p2.before(tracked)",
            "init(tracked)",
            "p1.after(tracked)",
            "p2.after(tracked)",
        ]
    );

    // 依赖在注入之前已经完整经过处理器链
    let plain_steps: Vec<String> = log
        .lock()
        .iter()
        .filter(|entry| entry.contains("(plain)"))
        .cloned()
        .collect();
    assert_eq!(
        plain_steps,
        vec!["p1.before(plain)", "p2.before(plain)", "p1.after(plain)", "p2.after(plain)"]
    );
}

#[test]
fn test_hooks_run_for_every_prototype_creation() {
    let log: Log = Arc::default();
    let discovery = StaticTypeDiscovery::new();
    discovery.register("app", recorder("p1", &log)).register(
        "app",
        TypeDescriptor::builder::<Plain>()
            .component("plain")
            .scope("prototype")
            .default_constructor(),
    );

    let context = ApplicationContext::with_defaults(ComponentScan::new("app"), &discovery).unwrap();
    context.get_bean("plain").unwrap();
    context.get_bean("plain").unwrap();

    let count = log
        .lock()
        .iter()
        .filter(|entry| entry.as_str() == "p1.after(plain)")
        .count();
    assert_eq!(count, 2);
}

/// 代理包装
struct Proxy {
    target: BeanInstance,
}

/// 把实例包装为代理
struct Proxying;

impl BeanPostProcessor for Proxying {
    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        Ok(Box::new(Proxy { target: bean }) as BeanInstance)
    }
}

/// 记录收到的实例是否已是代理
struct Inspecting {
    seen: Log,
}

impl BeanPostProcessor for Inspecting {
    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        let kind = if bean.is::<Proxy>() { "proxy" } else { "raw" };
        self.seen.lock().push(format!("{bean_name}:{kind}"));
        Ok(bean)
    }
}

#[test]
fn test_each_hook_receives_previous_output() {
    let seen: Log = Arc::default();
    let inspecting_log = seen.clone();

    let discovery = StaticTypeDiscovery::new();
    discovery
        .register(
            "app",
            TypeDescriptor::builder::<Proxying>()
                .component("proxying")
                .constructor(|| Ok(Proxying))
                .post_processor(),
        )
        .register(
            "app",
            TypeDescriptor::builder::<Inspecting>()
                .component("inspecting")
                .constructor(move || {
                    Ok(Inspecting {
                        seen: inspecting_log.clone(),
                    })
                })
                .post_processor(),
        )
        .register("app", plain());

    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context = ApplicationContext::new(ComponentScan::new("app"), &discovery, config).unwrap();

    let bean = context.get_bean("plain").unwrap();
    let proxy = bean.downcast_ref::<Proxy>().unwrap();
    assert!(proxy.target.is::<Plain>());
    assert_eq!(*seen.lock(), vec!["plain:proxy"]);
}

#[test]
fn test_initialization_failure_is_reported() {
    struct Failing;

    impl InitializingBean for Failing {
        fn after_properties_set(&mut self) -> Result<(), BoxError> {
            Err("连接池未就绪".into())
        }
    }

    let discovery = StaticTypeDiscovery::new();
    discovery.register(
        "app",
        TypeDescriptor::builder::<Failing>()
            .component("failing")
            .constructor(|| Ok(Failing))
            .initializing(),
    );

    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context = ApplicationContext::new(ComponentScan::new("app"), &discovery, config).unwrap();

    let error = context.get_bean("failing").unwrap_err();
    assert_eq!(error.bean_name(), Some("failing"));
    assert!(error.to_string().contains("after-properties-set"));
    assert!(error.to_string().contains("连接池未就绪"));
    assert_eq!(context.stats().created_singletons, 0);
}

/// 带版本号的组件，初始化时记录看到的版本
struct Versioned {
    version: u32,
    log: Log,
}

impl InitializingBean for Versioned {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        self.log.lock().push(format!("init:v{}", self.version));
        Ok(())
    }
}

/// 初始化前把实例替换为同类型的新版本
struct Upgrading;

impl BeanPostProcessor for Upgrading {
    fn post_process_before_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        match bean.downcast::<Versioned>() {
            Ok(original) => Ok(Box::new(Versioned {
                version: original.version + 1,
                log: original.log.clone(),
            }) as BeanInstance),
            Err(other) => Ok(other),
        }
    }

    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        if let Some(versioned) = bean.downcast_ref::<Versioned>() {
            versioned
                .log
                .lock()
                .push(format!("upgrading.after:v{}", versioned.version));
        }
        Ok(bean)
    }
}

/// 记录两个钩子看到的版本
struct Observing;

impl BeanPostProcessor for Observing {
    fn post_process_before_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        if let Some(versioned) = bean.downcast_ref::<Versioned>() {
            versioned
                .log
                .lock()
                .push(format!("observing.before:v{}", versioned.version));
        }
        Ok(bean)
    }

    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        if let Some(versioned) = bean.downcast_ref::<Versioned>() {
            versioned
                .log
                .lock()
                .push(format!("observing.after:v{}", versioned.version));
        }
        Ok(bean)
    }
}

#[test]
fn test_replacement_from_before_hook_flows_downstream() {
    init_test_logger();
    let log: Log = Arc::default();
    let versioned_log = log.clone();

    let discovery = StaticTypeDiscovery::new();
    discovery
        .register(
            "app",
            TypeDescriptor::builder::<Upgrading>()
                .component("upgrading")
                .constructor(|| Ok(Upgrading))
                .post_processor(),
        )
        .register(
            "app",
            TypeDescriptor::builder::<Observing>()
                .component("observing")
                .constructor(|| Ok(Observing))
                .post_processor(),
        )
        .register(
            "app",
            TypeDescriptor::builder::<Versioned>()
                .component("versioned")
                .constructor(move || {
                    Ok(Versioned {
                        version: 1,
                        log: versioned_log.clone(),
                    })
                })
                .initializing(),
        );

    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context = ApplicationContext::new(ComponentScan::new("app"), &discovery, config).unwrap();

    let bean = context.get_bean_of::<Versioned>("versioned").unwrap();
    assert_eq!(bean.version, 2);
    assert_eq!(
        *log.lock(),
        vec![
            "observing.before:v2",
            "init:v2",
            "upgrading.after:v2",
            "observing.after:v2",
        ]
    );
}

/// 初始化回调计数
struct Counted {
    inits: Arc<AtomicUsize>,
}

impl InitializingBean for Counted {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        self.inits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// 初始化前就把实例包装为代理
struct EarlyProxying;

impl BeanPostProcessor for EarlyProxying {
    fn post_process_before_initialization(
        &self,
        bean: BeanInstance,
        _bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        Ok(Box::new(Proxy { target: bean }) as BeanInstance)
    }
}

#[test]
fn test_wrapping_before_hook_skips_init_callback() {
    init_test_logger();
    let inits = Arc::new(AtomicUsize::new(0));
    let counted_inits = inits.clone();

    let discovery = StaticTypeDiscovery::new();
    discovery
        .register(
            "app",
            TypeDescriptor::builder::<EarlyProxying>()
                .component("earlyProxying")
                .constructor(|| Ok(EarlyProxying))
                .post_processor(),
        )
        .register(
            "app",
            TypeDescriptor::builder::<Counted>()
                .component("counted")
                .constructor(move || {
                    Ok(Counted {
                        inits: counted_inits.clone(),
                    })
                })
                .initializing(),
        );

    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context = ApplicationContext::new(ComponentScan::new("app"), &discovery, config).unwrap();

    // 包装后的实例不再是 Counted，初始化回调被跳过，创建仍然成功
    let bean = context.get_bean("counted").unwrap();
    let proxy = bean.downcast_ref::<Proxy>().unwrap();
    assert!(proxy.target.is::<Counted>());
    assert_eq!(inits.load(Ordering::SeqCst), 0);
    assert_eq!(context.stats().created_singletons, 1);
}
