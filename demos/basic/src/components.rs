//! 示例组件

use ioc_abstractions::{ComponentScan, Configuration};
use ioc_common::{
    BeanInstance, BeanNameAware, BeanPostProcessor, BoxError, InitializingBean, TypeDescriptor,
};
use ioc_impl::StaticTypeDiscovery;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

/// 配置根
pub struct ShopConfig;

impl Configuration for ShopConfig {
    fn component_scan() -> ComponentScan {
        ComponentScan::new("shop.order")
    }
}

/// 订单仓储
#[derive(Debug, Default)]
pub struct OrderRepository {
    bean_name: String,
}

impl BeanNameAware for OrderRepository {
    fn set_bean_name(&mut self, name: &str) {
        self.bean_name = name.to_string();
    }
}

impl OrderRepository {
    fn save(&self, order_id: &str) {
        info!("[{}] 保存订单 {}", self.bean_name, order_id);
    }
}

/// 订单服务
#[derive(Debug, Default)]
pub struct OrderService {
    order_repository: Option<Arc<OrderRepository>>,
}

impl InitializingBean for OrderService {
    fn after_properties_set(&mut self) -> Result<(), BoxError> {
        if self.order_repository.is_none() {
            return Err("orderRepository 未注入".into());
        }
        info!("OrderService 初始化完成");
        Ok(())
    }
}

impl OrderService {
    /// 下单
    pub fn place_order(&self, order_id: &str) {
        if let Some(repository) = &self.order_repository {
            repository.save(order_id);
        }
    }
}

/// 订单请求（原型）
#[derive(Debug)]
pub struct OrderRequest {
    sequence: usize,
}

impl OrderRequest {
    /// 请求序号
    pub fn sequence(&self) -> usize {
        self.sequence
    }
}

/// 记录每个 Bean 完成初始化的后置处理器
#[derive(Debug, Default)]
pub struct AuditPostProcessor;

impl BeanPostProcessor for AuditPostProcessor {
    fn post_process_after_initialization(
        &self,
        bean: BeanInstance,
        bean_name: &str,
    ) -> Result<BeanInstance, BoxError> {
        info!("[audit] Bean 已就绪: {}", bean_name);
        Ok(bean)
    }

    fn name(&self) -> &str {
        "AuditPostProcessor"
    }
}

/// 登记示例组件
pub fn discovery() -> StaticTypeDiscovery {
    let sequence = Arc::new(AtomicUsize::new(0));
    let discovery = StaticTypeDiscovery::new();

    discovery
        .register(
            "shop::order",
            TypeDescriptor::builder::<AuditPostProcessor>()
                .unnamed_component()
                .default_constructor()
                .post_processor(),
        )
        .register(
            "shop::order",
            TypeDescriptor::builder::<OrderService>()
                .unnamed_component()
                .default_constructor()
                .autowired(
                    "orderRepository",
                    |service: &mut OrderService, repository: Arc<OrderRepository>| {
                        service.order_repository = Some(repository);
                    },
                )
                .initializing(),
        )
        .register(
            "shop::order",
            TypeDescriptor::builder::<OrderRepository>()
                .unnamed_component()
                .default_constructor()
                .name_aware(),
        )
        .register(
            "shop::order",
            TypeDescriptor::builder::<OrderRequest>()
                .unnamed_component()
                .scope("prototype")
                .constructor(move || {
                    Ok(OrderRequest {
                        sequence: sequence.fetch_add(1, Ordering::SeqCst) + 1,
                    })
                }),
        );

    discovery
}
