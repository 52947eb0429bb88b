//! # 示例应用程序
//!
//! 演示如何使用 Lorn IoC 扫描组件、注入依赖并通过后置处理器观察 Bean 的创建

mod components;

use anyhow::Context;
use clap::Parser;
use components::{OrderRequest, OrderService, ShopConfig};
use ioc_abstractions::{BeanFactory, BeanFactoryExt, ContainerConfig};
use ioc_impl::{ApplicationContext, ApplicationContextBuilder, LoggingConfig};
use std::sync::Arc;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "ioc-demo-basic")]
#[command(about = "Lorn IoC 示例应用")]
struct Args {
    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 使用 JSON 格式输出日志
    #[arg(long)]
    json: bool,

    /// 延迟到首次请求时再创建单例
    #[arg(long)]
    lazy: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let logging = if args.json {
        LoggingConfig::production()
    } else {
        LoggingConfig::development()
    }
    .with_level(parse_log_level(&args.log_level));

    let mut config = ContainerConfig::from_env().context("读取容器配置失败")?;
    if args.lazy {
        config = config.with_eager_init_singletons(false);
    }

    let context = ApplicationContextBuilder::new()
        .configuration::<ShopConfig>()
        .discovery(components::discovery())
        .config(config)
        .with_logging(logging)
        .build()
        .context("容器启动失败")?;

    info!("容器已启动: {}", context.id());
    info!("已注册的 Bean: {:?}", context.bean_definition_names());

    demonstrate_singletons(&context)?;
    demonstrate_prototypes(&context)?;

    let stats = context.stats();
    info!(
        "统计: {} 个 Bean 定义, {} 个单例已创建, {} 个后置处理器, 启动于 {}",
        stats.registered_definitions,
        stats.created_singletons,
        stats.post_processors,
        stats.started_at
    );
    Ok(())
}

/// 演示单例共享
fn demonstrate_singletons(context: &ApplicationContext) -> anyhow::Result<()> {
    let service = context.get_bean_of::<OrderService>("orderService")?;
    let again = context.get_bean_of::<OrderService>("orderService")?;
    info!("orderService 为同一实例: {}", Arc::ptr_eq(&service, &again));

    service.place_order("ORD-1001");
    Ok(())
}

/// 演示原型每次新建
fn demonstrate_prototypes(context: &ApplicationContext) -> anyhow::Result<()> {
    let first = context.get_bean_of::<OrderRequest>("orderRequest")?;
    let second = context.get_bean_of::<OrderRequest>("orderRequest")?;
    info!(
        "orderRequest 为原型: {}, 序号 {} / {}",
        context.is_prototype("orderRequest")?,
        first.sequence(),
        second.sequence()
    );

    match context.get_bean("paymentGateway") {
        Ok(_) => info!("paymentGateway 已注册"),
        Err(e) => info!("按名称获取未注册的 Bean: {}", e),
    }
    Ok(())
}

/// 解析日志级别
fn parse_log_level(level: &str) -> tracing::Level {
    match level.to_lowercase().as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}
