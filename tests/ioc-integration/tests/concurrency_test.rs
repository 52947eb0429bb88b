//! 并发访问测试

use ioc_abstractions::{BeanFactory, ComponentScan, ContainerConfig};
use ioc_common::{SharedBean, TypeDescriptor};
use ioc_impl::{ApplicationContext, StaticTypeDiscovery};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 16;

struct Slow;

#[derive(Default)]
struct Consumer {
    slow: Option<Arc<Slow>>,
}

fn discovery(created: Arc<AtomicUsize>, scope: &str) -> StaticTypeDiscovery {
    let discovery = StaticTypeDiscovery::new();
    discovery
        .register(
            "concurrent",
            TypeDescriptor::builder::<Slow>()
                .component("slow")
                .scope(scope)
                .constructor(move || {
                    created.fetch_add(1, Ordering::SeqCst);
                    thread::sleep(Duration::from_millis(20));
                    Ok(Slow)
                }),
        )
        .register(
            "concurrent",
            TypeDescriptor::builder::<Consumer>()
                .component("consumer")
                .scope("prototype")
                .default_constructor()
                .autowired("slow", |c: &mut Consumer, s: Arc<Slow>| c.slow = Some(s)),
        );
    discovery
}

fn race(context: &ApplicationContext, name: &str) -> Vec<SharedBean> {
    let barrier = Barrier::new(THREADS);
    thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    context.get_bean(name).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    })
}

#[test]
fn test_concurrent_singleton_created_once() {
    let created = Arc::new(AtomicUsize::new(0));
    let discovery = discovery(created.clone(), "singleton");
    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context =
        ApplicationContext::new(ComponentScan::new("concurrent"), &discovery, config).unwrap();

    let beans = race(&context, "slow");

    assert_eq!(created.load(Ordering::SeqCst), 1);
    assert!(beans.windows(2).all(|pair| Arc::ptr_eq(&pair[0], &pair[1])));
}

#[test]
fn test_concurrent_dependents_share_singleton() {
    let created = Arc::new(AtomicUsize::new(0));
    let discovery = discovery(created.clone(), "singleton");
    let config = ContainerConfig::default().with_eager_init_singletons(false);
    let context =
        ApplicationContext::new(ComponentScan::new("concurrent"), &discovery, config).unwrap();

    let consumers = race(&context, "consumer");
    let slow = context.get_bean("slow").unwrap();

    assert_eq!(created.load(Ordering::SeqCst), 1);
    for consumer in consumers {
        let consumer = consumer.downcast::<Consumer>().unwrap();
        let injected: SharedBean = consumer.slow.clone().unwrap();
        assert!(Arc::ptr_eq(&injected, &slow));
    }
}

#[test]
fn test_concurrent_prototypes_are_distinct() {
    let created = Arc::new(AtomicUsize::new(0));
    let discovery = discovery(created.clone(), "prototype");
    let context =
        ApplicationContext::with_defaults(ComponentScan::new("concurrent"), &discovery).unwrap();

    let beans = race(&context, "slow");

    assert_eq!(created.load(Ordering::SeqCst), THREADS);
    for (i, a) in beans.iter().enumerate() {
        for b in &beans[i + 1..] {
            assert!(!Arc::ptr_eq(a, b));
        }
    }
}
