//! Session cache walkthrough.
//!
//! Run with: RUST_LOG=lrukit=trace cargo run --example basic_lru

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use lrukit::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(true)
                .with_thread_ids(true),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let sessions: Arc<LruCache<String, String>> = Arc::new(
        LruBuilder::new(3)
            .default_ttl(Duration::from_millis(200))
            .on_eviction(move |user: &String, _token: &String| {
                counter.fetch_add(1, Ordering::Relaxed);
                info!(%user, "session dropped");
            })
            .build(),
    );

    for user in ["ana", "bo", "cy"] {
        sessions.set(user.to_string(), format!("token-{user}"));
    }
    sessions.get("ana");
    sessions.set("dee".to_string(), "token-dee".to_string());
    info!(keys = ?sessions.keys(), "after overflow");

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let sessions = Arc::clone(&sessions);
            thread::spawn(move || {
                let (token, loaded) =
                    sessions.get_or_set("shared".to_string(), format!("token-{i}"), Duration::ZERO);
                info!(worker = i, %token, loaded, "get_or_set");
            })
        })
        .collect();
    for worker in workers {
        let _ = worker.join();
    }

    thread::sleep(Duration::from_millis(250));
    let purged = sessions.purge_expired();
    info!(
        purged,
        remaining = sessions.len(),
        evictions = evictions.load(Ordering::Relaxed),
        "expired sessions purged"
    );

    sessions.clear();
    info!(len = sessions.len(), "cleared");
}
