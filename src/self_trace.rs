//! Trace handler for the tracebus endpoint itself.
//!
//! Registered as `daemon/tracebus` so a client always has at least one
//! resource to inspect, and so the endpoint's own settings are visible.

use std::sync::{Arc, Weak};
use std::time::Instant;

use async_trait::async_trait;

use tracebus_config::Config;
use tracebus_core::Tracer;
use tracebus_protocols::{resource_type, MapKeyValueEntry, MessageSink, TraceHandler};

pub(crate) const SELF_NAME: &str = "tracebus";

const COMMANDS: &str = "ping, uptime, resources";

pub(crate) struct SelfTraceHandler {
    config: Config,
    // Weak: the tracer owns this handler.
    tracer: Weak<Tracer>,
    started: Instant,
}

impl SelfTraceHandler {
    pub(crate) fn new(config: Config, tracer: &Arc<Tracer>) -> Self {
        Self {
            config,
            tracer: Arc::downgrade(tracer),
            started: Instant::now(),
        }
    }

    fn resources(&self) -> Vec<String> {
        let Some(tracer) = self.tracer.upgrade() else {
            return Vec::new();
        };

        let mut types = tracer.types();
        types.sort();
        types
            .into_iter()
            .flat_map(|resource_type| {
                let mut names = tracer.resource_names(&resource_type);
                names.sort();
                names
                    .into_iter()
                    .map(move |name| format!("{}/{}", resource_type, name))
            })
            .collect()
    }
}

#[async_trait]
impl TraceHandler for SelfTraceHandler {
    fn config(&self) -> Vec<MapKeyValueEntry> {
        let log_dir = self
            .config
            .logging
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "-".to_string());

        vec![
            MapKeyValueEntry::new("version", env!("CARGO_PKG_VERSION")),
            MapKeyValueEntry::new("listen", self.config.server.addr()),
            MapKeyValueEntry::new("log_level", &self.config.logging.level),
            MapKeyValueEntry::new("log_dir", log_dir),
        ]
    }

    fn trace(&self) -> Vec<MapKeyValueEntry> {
        let tracer = self.tracer.upgrade();
        let registered = tracer.as_ref().map(|t| t.len()).unwrap_or(0);

        let mut trace = vec![
            MapKeyValueEntry::new("uptime_seconds", self.started.elapsed().as_secs()),
            MapKeyValueEntry::new("registered_resources", registered),
        ];

        // Per-type counts, so a missing subsystem shows up as 0.
        trace.extend(resource_type::ALL.iter().map(|kind| {
            let count = tracer
                .as_ref()
                .map(|t| t.resource_names(kind).len())
                .unwrap_or(0);
            MapKeyValueEntry::new(format!("{}_count", kind), count)
        }));
        trace
    }

    async fn execute(&self, command: &str, args: &[String], sink: MessageSink) {
        match command {
            "ping" => {
                let reply = if args.is_empty() {
                    "pong".to_string()
                } else {
                    format!("pong {}", args.join(" "))
                };
                sink.send(reply).await;
            }
            "uptime" => {
                sink.send(format!("{}s", self.started.elapsed().as_secs())).await;
            }
            "resources" => {
                for resource in self.resources() {
                    if !sink.send(resource).await {
                        return;
                    }
                }
            }
            other => {
                sink.send(format!("unknown command {:?}, supported: {}", other, COMMANDS))
                    .await;
            }
        }
    }
}
