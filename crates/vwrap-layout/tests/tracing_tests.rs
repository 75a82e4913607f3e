#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Measure/arrange spans and realization events:
//!   cargo test -p vwrap-layout --features tracing --test tracing_tests
//!
//! No-op facade (no feature):
//!   cargo test -p vwrap-layout --test tracing_tests -- zero_overhead

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use vwrap_layout::{
    CacheLength, ContainerHost, GenerateError, PanelConfig, Size, VirtualizingWrapPanel,
};

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
#[allow(dead_code)]
struct Captured {
    name: String,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

#[allow(dead_code)]
impl Captured {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span| span.name().to_string());
        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let parent_name = ctx.event_span(event).map(|span| span.name().to_string());
        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

struct Tiles {
    count: usize,
}

impl ContainerHost for Tiles {
    type Container = usize;

    fn item_count(&self) -> usize {
        self.count
    }

    fn generate(&mut self, index: usize) -> Result<usize, GenerateError> {
        Ok(index)
    }

    fn prepare(&mut self, container: &mut usize, index: usize) {
        *container = index;
    }

    fn measure(&mut self, _container: &mut usize, _available: Size) -> Size {
        Size::new(50.0, 50.0)
    }
}

fn run_frame() {
    let mut host = Tiles { count: 200 };
    let config = PanelConfig::default().with_cache(CacheLength::none());
    let mut panel = VirtualizingWrapPanel::new(config);
    let viewport = Size::new(500.0, 200.0);
    panel.measure(&mut host, viewport).unwrap();
    panel.arrange(&mut host, viewport);
}

// ============================================================================
// Spans
// ============================================================================

#[test]
#[cfg(feature = "tracing")]
fn measure_and_arrange_spans_are_created() {
    let handle = with_captured(run_frame);
    let spans = handle.spans();

    let measure = spans
        .iter()
        .find(|s| s.name == "wrap_measure")
        .expect("wrap_measure span");
    assert_eq!(measure.field("item_count"), Some("200"));
    assert_eq!(measure.field("grouped"), Some("false"));
    assert!(measure.fields.contains_key("available_width"));

    let arrange = spans
        .iter()
        .find(|s| s.name == "wrap_arrange")
        .expect("wrap_arrange span");
    assert!(arrange.fields.contains_key("realized"));
}

#[test]
#[cfg(feature = "tracing")]
fn realization_events_nest_under_measure() {
    let handle = with_captured(run_frame);
    let events = handle.events();

    let generated: Vec<_> = events
        .iter()
        .filter(|e| e.message() == Some("generated container"))
        .collect();
    // The sampled first item plus the rest of rows 0..=4.
    assert_eq!(generated.len(), 50);
    assert!(
        generated
            .iter()
            .all(|e| e.parent_name.as_deref() == Some("wrap_measure"))
    );

    let summary = events
        .iter()
        .find(|e| e.message() == Some("measured"))
        .expect("measure summary event");
    assert_eq!(summary.field("items_per_row"), Some("10"));
    assert_eq!(summary.field("realized"), Some("50"));
}

#[test]
#[cfg(feature = "tracing")]
fn invalid_config_logs_warning() {
    let handle = with_captured(|| {
        let mut host = Tiles { count: 10 };
        let config = PanelConfig::default().with_mouse_wheel_delta(f64::NAN);
        let mut panel: VirtualizingWrapPanel<usize> = VirtualizingWrapPanel::new(config);
        assert!(panel.measure(&mut host, Size::new(100.0, 100.0)).is_err());
    });
    let events = handle.events();
    assert!(
        events
            .iter()
            .any(|e| e.message() == Some("invalid panel configuration"))
    );
}

// ============================================================================
// Zero overhead
// ============================================================================

#[test]
fn zero_overhead_when_disabled() {
    let handle = with_captured(run_frame);
    let spans = handle.spans();
    let layout_spans: Vec<_> = spans
        .iter()
        .filter(|s| s.name == "wrap_measure" || s.name == "wrap_arrange")
        .collect();

    #[cfg(feature = "tracing")]
    assert_eq!(layout_spans.len(), 2);

    #[cfg(not(feature = "tracing"))]
    assert!(
        layout_spans.is_empty(),
        "without the tracing feature no layout spans should exist (got {})",
        layout_spans.len()
    );
}
