//! Pub/Sub event bus connecting the stage header to its host.
//!
//! Widgets never touch host state directly. Callbacks bound to an
//! [`EventEmitter`] push typed events here:
//! - subscribers registered with `subscribe()` run immediately on emit
//! - every emitted event is also queued, the host drains it with `poll()`
//!   once per frame
//!
//! Callback order: FIFO within the same event type. No ordering across types.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 256;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

type Callback = Arc<dyn Fn(&dyn Any) + Send + Sync>;

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Subscriber table and pending queue, shared by the bus and its emitters.
#[derive(Clone, Default)]
struct Channels {
    subscribers: Arc<RwLock<HashMap<TypeId, Vec<Callback>>>>,
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl Channels {
    fn deliver(&self, event: BoxedEvent) {
        // Deref to `dyn Event` so the vtable reports the concrete type,
        // not the blanket impl on Box<dyn Event>.
        let type_id = (*event).as_any().type_id();
        if let Some(cbs) = self.subscribers.read().unwrap_or_else(|e| e.into_inner()).get(&type_id) {
            for cb in cbs {
                cb((*event).as_any());
            }
        }

        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!("Event queue full ({} events), evicting oldest {}", queue.len(), evict_count);
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }
}

/// Pub/Sub event bus owned by the host shell.
#[derive(Clone, Default)]
pub struct EventBus {
    channels: Channels,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events of type E. The callback runs inside `emit()`.
    pub fn subscribe<E, F>(&self, callback: F)
    where
        E: Event,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: Callback = Arc::new(move |any: &dyn Any| {
            if let Some(event) = any.downcast_ref::<E>() {
                callback(event);
            }
        });
        self.channels
            .subscribers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapped);
    }

    /// Emit event: invoke subscribers, then queue for `poll()`.
    pub fn emit<E: Event>(&self, event: E) {
        self.channels.deliver(Box::new(event));
    }

    /// Emit an already boxed event.
    pub fn emit_boxed(&self, event: BoxedEvent) {
        self.channels.deliver(event);
    }

    /// Drain every event emitted since the last poll.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.channels.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Cloneable emitter handle for widgets and callback tables.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter { channels: self.channels.clone() }
    }

    pub fn queue_len(&self) -> usize {
        self.channels.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lightweight emitter handle given to UI components.
#[derive(Clone)]
pub struct EventEmitter {
    channels: Channels,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("subscriber_types", &self.channels.subscribers.read().map(|s| s.len()).unwrap_or(0))
            .field("queue_len", &self.channels.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    pub fn emit<E: Event>(&self, event: E) {
        self.channels.deliver(Box::new(event));
    }
}

/// Downcast a queued event to its concrete type.
///
/// Must deref to `dyn Event` before `as_any()`: `Box<dyn Event>` itself
/// satisfies the blanket impl and would report the box's type instead.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stage_events::{ManualUpdateProjectEvent, SetStageSizeEvent};
    use crate::widgets::stage_header::StageSizeMode;
    use std::sync::atomic::{AtomicI32, Ordering};

    #[test]
    fn test_subscriber_runs_on_emit() {
        let bus = EventBus::new();
        let saves = Arc::new(AtomicI32::new(0));
        let s = Arc::clone(&saves);
        bus.subscribe::<ManualUpdateProjectEvent, _>(move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        bus.emit(ManualUpdateProjectEvent);
        bus.emit(ManualUpdateProjectEvent);
        assert_eq!(saves.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_emitter_queues_for_poll() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(SetStageSizeEvent(StageSizeMode::Small));
        emitter.emit(ManualUpdateProjectEvent);
        assert_eq!(bus.queue_len(), 2);

        let events = bus.poll();
        assert_eq!(events.len(), 2);
        assert_eq!(
            downcast_event::<SetStageSizeEvent>(&events[0]).map(|e| e.0),
            Some(StageSizeMode::Small)
        );
        assert!(downcast_event::<ManualUpdateProjectEvent>(&events[1]).is_some());
        assert!(bus.poll().is_empty());
    }

    #[test]
    fn test_boxed_event_reaches_typed_subscriber() {
        let bus = EventBus::new();
        let hits = Arc::new(AtomicI32::new(0));
        let h = Arc::clone(&hits);
        bus.subscribe::<SetStageSizeEvent, _>(move |e| {
            if e.0 == StageSizeMode::Large {
                h.fetch_add(1, Ordering::SeqCst);
            }
        });

        bus.emit_boxed(Box::new(SetStageSizeEvent(StageSizeMode::Large)));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_queue_eviction_keeps_newest() {
        let bus = EventBus::new();
        for _ in 0..MAX_QUEUE_SIZE {
            bus.emit(ManualUpdateProjectEvent);
        }
        bus.emit(SetStageSizeEvent(StageSizeMode::Small));
        let events = bus.poll();
        assert_eq!(events.len(), MAX_QUEUE_SIZE / 2 + 1);
        assert!(downcast_event::<SetStageSizeEvent>(events.last().unwrap()).is_some());
    }
}
