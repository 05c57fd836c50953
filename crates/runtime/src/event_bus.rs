use std::collections::VecDeque;

use crate::frame::Frame;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TraceKind {
    /// Scene built or released.
    Scene,
    /// Pointer gestures.
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub frame_index: u64,
    pub kind: TraceKind,
    pub message: String,
}

/// Bounded trace of lifecycle events; the oldest entry is dropped once
/// `capacity` is reached.
#[derive(Debug)]
pub struct EventBus {
    events: VecDeque<Event>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn emit(&mut self, frame: Frame, kind: TraceKind, message: impl Into<String>) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(Event {
            frame_index: frame.index,
            kind,
            message: message.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Messages of one kind, oldest first.
    pub fn messages(&self, kind: TraceKind) -> Vec<&str> {
        self.events
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}
