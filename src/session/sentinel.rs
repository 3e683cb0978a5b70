//! Load-boundary detection for infinite scroll.
//!
//! A [`ViewportSentinel`] watches the boundary marker (the row just past the
//! last rendered result) and emits a [`SentinelSignal`] each time the marker
//! moves into the configured proximity of the viewport. Signals travel over
//! a channel and are only delivered if the binding that produced them is
//! still live when they are taken.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::ui::viewport::Viewport;

/// Identity of one observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindingId(u64);

/// "The load boundary became visible" for a given binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelSignal {
    pub binding: BindingId,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    id: BindingId,
    proximity: usize,
    /// `None` until the first observation
    inside: Option<bool>,
}

/// Edge-triggered proximity watcher with at most one live binding.
#[derive(Debug)]
pub struct ViewportSentinel {
    tx: Sender<SentinelSignal>,
    rx: Receiver<SentinelSignal>,
    live: Option<Binding>,
    next_id: u64,
}

impl Default for ViewportSentinel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewportSentinel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            tx,
            rx,
            live: None,
            next_id: 0,
        }
    }

    /// Start observing with a fresh binding, replacing any live one.
    ///
    /// The first observation of a new binding fires if the marker is already
    /// inside the proximity region, so rebinding after a page lands re-arms
    /// the trigger even when the marker never left the screen.
    pub fn bind(&mut self, proximity: usize) -> BindingId {
        self.next_id += 1;
        let id = BindingId(self.next_id);
        if let Some(old) = self.live.replace(Binding {
            id,
            proximity,
            inside: None,
        }) {
            crate::perf::log_event("sentinel.rebind", format!("old={:?} new={id:?}", old.id));
        } else {
            crate::perf::log_event("sentinel.bind", format!("id={id:?} proximity={proximity}"));
        }
        id
    }

    /// Stop observing. Signals the old binding already emitted are dropped
    /// by [`take_signal`](Self::take_signal).
    pub fn unbind(&mut self) -> Option<BindingId> {
        let id = self.live.take().map(|binding| binding.id);
        if let Some(id) = id {
            crate::perf::log_event("sentinel.unbind", format!("id={id:?}"));
        }
        id
    }

    pub const fn is_bound(&self) -> bool {
        self.live.is_some()
    }

    pub fn live_binding(&self) -> Option<BindingId> {
        self.live.map(|binding| binding.id)
    }

    /// Evaluate the marker position against the viewport.
    ///
    /// Emits a signal on every transition into the proximity region.
    pub fn observe(&mut self, viewport: &Viewport, marker_line: usize) {
        let Some(binding) = self.live.as_mut() else {
            return;
        };
        let inside = viewport.is_within(marker_line, binding.proximity);
        let entered = inside && binding.inside != Some(true);
        binding.inside = Some(inside);
        if entered {
            let _ = self.tx.send(SentinelSignal {
                binding: binding.id,
            });
        }
    }

    /// Drain pending signals and return one belonging to the live binding.
    ///
    /// Signals from bindings that have since been unbound or replaced are
    /// discarded.
    pub fn take_signal(&mut self) -> Option<SentinelSignal> {
        let live = self.live_binding();
        let mut delivered = None;
        while let Ok(signal) = self.rx.try_recv() {
            if Some(signal.binding) == live {
                delivered = Some(signal);
            } else {
                tracing::debug!(binding = ?signal.binding, "dropping stale sentinel signal");
            }
        }
        delivered
    }
}
