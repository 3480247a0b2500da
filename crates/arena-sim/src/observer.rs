//! Subscription point for scheduler lifecycle notifications.
//!
//! The scheduler calls every registered observer synchronously, in
//! registration order, from inside `WaveScheduler::update`. Observers must
//! not call back into the scheduler.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use arena_core::events::ScheduleEvent;
use arena_core::level::WaveDefinition;

/// Receiver of wave lifecycle events. Every hook defaults to a no-op.
pub trait ScheduleObserver {
    fn on_wave_start(&mut self, _wave_number: u32, _total_waves: u32, _wave: &WaveDefinition) {}

    fn on_wave_complete(&mut self, _wave_number: u32, _total_waves: u32) {}

    /// Called every tick while an intermission counts down.
    fn on_intermission(&mut self, _next_wave: u32, _total_waves: u32, _time_remaining: f32) {}

    fn on_schedule_complete(&mut self) {}
}

/// Shared handle to a registered observer.
pub type ObserverHandle = Rc<RefCell<dyn ScheduleObserver>>;

/// Registered observers, notified in order.
#[derive(Default)]
pub struct Observers {
    handles: Vec<ObserverHandle>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: ObserverHandle) {
        self.handles.push(observer);
    }

    pub(crate) fn len(&self) -> usize {
        self.handles.len()
    }

    pub(crate) fn notify(&self, mut f: impl FnMut(&mut dyn ScheduleObserver)) {
        for handle in &self.handles {
            f(&mut *handle.borrow_mut());
        }
    }
}

/// Observer that records every notification as a `ScheduleEvent`.
#[derive(Debug, Default)]
pub struct EventRecorder {
    events: Vec<ScheduleEvent>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[ScheduleEvent] {
        &self.events
    }

    /// Drain recorded events.
    pub fn take(&mut self) -> Vec<ScheduleEvent> {
        mem::take(&mut self.events)
    }
}

impl ScheduleObserver for EventRecorder {
    fn on_wave_start(&mut self, wave_number: u32, total_waves: u32, wave: &WaveDefinition) {
        self.events.push(ScheduleEvent::WaveStart {
            wave_number,
            total_waves,
            count: wave.count,
        });
    }

    fn on_wave_complete(&mut self, wave_number: u32, total_waves: u32) {
        self.events.push(ScheduleEvent::WaveComplete {
            wave_number,
            total_waves,
        });
    }

    fn on_intermission(&mut self, next_wave: u32, total_waves: u32, time_remaining: f32) {
        self.events.push(ScheduleEvent::Intermission {
            next_wave,
            total_waves,
            time_remaining,
        });
    }

    fn on_schedule_complete(&mut self) {
        self.events.push(ScheduleEvent::ScheduleComplete);
    }
}
