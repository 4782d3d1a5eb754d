use std::time::Duration;

use contact_portal_common::service::Scheduler;

/// [Scheduler] backed by the browser's `setTimeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutScheduler;

impl Scheduler for TimeoutScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        leptos::set_timeout(task, delay);
    }
}
