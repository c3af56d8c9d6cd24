use chrono::{DateTime, Utc};

#[derive(Debug)]
struct Scheduled<T> {
    run_at: DateTime<Utc>,
    item: T,
}

/// Deferred work driven entirely by caller-supplied clock readings, so tests
/// advance time by passing later instants instead of sleeping. Tasks due at
/// the same poll come back in scheduling order.
#[derive(Debug)]
pub struct TaskQueue<T> {
    tasks: Vec<Scheduled<T>>,
}

impl<T> TaskQueue<T> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn schedule(&mut self, run_at: DateTime<Utc>, item: T) {
        self.tasks.push(Scheduled { run_at, item });
    }

    /// Removes and returns every task whose deadline is at or before `now`.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<T> {
        let mut due = Vec::new();
        let mut ix = 0;
        while ix < self.tasks.len() {
            if self.tasks[ix].run_at <= now {
                due.push(self.tasks.remove(ix).item);
            } else {
                ix += 1;
            }
        }
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
