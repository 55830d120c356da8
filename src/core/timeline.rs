use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// One pending task on the timeline.
struct Entry<T> {
    fire_at_sec: f64,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_sec.total_cmp(&other.fire_at_sec) == Ordering::Equal && self.seq == other.seq
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap (a max-heap) yields the earliest entry
        // first; ties break in scheduling order.
        other
            .fire_at_sec
            .total_cmp(&self.fire_at_sec)
            .then(other.seq.cmp(&self.seq))
    }
}

/// Priority queue of self-rescheduling tasks keyed by absolute fire time.
///
/// Every recurring behavior in this piece (frequency sweeps, detune drift,
/// glitch bursts) computes its next delay from fresh randomness, so tasks are
/// re-armed by their handlers rather than repeated at a fixed period. Callers
/// drain due tasks each tick:
///
/// ```ignore
/// while let Some(task) = timeline.pop_due(now_sec) {
///     // handle, then timeline.schedule(now_sec + next_delay, task)
/// }
/// ```
pub struct Timeline<T> {
    heap: BinaryHeap<Entry<T>>,
    seq: u64,
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Timeline<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Arm `task` to fire at the absolute time `fire_at_sec`.
    pub fn schedule(&mut self, fire_at_sec: f64, task: T) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Entry {
            fire_at_sec,
            seq,
            task,
        });
    }

    /// Pop the earliest task whose fire time is at or before `now_sec`.
    pub fn pop_due(&mut self, now_sec: f64) -> Option<T> {
        if self.heap.peek()?.fire_at_sec <= now_sec {
            self.heap.pop().map(|e| e.task)
        } else {
            None
        }
    }

    /// Fire time of the next pending task, if any.
    pub fn next_fire_at(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.fire_at_sec)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
