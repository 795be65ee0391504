use glam::DVec2;

/// Fixed-capacity ring of trail points sampled at a fixed simulated-time
/// interval. Once full, each append overwrites the oldest point.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailBuffer {
    slots: Vec<DVec2>,
    capacity: usize,
    /// Index of the oldest point.
    head: usize,
    len: usize,
    interval_s: f64,
    last_sample_s: f64,
}

impl TrailBuffer {
    /// `capacity` is raised to at least one point.
    pub fn new(capacity: usize, interval_s: f64) -> Self {
        let capacity = capacity.max(1);
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            len: 0,
            interval_s,
            last_sample_s: 0.0,
        }
    }

    /// Appends `position` once `time_s` is at least one interval past the
    /// previous sample. Returns whether a point was recorded.
    pub fn sample(&mut self, time_s: f64, position: DVec2) -> bool {
        if time_s < self.last_sample_s + self.interval_s {
            return false;
        }
        self.push(position);
        self.last_sample_s = time_s;
        true
    }

    /// Appends the terminal point unless it repeats the newest one.
    pub fn finish(&mut self, position: DVec2) -> bool {
        if self.last() == Some(position) {
            return false;
        }
        self.push(position);
        true
    }

    fn push(&mut self, position: DVec2) {
        if self.slots.len() < self.capacity {
            self.slots.push(position);
            self.len += 1;
            return;
        }
        // Full: the write cursor is the oldest slot.
        self.slots[self.head] = position;
        self.head = (self.head + 1) % self.capacity;
        tracing::debug!(capacity = self.capacity, "trail full, evicted oldest point");
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = 0;
        self.len = 0;
        self.last_sample_s = 0.0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last(&self) -> Option<DVec2> {
        if self.len == 0 {
            return None;
        }
        let newest = (self.head + self.len - 1) % self.capacity;
        self.slots.get(newest).copied()
    }

    /// Points from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = DVec2> + '_ {
        (0..self.len).map(move |i| self.slots[(self.head + i) % self.capacity])
    }

    pub fn to_vec(&self) -> Vec<DVec2> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::TrailBuffer;

    fn p(x: f64) -> DVec2 {
        DVec2::new(x, 0.0)
    }

    #[test]
    fn samples_respect_interval() {
        let mut trail = TrailBuffer::new(10, 0.05);
        assert!(!trail.sample(0.01, p(1.0)));
        assert!(trail.sample(0.05, p(2.0)));
        assert!(!trail.sample(0.08, p(3.0)));
        assert!(trail.sample(0.11, p(4.0)));
        assert_eq!(trail.to_vec(), vec![p(2.0), p(4.0)]);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut trail = TrailBuffer::new(3, 1.0);
        for i in 1..=5 {
            trail.sample(i as f64, p(i as f64));
        }
        assert_eq!(trail.len(), 3);
        assert_eq!(trail.to_vec(), vec![p(3.0), p(4.0), p(5.0)]);
        assert_eq!(trail.last(), Some(p(5.0)));
    }

    #[test]
    fn finish_skips_duplicate_terminal_point() {
        let mut trail = TrailBuffer::new(4, 1.0);
        assert!(trail.finish(p(7.0)));
        assert!(!trail.finish(p(7.0)));
        assert!(trail.finish(p(8.0)));
        assert_eq!(trail.to_vec(), vec![p(7.0), p(8.0)]);
    }

    #[test]
    fn finish_on_full_buffer_still_ends_with_final_point() {
        let mut trail = TrailBuffer::new(2, 1.0);
        trail.sample(1.0, p(1.0));
        trail.sample(2.0, p(2.0));
        trail.finish(p(2.5));
        assert_eq!(trail.to_vec(), vec![p(2.0), p(2.5)]);
    }

    #[test]
    fn clear_restarts_sampling_clock() {
        let mut trail = TrailBuffer::new(4, 0.5);
        trail.sample(3.0, p(1.0));
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.last(), None);
        assert!(trail.sample(0.5, p(2.0)));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut trail = TrailBuffer::new(0, 0.1);
        trail.finish(p(1.0));
        trail.finish(p(2.0));
        assert_eq!(trail.capacity(), 1);
        assert_eq!(trail.to_vec(), vec![p(2.0)]);
    }
}
