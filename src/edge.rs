// src/edge.rs

/// Level above which a control lane reads as "high".
pub const GATE_THRESHOLD: f32 = 0.5;

/// Transition reported for one control lane on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    #[default]
    None,
    Rising,
    Falling,
}

impl Edge {
    #[inline]
    pub fn is_rising(self) -> bool {
        self == Edge::Rising
    }

    #[inline]
    pub fn is_falling(self) -> bool {
        self == Edge::Falling
    }
}

#[inline]
pub fn is_high(level: f32) -> bool {
    level > GATE_THRESHOLD
}

/// Rising/falling detection against the immediately prior observation.
///
/// One detector per lane; gate and trigger never share history.
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector {
    prev: f32,
}

impl EdgeDetector {
    /// Seed with the lane's first observed value so the first tick
    /// cannot report an edge on its own.
    pub fn new(initial: f32) -> Self {
        Self { prev: initial }
    }

    #[inline]
    pub fn process(&mut self, level: f32) -> Edge {
        let was_high = is_high(self.prev);
        let now_high = is_high(level);
        self.prev = level;

        match (was_high, now_high) {
            (false, true) => Edge::Rising,
            (true, false) => Edge::Falling,
            _ => Edge::None,
        }
    }

    #[inline]
    pub fn previous(&self) -> f32 {
        self.prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        let mut det = EdgeDetector::new(0.0);
        assert_eq!(det.process(0.5), Edge::None);
        assert_eq!(det.process(0.5001), Edge::Rising);
        assert_eq!(det.process(0.5), Edge::Falling);
    }

    #[test]
    fn test_one_rising_edge_per_transition() {
        let mut det = EdgeDetector::new(0.0);
        let levels = [0.0, 1.0, 1.0, 0.8, 0.2, 0.0, 0.9, 1.0];
        let rising = levels
            .iter()
            .filter(|&&v| det.process(v) == Edge::Rising)
            .count();
        assert_eq!(rising, 2);
    }

    #[test]
    fn test_seeded_high_does_not_fire() {
        let mut det = EdgeDetector::new(1.0);
        assert_eq!(det.process(1.0), Edge::None);
        assert_eq!(det.process(0.0), Edge::Falling);
        assert_eq!(det.previous(), 0.0);
    }
}
