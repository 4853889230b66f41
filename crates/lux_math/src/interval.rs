/// A closed range of ray parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Create a new interval given min and max values.
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Returns the size of the interval (max - min).
    pub fn size(&self) -> f32 {
        self.max - self.min
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Returns true if x is strictly within the interval (min, max) (exclusive).
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Returns true if x is within [min, max).
    ///
    /// Hit tests use this form: the lower bound is the self-intersection
    /// epsilon, and the upper bound is the closest hit found so far, which a
    /// later object has to strictly beat.
    pub fn accepts(&self, x: f32) -> bool {
        self.min <= x && x < self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }

    /// Same interval with a new upper bound.
    pub fn with_max(&self, max: f32) -> Interval {
        Interval::new(self.min, max)
    }

    /// An empty interval (min > max, contains nothing).
    pub const EMPTY: Interval = Interval {
        min: f32::INFINITY,
        max: f32::NEG_INFINITY,
    };

    /// A universe interval (contains everything).
    pub const UNIVERSE: Interval = Interval {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };
}
