use serde::{Deserialize, Serialize};

const DEFAULT_SEED: u32 = 0x2545_F491;

/// Random number generator (xorshift32)
#[inline]
pub fn xorshift32(state: &mut u32) -> u32 {
    let mut x = *state;
    x ^= x << 13;
    x ^= x >> 17;
    x ^= x << 5;
    *state = x;
    x
}

/// Seeded generator. Every random choice a particle makes at construction
/// goes through one of these, so a seed reproduces a whole run.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u32,
}

impl Rng {
    pub fn new(seed: u32) -> Self {
        // xorshift never leaves the zero state
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        xorshift32(&mut self.state)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform in `[min, max)`; the bounds may be given in either order.
    pub fn range(&mut self, a: f32, b: f32) -> f32 {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        min + self.next_f32() * (max - min)
    }

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    pub fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f32() * len as f32) as usize).min(len - 1)
    }

    pub fn chance(&mut self, probability: f32) -> bool {
        self.next_f32() < probability
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

/// Option value that is either a single entry or a list to pick from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SingleOrMultiple<T> {
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrMultiple<T> {
    pub fn pick(&self, rng: &mut Rng) -> Option<&T> {
        self.pick_indexed(rng).map(|(_, value)| value)
    }

    /// Random pick that also reports the index that was chosen.
    pub fn pick_indexed(&self, rng: &mut Rng) -> Option<(usize, &T)> {
        match self {
            SingleOrMultiple::Single(value) => Some((0, value)),
            SingleOrMultiple::Multiple(values) if values.is_empty() => None,
            SingleOrMultiple::Multiple(values) => {
                let index = rng.index(values.len());
                Some((index, &values[index]))
            }
        }
    }

    /// A single value answers every index.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            SingleOrMultiple::Single(value) => Some(value),
            SingleOrMultiple::Multiple(values) => values.get(index),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            SingleOrMultiple::Single(value) => std::slice::from_ref(value).iter(),
            SingleOrMultiple::Multiple(values) => values.iter(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SingleOrMultiple::Single(_) => 1,
            SingleOrMultiple::Multiple(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: PartialEq> SingleOrMultiple<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }
}

impl<T: Default> Default for SingleOrMultiple<T> {
    fn default() -> Self {
        SingleOrMultiple::Single(T::default())
    }
}
