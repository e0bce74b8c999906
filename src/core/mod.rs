pub mod color;
pub mod error;
pub mod frame;
pub mod logging;
pub mod math;
pub mod random;

pub use color::{ColorValue, Rgb};
pub use error::{EngineError, Result};
pub use frame::FrameDelta;
pub use math::Vec2;
pub use random::{Rng, SingleOrMultiple};
