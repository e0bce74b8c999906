pub mod ids;
pub mod options;
pub mod retina;

pub use ids::{EmitterId, ParticleId};
pub use options::Options;
pub use retina::{ParticleRetina, Retina};
