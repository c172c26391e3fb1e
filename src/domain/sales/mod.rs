pub mod rng;
pub mod synthesizer;
pub mod types;

pub use rng::DeterministicRng;
pub use synthesizer::{SalesSynthesizer, SynthesisProfile};
pub use types::{PaymentMethod, Platform, Sale, SaleStatus};
