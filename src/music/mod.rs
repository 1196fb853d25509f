pub mod keys;
pub mod notes;

pub use keys::{KeySignature, KEY_SIGNATURES};
pub use notes::{PitchClass, NOTE_FREQUENCIES_HZ, NOTE_NAMES};
