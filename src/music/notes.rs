//! Reference pitches for equal temperament at A4 = 440 Hz, C2 through B7.

use serde::Serialize;
use std::fmt;

pub const PITCH_CLASSES: usize = 12;
pub const OCTAVES: usize = 6;

pub const NOTE_NAMES: [&str; PITCH_CLASSES] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Ascending by octave, chromatic from C within each octave. Entry `i` has pitch class `i % 12`.
pub const NOTE_FREQUENCIES_HZ: [f32; PITCH_CLASSES * OCTAVES] = [
    65.41, 69.30, 73.42, 77.78, 82.41, 87.31, 92.50, 98.00, 103.88, 110.00, 116.54, 123.47,
    130.81, 138.59, 146.83, 155.56, 164.81, 174.61, 185.00, 196.00, 207.65, 220.00, 233.08, 246.94,
    261.63, 277.18, 293.66, 311.13, 329.63, 349.23, 369.99, 392.00, 415.30, 440.00, 466.15, 493.88,
    523.25, 554.37, 587.33, 622.25, 659.25, 698.46, 739.99, 783.99, 830.61, 880.00, 932.33, 987.77,
    1046.50, 1108.73, 1174.66, 1244.51, 1318.51, 1396.91,
    1479.98, 1567.98, 1661.22, 1760.00, 1864.66, 1975.53,
    2093.00, 2217.46, 2349.32, 2489.02, 2637.02, 2793.83,
    2959.96, 3135.96, 3322.44, 3520.00, 3729.31, 3951.07,
];

/// Octave-independent note, 0 = C through 11 = B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Wraps any integer into `0..12`.
    pub const fn new(value: usize) -> Self {
        Self((value % PITCH_CLASSES) as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..PITCH_CLASSES).map(PitchClass::new)
    }

    /// Reference frequency of this pitch class in every octave of the table, lowest first.
    pub fn octave_frequencies(self) -> impl Iterator<Item = f32> {
        NOTE_FREQUENCIES_HZ
            .into_iter()
            .skip(self.index())
            .step_by(PITCH_CLASSES)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
