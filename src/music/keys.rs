use std::fmt;

use super::notes::{PitchClass, PITCH_CLASSES};

/// Semitone offsets of the major scale from its tonic.
pub const MAJOR_SCALE_TEMPLATE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Major key signatures rooted on C, C#, ..., B.
pub const KEY_SIGNATURES: [KeySignature; PITCH_CLASSES] = make_key_signatures();

/// The seven pitch classes of a major scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySignature {
    tonic: u8,
    degrees: [u8; 7],
}

impl KeySignature {
    pub const fn for_tonic(tonic: usize) -> Self {
        let tonic = (tonic % PITCH_CLASSES) as u8;
        let mut degrees = [0u8; 7];
        let mut i = 0;
        while i < degrees.len() {
            degrees[i] = (MAJOR_SCALE_TEMPLATE[i] + tonic) % PITCH_CLASSES as u8;
            i += 1;
        }
        Self { tonic, degrees }
    }

    pub fn tonic(&self) -> PitchClass {
        PitchClass::new(self.tonic as usize)
    }

    /// Scale degrees in ascending scale order starting at the tonic.
    pub fn degrees(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.degrees.iter().map(|&d| PitchClass::new(d as usize))
    }

    pub fn contains(&self, pitch: PitchClass) -> bool {
        self.degrees.iter().any(|&d| d as usize == pitch.index())
    }

    /// `mask[p]` is true when pitch class `p` belongs to the key.
    pub fn mask(&self) -> [bool; PITCH_CLASSES] {
        let mut mask = [false; PITCH_CLASSES];
        for &d in &self.degrees {
            mask[d as usize] = true;
        }
        mask
    }
}

impl fmt::Display for KeySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<2} major:", self.tonic().name())?;
        for pc in self.degrees() {
            write!(f, " {:<2}", pc.name())?;
        }
        Ok(())
    }
}

const fn make_key_signatures() -> [KeySignature; PITCH_CLASSES] {
    let mut keys = [KeySignature::for_tonic(0); PITCH_CLASSES];
    let mut t = 1;
    while t < PITCH_CLASSES {
        keys[t] = KeySignature::for_tonic(t);
        t += 1;
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn as_set(key: &KeySignature) -> BTreeSet<usize> {
        key.degrees().map(PitchClass::index).collect()
    }

    #[test]
    fn twelve_signatures_of_seven() {
        assert_eq!(KEY_SIGNATURES.len(), 12);
        for key in &KEY_SIGNATURES {
            let set = as_set(key);
            assert_eq!(set.len(), 7);
            assert!(set.iter().all(|&p| p < 12));
        }
    }

    #[test]
    fn c_major_is_template() {
        let expected: BTreeSet<usize> = [0, 2, 4, 5, 7, 9, 11].into_iter().collect();
        assert_eq!(as_set(&KEY_SIGNATURES[0]), expected);
    }

    #[test]
    fn each_key_is_c_major_transposed() {
        let c_major = as_set(&KEY_SIGNATURES[0]);
        for (t, key) in KEY_SIGNATURES.iter().enumerate() {
            let shifted: BTreeSet<usize> = c_major.iter().map(|&d| (d + t) % 12).collect();
            assert_eq!(as_set(key), shifted, "tonic {}", t);
            assert_eq!(key.tonic().index(), t);
        }
    }

    #[test]
    fn a_major_membership() {
        let a = &KEY_SIGNATURES[9];
        let mask = a.mask();
        for p in [9, 11, 1, 2, 4, 6, 8] {
            assert!(mask[p]);
            assert!(a.contains(PitchClass::new(p)));
        }
        assert!(!a.contains(PitchClass::new(0)));
        assert_eq!(mask.iter().filter(|&&m| m).count(), 7);
    }

    #[test]
    fn display_lists_note_names() {
        assert_eq!(
            KEY_SIGNATURES[0].to_string().split_whitespace().collect::<Vec<_>>(),
            vec!["C", "major:", "C", "D", "E", "F", "G", "A", "B"]
        );
    }
}
