use serde::{Deserialize, Serialize};
use std::fmt;

/// Common velocity values, named after dynamic markings.
///
/// `Silent` is kept for completeness but is not a playable note velocity:
/// building a note with it fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Velocity {
    Silent = 0,
    /// pianississimo
    Ppp = 16,
    /// pianissimo
    Pp = 32,
    /// piano
    P = 48,
    /// mezzo-piano
    Mp = 64,
    /// mezzo-forte
    Mf = 80,
    /// forte
    F = 96,
    /// fortissimo
    Ff = 112,
    /// fortississimo
    Fff = 127,
}

impl Velocity {
    pub const ALL: [Velocity; 9] = [
        Velocity::Silent,
        Velocity::Ppp,
        Velocity::Pp,
        Velocity::P,
        Velocity::Mp,
        Velocity::Mf,
        Velocity::F,
        Velocity::Ff,
        Velocity::Fff,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn marking(self) -> &'static str {
        match self {
            Velocity::Silent => "silent",
            Velocity::Ppp => "ppp",
            Velocity::Pp => "pp",
            Velocity::P => "p",
            Velocity::Mp => "mp",
            Velocity::Mf => "mf",
            Velocity::F => "f",
            Velocity::Ff => "ff",
            Velocity::Fff => "fff",
        }
    }

    /// Look up a dynamic marking such as "mf" (case-insensitive).
    pub fn from_marking(marking: &str) -> Option<Velocity> {
        let marking = marking.to_lowercase();
        Self::ALL.into_iter().find(|v| v.marking() == marking)
    }
}

impl fmt::Display for Velocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marking())
    }
}

impl From<Velocity> for u8 {
    fn from(velocity: Velocity) -> Self {
        velocity.value()
    }
}

impl From<Velocity> for i32 {
    fn from(velocity: Velocity) -> Self {
        velocity.value() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values() {
        assert_eq!(Velocity::Silent.value(), 0);
        assert_eq!(Velocity::Mf.value(), 80);
        assert_eq!(i32::from(Velocity::Fff), 127);
    }

    #[test]
    fn test_from_marking() {
        assert_eq!(Velocity::from_marking("MF"), Some(Velocity::Mf));
        assert_eq!(Velocity::from_marking("ppp"), Some(Velocity::Ppp));
        assert_eq!(Velocity::from_marking("loud"), None);
    }

    #[test]
    fn test_ordering_follows_loudness() {
        let mut sorted = Velocity::ALL;
        sorted.sort_by_key(|v| v.value());
        assert_eq!(sorted, Velocity::ALL);
    }
}
