use std::fmt;
use std::str::FromStr;

/// Color space tag stamped into every color entry of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    #[default]
    Srgb,
    DisplayP3,
    ExtendedSrgb,
    ExtendedLinearSrgb,
}

impl ColorSpace {
    pub const ALL: [ColorSpace; 4] = [
        ColorSpace::Srgb,
        ColorSpace::DisplayP3,
        ColorSpace::ExtendedSrgb,
        ColorSpace::ExtendedLinearSrgb,
    ];

    /// The tag as written in `Contents.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorSpace::Srgb => "srgb",
            ColorSpace::DisplayP3 => "display-p3",
            ColorSpace::ExtendedSrgb => "extended-srgb",
            ColorSpace::ExtendedLinearSrgb => "extended-linear-srgb",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unknown color space '{0}' \
     (expected srgb, display-p3, extended-srgb or extended-linear-srgb)"
)]
pub struct UnknownColorSpace(pub String);

impl FromStr for ColorSpace {
    type Err = UnknownColorSpace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ColorSpace::ALL
            .into_iter()
            .find(|space| space.as_str() == lower)
            .ok_or_else(|| UnknownColorSpace(s.to_string()))
    }
}
