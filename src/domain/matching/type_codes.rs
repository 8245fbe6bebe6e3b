//! Categorical type codes: the 4-axis primary code and the 16-value
//! secondary code with its fixed quadra grouping.
//!
//! Codes are parsed once at ingestion. Anything malformed becomes `None`
//! ("unknown") and is never partially trusted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of axes in a primary type code.
pub const PRIMARY_AXES: usize = 4;

/// Placeholder letter marking an axis as undetermined (e.g. `"XNTP"`).
pub const UNKNOWN_AXIS: u8 = b'X';

/// A fully determined 4-axis primary type code such as `"ENFP"`.
///
/// Each position is one independent binary axis; only positional equality
/// between two codes is ever inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimaryTypeCode([u8; PRIMARY_AXES]);

impl PrimaryTypeCode {
    /// Parses a code, returning `None` for anything not exactly four ASCII
    /// letters or containing the placeholder letter.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let bytes = raw.as_bytes();
        if bytes.len() != PRIMARY_AXES {
            return None;
        }

        let mut axes = [0u8; PRIMARY_AXES];
        for (slot, byte) in axes.iter_mut().zip(bytes) {
            let upper = byte.to_ascii_uppercase();
            if !upper.is_ascii_alphabetic() || upper == UNKNOWN_AXIS {
                return None;
            }
            *slot = upper;
        }
        Some(Self(axes))
    }

    /// Per-axis equality against another code.
    pub fn axis_matches(&self, other: &PrimaryTypeCode) -> [bool; PRIMARY_AXES] {
        let mut same = [false; PRIMARY_AXES];
        for (i, slot) in same.iter_mut().enumerate() {
            *slot = self.0[i] == other.0[i];
        }
        same
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for PrimaryTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PrimaryTypeCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// One of the four fixed value groups of secondary types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadra {
    Alpha,
    Beta,
    Gamma,
    Delta,
}

impl Quadra {
    pub const ALL: [Quadra; 4] = [Quadra::Alpha, Quadra::Beta, Quadra::Gamma, Quadra::Delta];

    /// The four members of this quadra.
    pub fn members(&self) -> [SecondaryType; 4] {
        use SecondaryType::*;
        match self {
            Quadra::Alpha => [Ile, Sei, Ese, Lii],
            Quadra::Beta => [Eie, Lsi, Sle, Iei],
            Quadra::Gamma => [See, Ili, Lie, Esi],
            Quadra::Delta => [Lse, Eii, Iee, Sli],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Quadra::Alpha => "Alpha",
            Quadra::Beta => "Beta",
            Quadra::Gamma => "Gamma",
            Quadra::Delta => "Delta",
        }
    }
}

impl fmt::Display for Quadra {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The sixteen known secondary type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SecondaryType {
    Ile,
    Sei,
    Ese,
    Lii,
    Eie,
    Lsi,
    Sle,
    Iei,
    See,
    Ili,
    Lie,
    Esi,
    Lse,
    Eii,
    Iee,
    Sli,
}

impl SecondaryType {
    pub const ALL: [SecondaryType; 16] = [
        SecondaryType::Ile,
        SecondaryType::Sei,
        SecondaryType::Ese,
        SecondaryType::Lii,
        SecondaryType::Eie,
        SecondaryType::Lsi,
        SecondaryType::Sle,
        SecondaryType::Iei,
        SecondaryType::See,
        SecondaryType::Ili,
        SecondaryType::Lie,
        SecondaryType::Esi,
        SecondaryType::Lse,
        SecondaryType::Eii,
        SecondaryType::Iee,
        SecondaryType::Sli,
    ];

    /// Parses a code case-insensitively; unknown codes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    pub fn code(&self) -> &'static str {
        match self {
            SecondaryType::Ile => "ILE",
            SecondaryType::Sei => "SEI",
            SecondaryType::Ese => "ESE",
            SecondaryType::Lii => "LII",
            SecondaryType::Eie => "EIE",
            SecondaryType::Lsi => "LSI",
            SecondaryType::Sle => "SLE",
            SecondaryType::Iei => "IEI",
            SecondaryType::See => "SEE",
            SecondaryType::Ili => "ILI",
            SecondaryType::Lie => "LIE",
            SecondaryType::Esi => "ESI",
            SecondaryType::Lse => "LSE",
            SecondaryType::Eii => "EII",
            SecondaryType::Iee => "IEE",
            SecondaryType::Sli => "SLI",
        }
    }

    /// The quadra this type belongs to.
    pub fn quadra(&self) -> Quadra {
        use SecondaryType::*;
        match self {
            Ile | Sei | Ese | Lii => Quadra::Alpha,
            Eie | Lsi | Sle | Iei => Quadra::Beta,
            See | Ili | Lie | Esi => Quadra::Gamma,
            Lse | Eii | Iee | Sli => Quadra::Delta,
        }
    }
}

impl FromStr for SecondaryType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        SecondaryType::ALL
            .iter()
            .copied()
            .find(|t| t.code() == upper)
            .ok_or(())
    }
}

impl fmt::Display for SecondaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
