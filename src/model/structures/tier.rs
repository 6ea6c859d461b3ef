use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::{convert::TryFrom, fmt, str::FromStr};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::model::{constants::MAX_LADDER_INDEX, error::ValidationError};

#[derive(
    Deserialize_repr,
    Serialize_repr,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Tier {
    Bronze = 0,
    Silver = 1,
    Gold = 2,
    Platinum = 3,
    Diamond = 4,
    Emerald = 5,
    Nightmare = 6
}

impl Tier {
    /// Number of divisions within this tier
    pub fn divisions(self) -> u8 {
        match self {
            Tier::Bronze | Tier::Silver | Tier::Gold | Tier::Platinum => 4,
            Tier::Diamond => 3,
            Tier::Emerald | Tier::Nightmare => 1
        }
    }

    /// Ladder index of this tier's first division
    pub fn first_index(self) -> u8 {
        Tier::iter().take_while(|t| *t != self).map(Tier::divisions).sum()
    }

    pub fn is_terminal(self) -> bool {
        self == Tier::Nightmare
    }
}

impl TryFrom<i32> for Tier {
    type Error = ();

    fn try_from(v: i32) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Tier::Bronze),
            1 => Ok(Tier::Silver),
            2 => Ok(Tier::Gold),
            3 => Ok(Tier::Platinum),
            4 => Ok(Tier::Diamond),
            5 => Ok(Tier::Emerald),
            6 => Ok(Tier::Nightmare),
            _ => Err(())
        }
    }
}

/// A human-facing rank label such as "Gold 2". Bijective with the 0..=20 ladder index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rung {
    pub tier: Tier,
    pub division: u8
}

impl Rung {
    pub fn new(tier: Tier, division: u8) -> Result<Rung, ValidationError> {
        if division == 0 || division > tier.divisions() {
            return Err(ValidationError::InvalidDivision {
                tier: tier.to_string(),
                division
            });
        }

        Ok(Rung { tier, division })
    }

    pub fn ladder_index(&self) -> u8 {
        self.tier.first_index() + self.division - 1
    }

    pub fn from_ladder_index(index: u8) -> Result<Rung, ValidationError> {
        if index > MAX_LADDER_INDEX {
            return Err(ValidationError::LadderIndexOutOfRange(index as i64));
        }

        Tier::iter()
            .find(|t| index < t.first_index() + t.divisions())
            .map(|tier| Rung {
                tier,
                division: index - tier.first_index() + 1
            })
            .ok_or(ValidationError::LadderIndexOutOfRange(index as i64))
    }
}

impl fmt::Display for Rung {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tier.divisions() == 1 {
            write!(f, "{}", self.tier)
        } else {
            write!(f, "{} {}", self.tier, self.division)
        }
    }
}

impl FromStr for Rung {
    type Err = ValidationError;

    /// Parses labels like "Gold 2", "silver 4", "Emerald" or "Nightmare 1".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        let (name, division) = match parts.as_slice() {
            [name] => (*name, None),
            [name, division] => (*name, Some(*division)),
            _ => return Err(ValidationError::MalformedRank(s.to_string()))
        };

        let tier = Tier::from_str(name).map_err(|_| ValidationError::UnknownTier(name.to_string()))?;

        let division = match division {
            Some(d) => d
                .parse::<u8>()
                .map_err(|_| ValidationError::MalformedRank(s.to_string()))?,
            None if tier.divisions() == 1 => 1,
            None => return Err(ValidationError::MalformedRank(s.to_string()))
        };

        Rung::new(tier, division)
    }
}
