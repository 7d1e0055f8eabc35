use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Playthrough {
    Normal,
    Tvhm,
    Uvhm,
}

impl Playthrough {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Normal, Self::Tvhm, Self::Uvhm];

    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Normal),
            1 => Some(Self::Tvhm),
            2 => Some(Self::Uvhm),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        match *self {
            Self::Normal => 0,
            Self::Tvhm => 1,
            Self::Uvhm => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match *self {
            Self::Normal => "Normal Mode",
            Self::Tvhm => "True Vault Hunter Mode",
            Self::Uvhm => "Ultimate Vault Hunter Mode",
        }
    }

    pub fn short_code(&self) -> &'static str {
        match *self {
            Self::Normal => "NVHM",
            Self::Tvhm => "TVHM",
            Self::Uvhm => "UVHM",
        }
    }
}

impl fmt::Display for Playthrough {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
