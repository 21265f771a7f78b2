use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar grains that carry no time zone of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultTimeGrain {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl DefaultTimeGrain {
    pub const ALL: [Self; 7] =
        [Self::Minute, Self::Hour, Self::Day, Self::Week, Self::Month, Self::Quarter, Self::Year];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
        }
    }

    /// Case-insensitive lookup by [`DefaultTimeGrain::name`].
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|grain| grain.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for DefaultTimeGrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of parsing a granularity name: either a time grain or the `all` bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// Everything in one bucket; not a time grain.
    All,
    Grain(DefaultTimeGrain),
}

impl Granularity {
    pub const ALL_NAME: &'static str = "all";

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::All => Self::ALL_NAME,
            Self::Grain(grain) => grain.name(),
        }
    }

    /// The grain, when this granularity is a zoneless time grain.
    #[must_use]
    pub const fn zoneless(self) -> Option<DefaultTimeGrain> {
        match self {
            Self::All => None,
            Self::Grain(grain) => Some(grain),
        }
    }
}

impl From<DefaultTimeGrain> for Granularity {
    fn from(grain: DefaultTimeGrain) -> Self {
        Self::Grain(grain)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
