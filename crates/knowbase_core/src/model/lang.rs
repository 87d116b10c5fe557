//! Language codes supported by the knowledge engine.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Language variant of a knowledge text blob.
///
/// Serialized as its stable lowercase code (`en` | `vi`), which is also the
/// key used by the persistence gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lang {
    /// English.
    En,
    /// Vietnamese.
    Vi,
}

impl Lang {
    /// Both languages in storage order.
    pub const ALL: [Lang; 2] = [Lang::En, Lang::Vi];

    /// Returns the stable wire/storage code.
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Vi => "vi",
        }
    }
}

impl Display for Lang {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Returned when a language code is not `en` or `vi`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLang(pub String);

impl Display for UnknownLang {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unsupported language `{}`; expected en|vi", self.0)
    }
}

impl Error for UnknownLang {}

impl FromStr for Lang {
    type Err = UnknownLang;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "vi" => Ok(Self::Vi),
            other => Err(UnknownLang(other.to_string())),
        }
    }
}
