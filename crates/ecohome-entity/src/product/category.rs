//! Product category enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed set of storefront categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Kitchen.
    #[serde(rename = "cocina")]
    Kitchen,
    /// Living room.
    #[serde(rename = "sala")]
    LivingRoom,
    /// Bathroom.
    #[serde(rename = "baño")]
    Bathroom,
    /// Decoration.
    #[serde(rename = "decoración")]
    Decoration,
    /// Garden.
    #[serde(rename = "jardín")]
    Garden,
}

impl Category {
    /// Return the wire name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kitchen => "cocina",
            Self::LivingRoom => "sala",
            Self::Bathroom => "baño",
            Self::Decoration => "decoración",
            Self::Garden => "jardín",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ecohome_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cocina" => Ok(Self::Kitchen),
            "sala" => Ok(Self::LivingRoom),
            "baño" => Ok(Self::Bathroom),
            "decoración" => Ok(Self::Decoration),
            "jardín" => Ok(Self::Garden),
            _ => Err(ecohome_core::AppError::validation(format!(
                "Invalid category: '{s}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_roundtrip() {
        for cat in [
            Category::Kitchen,
            Category::LivingRoom,
            Category::Bathroom,
            Category::Decoration,
            Category::Garden,
        ] {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
            assert_eq!(serde_json::to_string(&cat).unwrap(), format!("\"{}\"", cat.as_str()));
        }
    }
}
