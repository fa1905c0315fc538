use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as DeError};
use std::fmt;
use std::str::FromStr;

/// Spending bucket an expense is filed under.
///
/// The set is closed; the declaration order is also the menu and report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Clothing,
    Entertainment,
    Rent,
}

/// Returned when a category name is not one of the known buckets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Food,
        Category::Clothing,
        Category::Entertainment,
        Category::Rent,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Clothing => "Clothing",
            Category::Entertainment => "Entertainment",
            Category::Rent => "Rent",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Category::from_str(&s).map_err(DeError::custom)
    }
}
