use serde::de::{Deserialize, Deserializer, Error};
use serde::ser::{Serialize, Serializer};
use crate::Rope;

// Ropes serialize as a plain string. The tree shape isn't preserved.
impl Serialize for Rope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rope {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rope::try_from_string(s).map_err(D::Error::custom)
    }
}
