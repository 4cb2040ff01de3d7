use derive_more::{Display, FromStr};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

///
/// ScalarType
///
/// Value types a feature field may declare. Serialized by name so that
/// manifests spell types as plain strings ("Float32", "Int64").
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, PartialEq)]
#[remain::sorted]
pub enum ScalarType {
    Bool,
    Bytes,
    Float32,
    Float64,
    Int32,
    Int64,
    String,
    UnixTimestamp,
}

impl ScalarType {
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_int(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        self.is_float() || self.is_int()
    }

    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::UnixTimestamp)
    }
}

impl Serialize for ScalarType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScalarType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;

        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown scalar type '{s}'")))
    }
}

///
/// TESTS
///
