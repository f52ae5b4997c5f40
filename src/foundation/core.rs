use std::fmt;

/// Identifier of a video in the catalog.
///
/// Ids are usually integers (database ids) but any string is accepted. Numeric strings are read
/// back as integers so that JSON object keys (`"0"`) and catalog ids (`0`) compare equal.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VideoId {
    /// Integer id.
    Int(i64),
    /// Free-form string id.
    Name(String),
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Name(v) => f.write_str(v),
        }
    }
}

impl From<i64> for VideoId {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for VideoId {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for VideoId {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<&str> for VideoId {
    fn from(v: &str) -> Self {
        Self::parse(v)
    }
}

impl From<String> for VideoId {
    fn from(v: String) -> Self {
        Self::parse(&v)
    }
}

impl VideoId {
    /// Parse a textual id, preferring the integer form.
    pub fn parse(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Name(s.to_owned()),
        }
    }
}

impl serde::Serialize for VideoId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Name(v) => serializer.serialize_str(v),
        }
    }
}

impl<'de> serde::Deserialize<'de> for VideoId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = VideoId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an integer or string video id")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<VideoId, E> {
                Ok(VideoId::Int(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<VideoId, E> {
                i64::try_from(v)
                    .map(VideoId::Int)
                    .map_err(|_| E::custom(format!("video id {v} is out of range")))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<VideoId, E> {
                Ok(VideoId::parse(v))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
