use std::cmp::Ordering;
use std::fmt;

use chrono::prelude::*;
use chrono::{SecondsFormat, SubsecRound};
use serde::de::{self, Deserialize, Deserializer, Unexpected, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::errors::*;

/// A UTC instant that always travels as an RFC 3339 string.
#[derive(Debug, Clone, Eq)]
pub struct SignedAt {
    inner: DateTime<Utc>,
    rendered: String,
}

impl Serialize for SignedAt {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SignedAt {
    fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TimeVisitor;

        impl<'de> Visitor<'de> for TimeVisitor {
            type Value = SignedAt;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a valid rfc3339 string")
            }

            fn visit_str<E>(self, s: &str) -> ::std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                SignedAt::parse(s).map_err(|_| de::Error::invalid_value(Unexpected::Str(s), &self))
            }
        }

        deserializer.deserialize_str(TimeVisitor)
    }
}

impl Ord for SignedAt {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}

impl PartialOrd for SignedAt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SignedAt {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Display for SignedAt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl SignedAt {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Sub-millisecond precision is dropped so the value survives a text round trip.
    pub fn from_datetime(time: DateTime<Utc>) -> Self {
        let time = time.trunc_subsecs(3);
        Self {
            inner: time,
            rendered: time.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let time = DateTime::parse_from_rfc3339(input)
            .map_err(|e| ErrorKind::Decode(format!("bad timestamp {:?}: {}", input, e)))?
            .with_timezone(&Utc);

        Ok(Self::from_datetime(time))
    }

    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn inner(&self) -> &DateTime<Utc> {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_to_utc() {
        let t = SignedAt::parse("2024-03-01T12:30:00+02:00").unwrap();
        assert_eq!(t.as_str(), "2024-03-01T10:30:00.000Z");
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(SignedAt::parse("yesterday").is_err());
    }

    #[test]
    fn serde_as_string() {
        let t = SignedAt::parse("2024-03-01T10:30:00Z").unwrap();
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"2024-03-01T10:30:00.000Z\"");

        let back: SignedAt = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<SignedAt>("\"nope\"").is_err());
    }

    #[test]
    fn ordering_follows_time() {
        let a = SignedAt::parse("2024-03-01T10:30:00Z").unwrap();
        let b = SignedAt::parse("2024-03-01T10:30:01Z").unwrap();
        assert!(a < b);
    }
}
