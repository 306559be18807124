// Copyright 2023 The RabbitMQ Rust Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use rabbitmq_error::RabbitMQError;
use serde::de;
use serde::de::Visitor;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

/// The delivery-mode octet of the basic class.
///
/// The broker persists messages published with [`DeliveryMode::Persistent`] to
/// disk on durable queues; [`DeliveryMode::NonPersistent`] messages live in
/// memory only.
#[derive(Debug, PartialEq, Copy, Clone, Hash, Eq)]
#[repr(u8)]
pub enum DeliveryMode {
    NonPersistent = 1,
    Persistent = 2,
}

impl DeliveryMode {
    pub fn get_name(&self) -> &'static str {
        match self {
            DeliveryMode::NonPersistent => "NON_PERSISTENT",
            DeliveryMode::Persistent => "PERSISTENT",
        }
    }

    /// Returns the wire octet for this mode.
    #[inline]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Maps a wire octet back to a mode, `None` for anything but 1 or 2.
    pub fn from_u8(value: u8) -> Option<DeliveryMode> {
        match value {
            1 => Some(DeliveryMode::NonPersistent),
            2 => Some(DeliveryMode::Persistent),
            _ => None,
        }
    }
}

impl TryFrom<u8> for DeliveryMode {
    type Error = RabbitMQError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DeliveryMode::from_u8(value).ok_or(RabbitMQError::UnknownDeliveryMode(value))
    }
}

impl From<DeliveryMode> for u8 {
    fn from(mode: DeliveryMode) -> Self {
        mode.as_u8()
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.get_name())
    }
}

impl Serialize for DeliveryMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(match *self {
            DeliveryMode::NonPersistent => "NON_PERSISTENT",
            DeliveryMode::Persistent => "PERSISTENT",
        })
    }
}

impl<'de> Deserialize<'de> for DeliveryMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DeliveryModeVisitor;

        impl Visitor<'_> for DeliveryModeVisitor {
            type Value = DeliveryMode;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string representing a DeliveryMode")
            }

            fn visit_str<E>(self, value: &str) -> Result<DeliveryMode, E>
            where
                E: de::Error,
            {
                match value {
                    "NON_PERSISTENT" | "NonPersistent" => Ok(DeliveryMode::NonPersistent),
                    "PERSISTENT" | "Persistent" => Ok(DeliveryMode::Persistent),
                    _ => Err(de::Error::unknown_variant(
                        value,
                        &["NON_PERSISTENT/NonPersistent", "PERSISTENT/Persistent"],
                    )),
                }
            }
        }

        deserializer.deserialize_str(DeliveryModeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_name() {
        assert_eq!(DeliveryMode::NonPersistent.get_name(), "NON_PERSISTENT");
        assert_eq!(DeliveryMode::Persistent.get_name(), "PERSISTENT");
    }

    #[test]
    fn octet_mapping_round_trips() {
        assert_eq!(DeliveryMode::NonPersistent.as_u8(), 1);
        assert_eq!(DeliveryMode::Persistent.as_u8(), 2);
        assert_eq!(DeliveryMode::from_u8(1), Some(DeliveryMode::NonPersistent));
        assert_eq!(DeliveryMode::from_u8(2), Some(DeliveryMode::Persistent));
        assert_eq!(DeliveryMode::from_u8(0), None);
        assert_eq!(DeliveryMode::from_u8(3), None);
    }

    #[test]
    fn try_from_unknown_octet_is_an_error() {
        let err = DeliveryMode::try_from(9).unwrap_err();
        assert!(matches!(err, RabbitMQError::UnknownDeliveryMode(9)));
        assert_eq!(DeliveryMode::try_from(2).unwrap(), DeliveryMode::Persistent);
    }

    #[test]
    fn serialize_delivery_mode() {
        let serialized = serde_json::to_string(&DeliveryMode::NonPersistent).unwrap();
        assert_eq!(serialized, "\"NON_PERSISTENT\"");

        let serialized = serde_json::to_string(&DeliveryMode::Persistent).unwrap();
        assert_eq!(serialized, "\"PERSISTENT\"");
    }

    #[test]
    fn deserialize_delivery_mode() {
        let deserialized: DeliveryMode = serde_json::from_str("\"NON_PERSISTENT\"").unwrap();
        assert_eq!(deserialized, DeliveryMode::NonPersistent);

        let deserialized: DeliveryMode = serde_json::from_str("\"Persistent\"").unwrap();
        assert_eq!(deserialized, DeliveryMode::Persistent);
    }

    #[test]
    fn deserialize_delivery_mode_invalid() {
        let deserialized: Result<DeliveryMode, _> = serde_json::from_str("\"FANOUT\"");
        assert!(deserialized.is_err());
    }
}
