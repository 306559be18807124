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

use std::any::Any;
use std::fmt;
use std::fmt::Debug;
use std::fmt::Display;

use cheetah_string::CheetahString;
use serde::Deserialize;
use serde::Serialize;

use crate::common::message::field_table::FieldTable;

pub mod basic_properties;
pub mod field_table;
pub mod message_enum;
pub mod message_properties;
pub mod message_properties_builder;

/// This module defines the `BasicPropertiesTrait` trait, the boundary between
///
/// the in-memory property bag and whatever structure actually travels with a
/// published message (a content-header frame, a broker DTO, a test double). It
/// exposes per-field access, per-field presence and the native timestamp
/// wrapper for the fourteen basic properties of the AMQP 0-9-1 basic class.
pub trait BasicPropertiesTrait: Any + Display + Debug {
    /// Retrieves the MIME content type of the message body.
    ///
    /// # Returns
    ///
    /// An `Option<&CheetahString>` containing the content type if it is present, otherwise `None`.
    fn content_type(&self) -> Option<&CheetahString>;

    /// Sets the MIME content type, making the field present on the carrier.
    ///
    /// # Arguments
    ///
    /// * `content_type` - The content type to set, as a `CheetahString`.
    fn set_content_type(&mut self, content_type: CheetahString);

    /// Checks whether the content type field is present on the carrier.
    ///
    /// # Returns
    ///
    /// `true` if the field carries a value, otherwise `false`.
    fn is_content_type_present(&self) -> bool {
        self.content_type().is_some()
    }

    /// Retrieves the MIME content encoding of the message body.
    ///
    /// # Returns
    ///
    /// An `Option<&CheetahString>` containing the content encoding if it is present, otherwise
    /// `None`.
    fn content_encoding(&self) -> Option<&CheetahString>;

    /// Sets the MIME content encoding, making the field present on the carrier.
    ///
    /// # Arguments
    ///
    /// * `content_encoding` - The content encoding to set, as a `CheetahString`.
    fn set_content_encoding(&mut self, content_encoding: CheetahString);

    /// Checks whether the content encoding field is present on the carrier.
    fn is_content_encoding_present(&self) -> bool {
        self.content_encoding().is_some()
    }

    /// Retrieves the application header table.
    ///
    /// # Returns
    ///
    /// An `Option<&FieldTable>` containing the headers if they are present, otherwise `None`.
    fn headers(&self) -> Option<&FieldTable>;

    /// Replaces the application header table, making the field present.
    ///
    /// # Arguments
    ///
    /// * `headers` - The header table to set.
    fn set_headers(&mut self, headers: FieldTable);

    /// Checks whether the header table is present on the carrier.
    fn is_headers_present(&self) -> bool {
        self.headers().is_some()
    }

    /// Retrieves the delivery mode octet (1 non-persistent, 2 persistent).
    ///
    /// # Returns
    ///
    /// An `Option<u8>` containing the delivery mode if it is present, otherwise `None`.
    fn delivery_mode(&self) -> Option<u8>;

    /// Sets the delivery mode octet, making the field present.
    fn set_delivery_mode(&mut self, delivery_mode: u8);

    /// Checks whether the delivery mode field is present on the carrier.
    fn is_delivery_mode_present(&self) -> bool {
        self.delivery_mode().is_some()
    }

    /// Retrieves the message priority octet (0 through 9).
    ///
    /// # Returns
    ///
    /// An `Option<u8>` containing the priority if it is present, otherwise `None`.
    fn priority(&self) -> Option<u8>;

    /// Sets the message priority octet, making the field present.
    fn set_priority(&mut self, priority: u8);

    /// Checks whether the priority field is present on the carrier.
    fn is_priority_present(&self) -> bool {
        self.priority().is_some()
    }

    /// Retrieves the application correlation identifier.
    fn correlation_id(&self) -> Option<&CheetahString>;

    /// Sets the application correlation identifier, making the field present.
    fn set_correlation_id(&mut self, correlation_id: CheetahString);

    /// Checks whether the correlation id field is present on the carrier.
    fn is_correlation_id_present(&self) -> bool {
        self.correlation_id().is_some()
    }

    /// Retrieves the address to reply to.
    fn reply_to(&self) -> Option<&CheetahString>;

    /// Sets the address to reply to, making the field present.
    fn set_reply_to(&mut self, reply_to: CheetahString);

    /// Checks whether the reply-to field is present on the carrier.
    fn is_reply_to_present(&self) -> bool {
        self.reply_to().is_some()
    }

    /// Retrieves the message expiration specification.
    fn expiration(&self) -> Option<&CheetahString>;

    /// Sets the message expiration specification, making the field present.
    fn set_expiration(&mut self, expiration: CheetahString);

    /// Checks whether the expiration field is present on the carrier.
    fn is_expiration_present(&self) -> bool {
        self.expiration().is_some()
    }

    /// Retrieves the application message identifier.
    fn message_id(&self) -> Option<&CheetahString>;

    /// Sets the application message identifier, making the field present.
    fn set_message_id(&mut self, message_id: CheetahString);

    /// Checks whether the message id field is present on the carrier.
    fn is_message_id_present(&self) -> bool {
        self.message_id().is_some()
    }

    /// Retrieves the message timestamp in the carrier's native wrapper.
    ///
    /// # Returns
    ///
    /// An `Option<AmqpTimestamp>` containing the timestamp if it is present, otherwise `None`.
    fn timestamp(&self) -> Option<AmqpTimestamp>;

    /// Sets the message timestamp, making the field present.
    fn set_timestamp(&mut self, timestamp: AmqpTimestamp);

    /// Checks whether the timestamp field is present on the carrier.
    fn is_timestamp_present(&self) -> bool {
        self.timestamp().is_some()
    }

    /// Retrieves the application message type name.
    fn message_type(&self) -> Option<&CheetahString>;

    /// Sets the application message type name, making the field present.
    fn set_message_type(&mut self, message_type: CheetahString);

    /// Checks whether the type field is present on the carrier.
    fn is_message_type_present(&self) -> bool {
        self.message_type().is_some()
    }

    /// Retrieves the creating user id.
    fn user_id(&self) -> Option<&CheetahString>;

    /// Sets the creating user id, making the field present.
    fn set_user_id(&mut self, user_id: CheetahString);

    /// Checks whether the user id field is present on the carrier.
    fn is_user_id_present(&self) -> bool {
        self.user_id().is_some()
    }

    /// Retrieves the creating application id.
    fn app_id(&self) -> Option<&CheetahString>;

    /// Sets the creating application id, making the field present.
    fn set_app_id(&mut self, app_id: CheetahString);

    /// Checks whether the app id field is present on the carrier.
    fn is_app_id_present(&self) -> bool {
        self.app_id().is_some()
    }

    /// Retrieves the intra-cluster routing identifier.
    fn cluster_id(&self) -> Option<&CheetahString>;

    /// Sets the intra-cluster routing identifier, making the field present.
    fn set_cluster_id(&mut self, cluster_id: CheetahString);

    /// Checks whether the cluster id field is present on the carrier.
    fn is_cluster_id_present(&self) -> bool {
        self.cluster_id().is_some()
    }

    /// Converts the carrier into a dynamic `Any` type.
    ///
    /// # Returns
    ///
    /// A reference to the carrier as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Converts the carrier into a mutable dynamic `Any` type.
    ///
    /// # Returns
    ///
    /// A mutable reference to the carrier as `&mut dyn Any`.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// The carrier-native timestamp representation: Unix time in whole seconds, as
/// the wire-level basic class transmits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmqpTimestamp(i64);

impl AmqpTimestamp {
    #[inline]
    pub fn new(unix_time: i64) -> Self {
        AmqpTimestamp(unix_time)
    }

    #[inline]
    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl From<i64> for AmqpTimestamp {
    fn from(unix_time: i64) -> Self {
        AmqpTimestamp(unix_time)
    }
}

impl From<AmqpTimestamp> for i64 {
    fn from(timestamp: AmqpTimestamp) -> Self {
        timestamp.0
    }
}

impl fmt::Display for AmqpTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
