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

use cheetah_string::CheetahString;
use serde::Deserialize;
use serde::Serialize;

use crate::common::message::field_table::FieldTable;
use crate::common::message::AmqpTimestamp;
use crate::common::message::BasicPropertiesTrait;

/// The content-header properties of the basic class, field for field what a
/// published message carries on the wire. Every field is optional; an absent
/// field occupies no space in the frame and its bit in the property-flags
/// word is zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<FieldTable>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<AmqpTimestamp>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<CheetahString>,
}

impl BasicProperties {
    /// Creates basic properties with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the content-header property-flags word from field presence.
    ///
    /// Bit 15 is content type, descending through the declaration order down
    /// to bit 2 for cluster id, per the basic-class numbering.
    pub fn property_flags(&self) -> u16 {
        let mut flags = 0u16;
        if self.content_type.is_some() {
            flags |= BasicPropertyFlag::CONTENT_TYPE;
        }
        if self.content_encoding.is_some() {
            flags |= BasicPropertyFlag::CONTENT_ENCODING;
        }
        if self.headers.is_some() {
            flags |= BasicPropertyFlag::HEADERS;
        }
        if self.delivery_mode.is_some() {
            flags |= BasicPropertyFlag::DELIVERY_MODE;
        }
        if self.priority.is_some() {
            flags |= BasicPropertyFlag::PRIORITY;
        }
        if self.correlation_id.is_some() {
            flags |= BasicPropertyFlag::CORRELATION_ID;
        }
        if self.reply_to.is_some() {
            flags |= BasicPropertyFlag::REPLY_TO;
        }
        if self.expiration.is_some() {
            flags |= BasicPropertyFlag::EXPIRATION;
        }
        if self.message_id.is_some() {
            flags |= BasicPropertyFlag::MESSAGE_ID;
        }
        if self.timestamp.is_some() {
            flags |= BasicPropertyFlag::TIMESTAMP;
        }
        if self.message_type.is_some() {
            flags |= BasicPropertyFlag::TYPE;
        }
        if self.user_id.is_some() {
            flags |= BasicPropertyFlag::USER_ID;
        }
        if self.app_id.is_some() {
            flags |= BasicPropertyFlag::APP_ID;
        }
        if self.cluster_id.is_some() {
            flags |= BasicPropertyFlag::CLUSTER_ID;
        }
        flags
    }
}

impl BasicPropertiesTrait for BasicProperties {
    #[inline]
    fn content_type(&self) -> Option<&CheetahString> {
        self.content_type.as_ref()
    }

    #[inline]
    fn set_content_type(&mut self, content_type: CheetahString) {
        self.content_type = Some(content_type);
    }

    #[inline]
    fn content_encoding(&self) -> Option<&CheetahString> {
        self.content_encoding.as_ref()
    }

    #[inline]
    fn set_content_encoding(&mut self, content_encoding: CheetahString) {
        self.content_encoding = Some(content_encoding);
    }

    #[inline]
    fn headers(&self) -> Option<&FieldTable> {
        self.headers.as_ref()
    }

    #[inline]
    fn set_headers(&mut self, headers: FieldTable) {
        self.headers = Some(headers);
    }

    #[inline]
    fn delivery_mode(&self) -> Option<u8> {
        self.delivery_mode
    }

    #[inline]
    fn set_delivery_mode(&mut self, delivery_mode: u8) {
        self.delivery_mode = Some(delivery_mode);
    }

    #[inline]
    fn priority(&self) -> Option<u8> {
        self.priority
    }

    #[inline]
    fn set_priority(&mut self, priority: u8) {
        self.priority = Some(priority);
    }

    #[inline]
    fn correlation_id(&self) -> Option<&CheetahString> {
        self.correlation_id.as_ref()
    }

    #[inline]
    fn set_correlation_id(&mut self, correlation_id: CheetahString) {
        self.correlation_id = Some(correlation_id);
    }

    #[inline]
    fn reply_to(&self) -> Option<&CheetahString> {
        self.reply_to.as_ref()
    }

    #[inline]
    fn set_reply_to(&mut self, reply_to: CheetahString) {
        self.reply_to = Some(reply_to);
    }

    #[inline]
    fn expiration(&self) -> Option<&CheetahString> {
        self.expiration.as_ref()
    }

    #[inline]
    fn set_expiration(&mut self, expiration: CheetahString) {
        self.expiration = Some(expiration);
    }

    #[inline]
    fn message_id(&self) -> Option<&CheetahString> {
        self.message_id.as_ref()
    }

    #[inline]
    fn set_message_id(&mut self, message_id: CheetahString) {
        self.message_id = Some(message_id);
    }

    #[inline]
    fn timestamp(&self) -> Option<AmqpTimestamp> {
        self.timestamp
    }

    #[inline]
    fn set_timestamp(&mut self, timestamp: AmqpTimestamp) {
        self.timestamp = Some(timestamp);
    }

    #[inline]
    fn message_type(&self) -> Option<&CheetahString> {
        self.message_type.as_ref()
    }

    #[inline]
    fn set_message_type(&mut self, message_type: CheetahString) {
        self.message_type = Some(message_type);
    }

    #[inline]
    fn user_id(&self) -> Option<&CheetahString> {
        self.user_id.as_ref()
    }

    #[inline]
    fn set_user_id(&mut self, user_id: CheetahString) {
        self.user_id = Some(user_id);
    }

    #[inline]
    fn app_id(&self) -> Option<&CheetahString> {
        self.app_id.as_ref()
    }

    #[inline]
    fn set_app_id(&mut self, app_id: CheetahString) {
        self.app_id = Some(app_id);
    }

    #[inline]
    fn cluster_id(&self) -> Option<&CheetahString> {
        self.cluster_id.as_ref()
    }

    #[inline]
    fn set_cluster_id(&mut self, cluster_id: CheetahString) {
        self.cluster_id = Some(cluster_id);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl fmt::Display for BasicProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(content-type={}, content-encoding={}, headers={}, delivery-mode={}, priority={}, \
             correlation-id={}, reply-to={}, expiration={}, message-id={}, timestamp={}, type={}, \
             user-id={}, app-id={}, cluster-id={})",
            opt(self.content_type.as_ref()),
            opt(self.content_encoding.as_ref()),
            opt(self.headers.as_ref()),
            opt(self.delivery_mode),
            opt(self.priority),
            opt(self.correlation_id.as_ref()),
            opt(self.reply_to.as_ref()),
            opt(self.expiration.as_ref()),
            opt(self.message_id.as_ref()),
            opt(self.timestamp),
            opt(self.message_type.as_ref()),
            opt(self.user_id.as_ref()),
            opt(self.app_id.as_ref()),
            opt(self.cluster_id.as_ref())
        )
    }
}

// Absent fields print as "_" in the native debug form.
fn opt<T: fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => String::from("_"),
    }
}

/// Bit masks of the 16-bit content-header property-flags word.
pub struct BasicPropertyFlag;

impl BasicPropertyFlag {
    pub const CONTENT_TYPE: u16 = 0x1 << 15;
    pub const CONTENT_ENCODING: u16 = 0x1 << 14;
    pub const HEADERS: u16 = 0x1 << 13;
    pub const DELIVERY_MODE: u16 = 0x1 << 12;
    pub const PRIORITY: u16 = 0x1 << 11;
    pub const CORRELATION_ID: u16 = 0x1 << 10;
    pub const REPLY_TO: u16 = 0x1 << 9;
    pub const EXPIRATION: u16 = 0x1 << 8;
    pub const MESSAGE_ID: u16 = 0x1 << 7;
    pub const TIMESTAMP: u16 = 0x1 << 6;
    pub const TYPE: u16 = 0x1 << 5;
    pub const USER_ID: u16 = 0x1 << 4;
    pub const APP_ID: u16 = 0x1 << 3;
    pub const CLUSTER_ID: u16 = 0x1 << 2;

    pub fn check(flags: u16, expected_flag: u16) -> bool {
        (flags & expected_flag) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_properties_have_no_flags_set() {
        let properties = BasicProperties::new();
        assert_eq!(properties.property_flags(), 0);
        assert!(!properties.is_content_type_present());
        assert!(!properties.is_headers_present());
        assert!(!properties.is_timestamp_present());
    }

    #[test]
    fn setter_makes_field_present_and_raises_flag_bit() {
        let mut properties = BasicProperties::new();
        properties.set_content_type(CheetahString::from_static_str("application/json"));
        properties.set_delivery_mode(2);
        properties.set_timestamp(AmqpTimestamp::new(1_700_000_000));

        assert!(properties.is_content_type_present());
        assert_eq!(
            properties.content_type(),
            Some(&CheetahString::from_static_str("application/json"))
        );
        assert_eq!(properties.delivery_mode(), Some(2));
        assert_eq!(properties.timestamp(), Some(AmqpTimestamp::new(1_700_000_000)));

        let flags = properties.property_flags();
        assert!(BasicPropertyFlag::check(flags, BasicPropertyFlag::CONTENT_TYPE));
        assert!(BasicPropertyFlag::check(flags, BasicPropertyFlag::DELIVERY_MODE));
        assert!(BasicPropertyFlag::check(flags, BasicPropertyFlag::TIMESTAMP));
        assert!(!BasicPropertyFlag::check(flags, BasicPropertyFlag::PRIORITY));
        assert_eq!(
            flags,
            BasicPropertyFlag::CONTENT_TYPE
                | BasicPropertyFlag::DELIVERY_MODE
                | BasicPropertyFlag::TIMESTAMP
        );
    }

    #[test]
    fn flag_bits_follow_basic_class_numbering() {
        assert_eq!(BasicPropertyFlag::CONTENT_TYPE, 0x8000);
        assert_eq!(BasicPropertyFlag::CLUSTER_ID, 0x0004);
        assert_eq!(BasicPropertyFlag::TIMESTAMP, 0x0040);
    }

    #[test]
    fn display_renders_absent_fields_as_underscore() {
        let mut properties = BasicProperties::new();
        properties.set_content_type(CheetahString::from_static_str("text/plain"));
        properties.set_priority(5);

        let rendered = properties.to_string();
        assert!(rendered.starts_with("(content-type=text/plain, "));
        assert!(rendered.contains("priority=5"));
        assert!(rendered.contains("correlation-id=_"));
        assert!(rendered.ends_with("cluster-id=_)"));
    }

    #[test]
    fn carrier_renders_through_the_trait_object() {
        let mut properties = BasicProperties::new();
        properties.set_app_id(CheetahString::from_static_str("billing"));

        let carrier: &dyn BasicPropertiesTrait = &properties;
        assert_eq!(format!("{}", carrier), properties.to_string());
        assert!(format!("{}", carrier).contains("app-id=billing"));
    }

    #[test]
    fn serde_skips_absent_fields() {
        let json = serde_json::to_string(&BasicProperties::new()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn serde_round_trips_present_subset() {
        let mut properties = BasicProperties::new();
        properties.set_message_type(CheetahString::from_static_str("order.created"));
        properties.set_app_id(CheetahString::from_static_str("billing"));
        properties.set_timestamp(AmqpTimestamp::new(42));

        let json = serde_json::to_string(&properties).unwrap();
        assert!(json.contains("\"type\":\"order.created\""));
        assert!(json.contains("\"appId\":\"billing\""));
        assert!(json.contains("\"timestamp\":42"));

        let back: BasicProperties = serde_json::from_str(&json).unwrap();
        assert_eq!(back, properties);
    }
}
