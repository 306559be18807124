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

use cheetah_string::CheetahString;

use crate::common::message::field_table::FieldTable;
use crate::common::message::field_table::FieldValue;
use crate::common::message::message_enum::DeliveryMode;
use crate::common::message::message_properties::MessageProperties;

/// Builder for constructing message properties.
///
/// Every field is optional, so `build` always succeeds; an empty builder
/// yields a bag with nothing present.
///
/// # Examples
///
/// ```
/// use rabbitmq_common::common::message::message_enum::DeliveryMode;
/// use rabbitmq_common::common::message::message_properties_builder::MessagePropertiesBuilder;
///
/// let properties = MessagePropertiesBuilder::new()
///     .content_type("application/json")
///     .delivery_mode(DeliveryMode::Persistent)
///     .correlation_id("corr-42")
///     .header("x-retry-count", 3)
///     .build();
/// assert_eq!(properties.delivery_mode(), Some(2));
/// ```
#[derive(Default)]
pub struct MessagePropertiesBuilder {
    properties: MessageProperties,
}

impl MessagePropertiesBuilder {
    /// Creates a new properties builder.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MIME content type of the message body.
    #[inline]
    pub fn content_type(mut self, content_type: impl Into<CheetahString>) -> Self {
        self.properties.set_content_type(content_type);
        self
    }

    /// Sets the MIME content encoding of the message body.
    #[inline]
    pub fn content_encoding(mut self, content_encoding: impl Into<CheetahString>) -> Self {
        self.properties.set_content_encoding(content_encoding);
        self
    }

    /// Replaces the header table wholesale.
    #[inline]
    pub fn headers(mut self, headers: FieldTable) -> Self {
        self.properties.set_headers(headers);
        self
    }

    /// Adds one header entry, keeping entries added earlier.
    #[inline]
    pub fn header(mut self, key: impl Into<CheetahString>, value: impl Into<FieldValue>) -> Self {
        self.properties.put_header(key, value);
        self
    }

    /// Sets the delivery mode.
    #[inline]
    pub fn delivery_mode(mut self, delivery_mode: DeliveryMode) -> Self {
        self.properties.set_delivery_mode(delivery_mode.as_u8());
        self
    }

    /// Sets the delivery mode from the raw wire octet.
    #[inline]
    pub fn delivery_mode_raw(mut self, delivery_mode: u8) -> Self {
        self.properties.set_delivery_mode(delivery_mode);
        self
    }

    /// Sets the message priority octet.
    #[inline]
    pub fn priority(mut self, priority: u8) -> Self {
        self.properties.set_priority(priority);
        self
    }

    /// Sets the application correlation identifier.
    #[inline]
    pub fn correlation_id(mut self, correlation_id: impl Into<CheetahString>) -> Self {
        self.properties.set_correlation_id(correlation_id);
        self
    }

    /// Sets the address to reply to.
    #[inline]
    pub fn reply_to(mut self, reply_to: impl Into<CheetahString>) -> Self {
        self.properties.set_reply_to(reply_to);
        self
    }

    /// Sets the message expiration specification.
    #[inline]
    pub fn expiration(mut self, expiration: impl Into<CheetahString>) -> Self {
        self.properties.set_expiration(expiration);
        self
    }

    /// Sets the application message identifier.
    #[inline]
    pub fn message_id(mut self, message_id: impl Into<CheetahString>) -> Self {
        self.properties.set_message_id(message_id);
        self
    }

    /// Sets the message timestamp in Unix-time seconds.
    #[inline]
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.properties.set_timestamp(timestamp);
        self
    }

    /// Sets the application message type name.
    #[inline]
    pub fn message_type(mut self, message_type: impl Into<CheetahString>) -> Self {
        self.properties.set_message_type(message_type);
        self
    }

    /// Sets the creating user id.
    #[inline]
    pub fn user_id(mut self, user_id: impl Into<CheetahString>) -> Self {
        self.properties.set_user_id(user_id);
        self
    }

    /// Sets the creating application id.
    #[inline]
    pub fn app_id(mut self, app_id: impl Into<CheetahString>) -> Self {
        self.properties.set_app_id(app_id);
        self
    }

    /// Sets the intra-cluster routing identifier.
    #[inline]
    pub fn cluster_id(mut self, cluster_id: impl Into<CheetahString>) -> Self {
        self.properties.set_cluster_id(cluster_id);
        self
    }

    /// Finishes the builder, returning the assembled bag.
    #[inline]
    pub fn build(self) -> MessageProperties {
        self.properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::message::message_properties::PropertyField;

    #[test]
    fn empty_builder_yields_empty_bag() {
        let properties = MessagePropertiesBuilder::new().build();
        assert_eq!(properties, MessageProperties::new());
    }

    #[test]
    fn builder_output_equals_setter_sequence() {
        let built = MessagePropertiesBuilder::new()
            .content_type("text/plain")
            .delivery_mode(DeliveryMode::Persistent)
            .priority(5)
            .correlation_id("corr-1")
            .timestamp(1_700_000_000)
            .build();

        let mut direct = MessageProperties::new();
        direct.set_content_type("text/plain");
        direct.set_delivery_mode(2);
        direct.set_priority(5);
        direct.set_correlation_id("corr-1");
        direct.set_timestamp(1_700_000_000);

        assert_eq!(built, direct);
    }

    #[test]
    fn header_entries_accumulate() {
        let properties = MessagePropertiesBuilder::new()
            .header("x-first", 1)
            .header("x-second", "two")
            .build();

        let headers = properties.headers().unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get_i64("x-first").unwrap(), Some(1));
        assert_eq!(headers.get_str("x-second").unwrap(), Some("two"));
    }

    #[test]
    fn headers_call_replaces_accumulated_entries() {
        let mut replacement = FieldTable::new();
        replacement.insert("only", true);

        let properties = MessagePropertiesBuilder::new()
            .header("dropped", 1)
            .headers(replacement)
            .build();

        let headers = properties.headers().unwrap();
        assert_eq!(headers.len(), 1);
        assert!(headers.contains_key("only"));
    }

    #[test]
    fn delivery_mode_raw_stores_octet_unchecked() {
        let properties = MessagePropertiesBuilder::new().delivery_mode_raw(7).build();
        assert_eq!(properties.delivery_mode(), Some(7));
        assert!(properties.is_present(PropertyField::DeliveryMode));
    }
}
