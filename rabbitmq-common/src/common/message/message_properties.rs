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

use cheetah_string::CheetahString;
use rabbitmq_error::RabbitMQError;
use rabbitmq_error::RabbitMQResult;
use serde::Deserialize;
use serde::Serialize;

use crate::common::message::basic_properties::BasicProperties;
use crate::common::message::field_table::FieldTable;
use crate::common::message::field_table::FieldValue;
use crate::common::message::AmqpTimestamp;
use crate::common::message::BasicPropertiesTrait;

/// The in-memory message properties bag.
///
/// Holds the fourteen basic-class properties decoupled from any carrier
/// structure, each independently present or absent. A bag is filled by
/// setters or imported wholesale from a carrier with [`copy_from`], and is
/// written back into a carrier with [`copy_to`]; reading never changes
/// presence.
///
/// No field value is validated here. The mapping layer moves values
/// faithfully; range and format rules belong to the publishing path.
///
/// [`copy_from`]: MessageProperties::copy_from
/// [`copy_to`]: MessageProperties::copy_to
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    content_encoding: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    headers: Option<FieldTable>,

    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_mode: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    expiration: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    message_type: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    app_id: Option<CheetahString>,

    #[serde(skip_serializing_if = "Option::is_none")]
    cluster_id: Option<CheetahString>,
}

impl MessageProperties {
    /// Creates a bag with every field absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the MIME content type of the message body.
    #[inline]
    pub fn content_type(&self) -> Option<&CheetahString> {
        self.content_type.as_ref()
    }

    /// Sets the MIME content type, making the field present.
    #[inline]
    pub fn set_content_type(&mut self, content_type: impl Into<CheetahString>) {
        self.content_type = Some(content_type.into());
    }

    /// Removes the content type, making the field absent.
    #[inline]
    pub fn clear_content_type(&mut self) {
        self.content_type = None;
    }

    /// Returns the MIME content encoding of the message body.
    #[inline]
    pub fn content_encoding(&self) -> Option<&CheetahString> {
        self.content_encoding.as_ref()
    }

    /// Sets the MIME content encoding, making the field present.
    #[inline]
    pub fn set_content_encoding(&mut self, content_encoding: impl Into<CheetahString>) {
        self.content_encoding = Some(content_encoding.into());
    }

    /// Removes the content encoding, making the field absent.
    #[inline]
    pub fn clear_content_encoding(&mut self) {
        self.content_encoding = None;
    }

    /// Returns the application header table.
    #[inline]
    pub fn headers(&self) -> Option<&FieldTable> {
        self.headers.as_ref()
    }

    /// Replaces the header table, making the field present.
    #[inline]
    pub fn set_headers(&mut self, headers: FieldTable) {
        self.headers = Some(headers);
    }

    /// Removes the header table, making the field absent.
    #[inline]
    pub fn clear_headers(&mut self) {
        self.headers = None;
    }

    /// Inserts one header entry, allocating the table when absent.
    ///
    /// Duplicate keys resolve last-write-wins; the displaced value is
    /// returned.
    pub fn put_header(
        &mut self,
        key: impl Into<CheetahString>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.headers.get_or_insert_with(FieldTable::new).insert(key, value)
    }

    /// Returns the delivery mode octet (1 non-persistent, 2 persistent).
    #[inline]
    pub fn delivery_mode(&self) -> Option<u8> {
        self.delivery_mode
    }

    /// Sets the delivery mode octet, making the field present.
    ///
    /// The octet is stored as given; use [`DeliveryMode`] when the caller
    /// wants the closed enum instead of a raw octet.
    ///
    /// [`DeliveryMode`]: crate::common::message::message_enum::DeliveryMode
    #[inline]
    pub fn set_delivery_mode(&mut self, delivery_mode: u8) {
        self.delivery_mode = Some(delivery_mode);
    }

    /// Removes the delivery mode, making the field absent.
    #[inline]
    pub fn clear_delivery_mode(&mut self) {
        self.delivery_mode = None;
    }

    /// Returns the message priority octet.
    #[inline]
    pub fn priority(&self) -> Option<u8> {
        self.priority
    }

    /// Sets the message priority octet, making the field present.
    #[inline]
    pub fn set_priority(&mut self, priority: u8) {
        self.priority = Some(priority);
    }

    /// Removes the priority, making the field absent.
    #[inline]
    pub fn clear_priority(&mut self) {
        self.priority = None;
    }

    /// Returns the application correlation identifier.
    #[inline]
    pub fn correlation_id(&self) -> Option<&CheetahString> {
        self.correlation_id.as_ref()
    }

    /// Sets the application correlation identifier, making the field present.
    #[inline]
    pub fn set_correlation_id(&mut self, correlation_id: impl Into<CheetahString>) {
        self.correlation_id = Some(correlation_id.into());
    }

    /// Removes the correlation identifier, making the field absent.
    #[inline]
    pub fn clear_correlation_id(&mut self) {
        self.correlation_id = None;
    }

    /// Returns the address to reply to.
    #[inline]
    pub fn reply_to(&self) -> Option<&CheetahString> {
        self.reply_to.as_ref()
    }

    /// Sets the address to reply to, making the field present.
    #[inline]
    pub fn set_reply_to(&mut self, reply_to: impl Into<CheetahString>) {
        self.reply_to = Some(reply_to.into());
    }

    /// Removes the reply-to address, making the field absent.
    #[inline]
    pub fn clear_reply_to(&mut self) {
        self.reply_to = None;
    }

    /// Returns the message expiration specification.
    #[inline]
    pub fn expiration(&self) -> Option<&CheetahString> {
        self.expiration.as_ref()
    }

    /// Sets the message expiration specification, making the field present.
    #[inline]
    pub fn set_expiration(&mut self, expiration: impl Into<CheetahString>) {
        self.expiration = Some(expiration.into());
    }

    /// Removes the expiration, making the field absent.
    #[inline]
    pub fn clear_expiration(&mut self) {
        self.expiration = None;
    }

    /// Returns the application message identifier.
    #[inline]
    pub fn message_id(&self) -> Option<&CheetahString> {
        self.message_id.as_ref()
    }

    /// Sets the application message identifier, making the field present.
    #[inline]
    pub fn set_message_id(&mut self, message_id: impl Into<CheetahString>) {
        self.message_id = Some(message_id.into());
    }

    /// Removes the message identifier, making the field absent.
    #[inline]
    pub fn clear_message_id(&mut self) {
        self.message_id = None;
    }

    /// Returns the message timestamp as Unix-time seconds.
    #[inline]
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    /// Sets the message timestamp in Unix-time seconds, making the field
    /// present.
    #[inline]
    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = Some(timestamp);
    }

    /// Removes the timestamp, making the field absent.
    #[inline]
    pub fn clear_timestamp(&mut self) {
        self.timestamp = None;
    }

    /// Returns the application message type name.
    #[inline]
    pub fn message_type(&self) -> Option<&CheetahString> {
        self.message_type.as_ref()
    }

    /// Sets the application message type name, making the field present.
    #[inline]
    pub fn set_message_type(&mut self, message_type: impl Into<CheetahString>) {
        self.message_type = Some(message_type.into());
    }

    /// Removes the message type, making the field absent.
    #[inline]
    pub fn clear_message_type(&mut self) {
        self.message_type = None;
    }

    /// Returns the creating user id.
    #[inline]
    pub fn user_id(&self) -> Option<&CheetahString> {
        self.user_id.as_ref()
    }

    /// Sets the creating user id, making the field present.
    #[inline]
    pub fn set_user_id(&mut self, user_id: impl Into<CheetahString>) {
        self.user_id = Some(user_id.into());
    }

    /// Removes the user id, making the field absent.
    #[inline]
    pub fn clear_user_id(&mut self) {
        self.user_id = None;
    }

    /// Returns the creating application id.
    #[inline]
    pub fn app_id(&self) -> Option<&CheetahString> {
        self.app_id.as_ref()
    }

    /// Sets the creating application id, making the field present.
    #[inline]
    pub fn set_app_id(&mut self, app_id: impl Into<CheetahString>) {
        self.app_id = Some(app_id.into());
    }

    /// Removes the application id, making the field absent.
    #[inline]
    pub fn clear_app_id(&mut self) {
        self.app_id = None;
    }

    /// Returns the intra-cluster routing identifier.
    #[inline]
    pub fn cluster_id(&self) -> Option<&CheetahString> {
        self.cluster_id.as_ref()
    }

    /// Sets the intra-cluster routing identifier, making the field present.
    #[inline]
    pub fn set_cluster_id(&mut self, cluster_id: impl Into<CheetahString>) {
        self.cluster_id = Some(cluster_id.into());
    }

    /// Removes the cluster identifier, making the field absent.
    #[inline]
    pub fn clear_cluster_id(&mut self) {
        self.cluster_id = None;
    }

    /// Checks presence of one field through its descriptor.
    pub fn is_present(&self, field: PropertyField) -> bool {
        match field {
            PropertyField::ContentType => self.content_type.is_some(),
            PropertyField::ContentEncoding => self.content_encoding.is_some(),
            PropertyField::Headers => self.headers.is_some(),
            PropertyField::DeliveryMode => self.delivery_mode.is_some(),
            PropertyField::Priority => self.priority.is_some(),
            PropertyField::CorrelationId => self.correlation_id.is_some(),
            PropertyField::ReplyTo => self.reply_to.is_some(),
            PropertyField::Expiration => self.expiration.is_some(),
            PropertyField::MessageId => self.message_id.is_some(),
            PropertyField::Timestamp => self.timestamp.is_some(),
            PropertyField::Type => self.message_type.is_some(),
            PropertyField::UserId => self.user_id.is_some(),
            PropertyField::AppId => self.app_id.is_some(),
            PropertyField::ClusterId => self.cluster_id.is_some(),
        }
    }

    /// Clears one field through its descriptor.
    pub fn clear(&mut self, field: PropertyField) {
        match field {
            PropertyField::ContentType => self.content_type = None,
            PropertyField::ContentEncoding => self.content_encoding = None,
            PropertyField::Headers => self.headers = None,
            PropertyField::DeliveryMode => self.delivery_mode = None,
            PropertyField::Priority => self.priority = None,
            PropertyField::CorrelationId => self.correlation_id = None,
            PropertyField::ReplyTo => self.reply_to = None,
            PropertyField::Expiration => self.expiration = None,
            PropertyField::MessageId => self.message_id = None,
            PropertyField::Timestamp => self.timestamp = None,
            PropertyField::Type => self.message_type = None,
            PropertyField::UserId => self.user_id = None,
            PropertyField::AppId => self.app_id = None,
            PropertyField::ClusterId => self.cluster_id = None,
        }
    }

    /// Imports every present field of a source carrier into this bag.
    ///
    /// Fields absent on the source leave the bag untouched, so successive
    /// imports accumulate. The timestamp is unwrapped from the carrier's
    /// [`AmqpTimestamp`] to Unix-time seconds. Headers merge additively into
    /// the bag's table, last-write-wins per key; the source keeps its own
    /// table unchanged.
    ///
    /// Fails with [`RabbitMQError::IllegalArgument`] when `source` is `None`,
    /// before touching the bag.
    pub fn copy_from<P: BasicPropertiesTrait>(&mut self, source: Option<&P>) -> RabbitMQResult<()> {
        let source = match source {
            Some(source) => source,
            None => {
                return Err(RabbitMQError::illegal_argument(
                    "source basic properties must not be null",
                ))
            }
        };
        if let Some(value) = source.content_type() {
            self.content_type = Some(value.clone());
        }
        if let Some(value) = source.content_encoding() {
            self.content_encoding = Some(value.clone());
        }
        if let Some(table) = source.headers() {
            self.headers.get_or_insert_with(FieldTable::new).merge_from(table);
        }
        if let Some(value) = source.delivery_mode() {
            self.delivery_mode = Some(value);
        }
        if let Some(value) = source.priority() {
            self.priority = Some(value);
        }
        if let Some(value) = source.correlation_id() {
            self.correlation_id = Some(value.clone());
        }
        if let Some(value) = source.reply_to() {
            self.reply_to = Some(value.clone());
        }
        if let Some(value) = source.expiration() {
            self.expiration = Some(value.clone());
        }
        if let Some(value) = source.message_id() {
            self.message_id = Some(value.clone());
        }
        if let Some(value) = source.timestamp() {
            self.timestamp = Some(value.as_secs());
        }
        if let Some(value) = source.message_type() {
            self.message_type = Some(value.clone());
        }
        if let Some(value) = source.user_id() {
            self.user_id = Some(value.clone());
        }
        if let Some(value) = source.app_id() {
            self.app_id = Some(value.clone());
        }
        if let Some(value) = source.cluster_id() {
            self.cluster_id = Some(value.clone());
        }
        Ok(())
    }

    /// Exports every present field of this bag into a destination carrier.
    ///
    /// Absent fields leave the destination untouched; whatever the
    /// destination already carried there survives. The timestamp is wrapped
    /// back into [`AmqpTimestamp`]. Headers are replaced wholesale with a
    /// copy of the bag's table, asymmetric with the import-side merge.
    ///
    /// Fails with [`RabbitMQError::IllegalArgument`] when `destination` is
    /// `None`. The bag itself is never mutated, so exporting to several
    /// destinations yields identical results.
    pub fn copy_to<P: BasicPropertiesTrait>(
        &self,
        destination: Option<&mut P>,
    ) -> RabbitMQResult<()> {
        let destination = match destination {
            Some(destination) => destination,
            None => {
                return Err(RabbitMQError::illegal_argument(
                    "destination basic properties must not be null",
                ))
            }
        };
        if let Some(value) = &self.content_type {
            destination.set_content_type(value.clone());
        }
        if let Some(value) = &self.content_encoding {
            destination.set_content_encoding(value.clone());
        }
        if let Some(table) = &self.headers {
            destination.set_headers(table.clone());
        }
        if let Some(value) = self.delivery_mode {
            destination.set_delivery_mode(value);
        }
        if let Some(value) = self.priority {
            destination.set_priority(value);
        }
        if let Some(value) = &self.correlation_id {
            destination.set_correlation_id(value.clone());
        }
        if let Some(value) = &self.reply_to {
            destination.set_reply_to(value.clone());
        }
        if let Some(value) = &self.expiration {
            destination.set_expiration(value.clone());
        }
        if let Some(value) = &self.message_id {
            destination.set_message_id(value.clone());
        }
        if let Some(value) = self.timestamp {
            destination.set_timestamp(AmqpTimestamp::new(value));
        }
        if let Some(value) = &self.message_type {
            destination.set_message_type(value.clone());
        }
        if let Some(value) = &self.user_id {
            destination.set_user_id(value.clone());
        }
        if let Some(value) = &self.app_id {
            destination.set_app_id(value.clone());
        }
        if let Some(value) = &self.cluster_id {
            destination.set_cluster_id(value.clone());
        }
        Ok(())
    }

    /// Serializes the bag to JSON, absent fields omitted.
    pub fn to_json(&self) -> RabbitMQResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes a bag from JSON; missing keys come back absent.
    pub fn from_json(json: &str) -> RabbitMQResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn write_field(&self, field: PropertyField, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match field {
            PropertyField::ContentType => write_opt(f, self.content_type.as_ref()),
            PropertyField::ContentEncoding => write_opt(f, self.content_encoding.as_ref()),
            PropertyField::Headers => write_opt(f, self.headers.as_ref()),
            PropertyField::DeliveryMode => write_opt(f, self.delivery_mode),
            PropertyField::Priority => write_opt(f, self.priority),
            PropertyField::CorrelationId => write_opt(f, self.correlation_id.as_ref()),
            PropertyField::ReplyTo => write_opt(f, self.reply_to.as_ref()),
            PropertyField::Expiration => write_opt(f, self.expiration.as_ref()),
            PropertyField::MessageId => write_opt(f, self.message_id.as_ref()),
            PropertyField::Timestamp => write_opt(f, self.timestamp),
            PropertyField::Type => write_opt(f, self.message_type.as_ref()),
            PropertyField::UserId => write_opt(f, self.user_id.as_ref()),
            PropertyField::AppId => write_opt(f, self.app_id.as_ref()),
            PropertyField::ClusterId => write_opt(f, self.cluster_id.as_ref()),
        }
    }
}

impl From<&BasicProperties> for MessageProperties {
    /// Builds a bag carrying exactly the present fields of the carrier.
    fn from(source: &BasicProperties) -> Self {
        MessageProperties {
            content_type: source.content_type.clone(),
            content_encoding: source.content_encoding.clone(),
            headers: source.headers.clone(),
            delivery_mode: source.delivery_mode,
            priority: source.priority,
            correlation_id: source.correlation_id.clone(),
            reply_to: source.reply_to.clone(),
            expiration: source.expiration.clone(),
            message_id: source.message_id.clone(),
            timestamp: source.timestamp.map(|timestamp| timestamp.as_secs()),
            message_type: source.message_type.clone(),
            user_id: source.user_id.clone(),
            app_id: source.app_id.clone(),
            cluster_id: source.cluster_id.clone(),
        }
    }
}

impl fmt::Display for MessageProperties {
    /// Renders every field in declaration order as `Name=Value` joined by
    /// `", "`, with the literal `NULL` for absent fields and `[key=value]`
    /// for a present header table.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in PropertyField::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}=", field.as_str())?;
            self.write_field(*field, f)?;
        }
        Ok(())
    }
}

fn write_opt<T: fmt::Display>(f: &mut fmt::Formatter<'_>, value: Option<T>) -> fmt::Result {
    match value {
        Some(value) => write!(f, "{}", value),
        None => f.write_str("NULL"),
    }
}

/// Descriptors of the fourteen bag fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyField {
    ContentType,
    ContentEncoding,
    Headers,
    DeliveryMode,
    Priority,
    CorrelationId,
    ReplyTo,
    Expiration,
    MessageId,
    Timestamp,
    Type,
    UserId,
    AppId,
    ClusterId,
}

impl PropertyField {
    /// Every field in declaration order.
    pub const ALL: [PropertyField; 14] = [
        PropertyField::ContentType,
        PropertyField::ContentEncoding,
        PropertyField::Headers,
        PropertyField::DeliveryMode,
        PropertyField::Priority,
        PropertyField::CorrelationId,
        PropertyField::ReplyTo,
        PropertyField::Expiration,
        PropertyField::MessageId,
        PropertyField::Timestamp,
        PropertyField::Type,
        PropertyField::UserId,
        PropertyField::AppId,
        PropertyField::ClusterId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyField::ContentType => "ContentType",
            PropertyField::ContentEncoding => "ContentEncoding",
            PropertyField::Headers => "Headers",
            PropertyField::DeliveryMode => "DeliveryMode",
            PropertyField::Priority => "Priority",
            PropertyField::CorrelationId => "CorrelationId",
            PropertyField::ReplyTo => "ReplyTo",
            PropertyField::Expiration => "Expiration",
            PropertyField::MessageId => "MessageId",
            PropertyField::Timestamp => "Timestamp",
            PropertyField::Type => "Type",
            PropertyField::UserId => "UserId",
            PropertyField::AppId => "AppId",
            PropertyField::ClusterId => "ClusterId",
        }
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_bag_has_every_field_absent() {
        let properties = MessageProperties::new();
        for field in PropertyField::ALL {
            assert!(!properties.is_present(field), "{} should be absent", field);
        }
    }

    #[test]
    fn setter_stores_value_and_marks_present() {
        let mut properties = MessageProperties::new();
        properties.set_content_type("application/json");
        properties.set_priority(0);
        properties.set_timestamp(0);

        assert_eq!(
            properties.content_type(),
            Some(&CheetahString::from_static_str("application/json"))
        );
        assert!(properties.is_present(PropertyField::ContentType));
        // presence is independent of the value being a zero value
        assert_eq!(properties.priority(), Some(0));
        assert!(properties.is_present(PropertyField::Priority));
        assert_eq!(properties.timestamp(), Some(0));
        assert!(properties.is_present(PropertyField::Timestamp));
    }

    #[test]
    fn clear_makes_field_absent_again() {
        let mut properties = MessageProperties::new();
        properties.set_app_id("billing");
        assert!(properties.is_present(PropertyField::AppId));

        properties.clear_app_id();
        assert!(!properties.is_present(PropertyField::AppId));
        assert_eq!(properties.app_id(), None);
    }

    #[test]
    fn descriptor_clear_matches_named_clear() {
        let mut properties = MessageProperties::new();
        for field in PropertyField::ALL {
            assert!(!properties.is_present(field));
        }
        properties.set_reply_to("amq.rabbitmq.reply-to");
        properties.clear(PropertyField::ReplyTo);
        assert!(!properties.is_present(PropertyField::ReplyTo));
    }

    #[test]
    fn put_header_allocates_table_and_overwrites() {
        let mut properties = MessageProperties::new();
        assert!(!properties.is_present(PropertyField::Headers));

        assert_eq!(properties.put_header("x", "first"), None);
        assert!(properties.is_present(PropertyField::Headers));

        let displaced = properties.put_header("x", "second");
        assert_eq!(displaced, Some(FieldValue::from("first")));
        let headers = properties.headers().unwrap();
        assert_eq!(headers.get_str("x").unwrap(), Some("second"));
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn copy_from_none_fails_and_leaves_bag_unchanged() {
        let mut properties = MessageProperties::new();
        properties.set_message_id("m-1");

        let before = properties.clone();
        let err = properties.copy_from::<BasicProperties>(None).unwrap_err();
        assert!(matches!(err, RabbitMQError::IllegalArgument(_)));
        assert_eq!(properties, before);
    }

    #[test]
    fn copy_to_none_fails() {
        let properties = MessageProperties::new();
        let err = properties.copy_to::<BasicProperties>(None).unwrap_err();
        assert!(matches!(err, RabbitMQError::IllegalArgument(_)));
    }

    #[test]
    fn copy_from_unwraps_timestamp_to_unix_seconds() {
        let mut carrier = BasicProperties::new();
        carrier.set_timestamp(AmqpTimestamp::new(1_700_000_000));

        let mut properties = MessageProperties::new();
        properties.copy_from(Some(&carrier)).unwrap();
        assert_eq!(properties.timestamp(), Some(1_700_000_000));
    }

    #[test]
    fn copy_to_rewraps_timestamp() {
        let mut properties = MessageProperties::new();
        properties.set_timestamp(1_700_000_000);

        let mut carrier = BasicProperties::new();
        properties.copy_to(Some(&mut carrier)).unwrap();
        assert_eq!(carrier.timestamp, Some(AmqpTimestamp::new(1_700_000_000)));
    }

    #[test]
    fn display_renders_declaration_order_with_null_markers() {
        let mut properties = MessageProperties::new();
        properties.set_content_type("text/plain");
        properties.set_priority(5);
        properties.put_header("x", "y");

        assert_eq!(
            properties.to_string(),
            "ContentType=text/plain, ContentEncoding=NULL, Headers=[x=y], DeliveryMode=NULL, \
             Priority=5, CorrelationId=NULL, ReplyTo=NULL, Expiration=NULL, MessageId=NULL, \
             Timestamp=NULL, Type=NULL, UserId=NULL, AppId=NULL, ClusterId=NULL"
        );
    }

    #[test]
    fn display_renders_empty_bag_as_all_null() {
        let rendered = MessageProperties::new().to_string();
        assert!(rendered.starts_with("ContentType=NULL, "));
        assert!(rendered.ends_with("ClusterId=NULL"));
        assert_eq!(rendered.matches("NULL").count(), 14);
    }

    #[test]
    fn display_renders_present_empty_header_table_as_brackets() {
        let mut properties = MessageProperties::new();
        properties.set_headers(FieldTable::new());
        assert!(properties.to_string().contains("Headers=[]"));
    }

    #[test]
    fn from_carrier_copies_exactly_the_present_subset() {
        let mut carrier = BasicProperties::new();
        carrier.set_correlation_id(CheetahString::from_static_str("corr-7"));
        carrier.set_delivery_mode(2);

        let properties = MessageProperties::from(&carrier);
        assert_eq!(
            properties.correlation_id(),
            Some(&CheetahString::from_static_str("corr-7"))
        );
        assert_eq!(properties.delivery_mode(), Some(2));
        assert!(!properties.is_present(PropertyField::ContentType));
        assert!(!properties.is_present(PropertyField::Headers));
    }

    #[test]
    fn json_round_trip_skips_absent_fields() {
        let mut properties = MessageProperties::new();
        properties.set_message_type("order.created");
        properties.set_timestamp(42);

        let json = properties.to_json().unwrap();
        assert!(json.contains("\"type\":\"order.created\""));
        assert!(json.contains("\"timestamp\":42"));
        assert!(!json.contains("contentType"));

        let back = MessageProperties::from_json(&json).unwrap();
        assert_eq!(back, properties);
    }

    #[test]
    fn array_header_values_survive_the_json_round_trip() {
        let mut properties = MessageProperties::new();
        properties.put_header(
            "x-death-counts",
            vec![FieldValue::from(1), FieldValue::from(2)],
        );
        properties.put_header("x-visited", Vec::new());

        let json = properties.to_json().unwrap();
        assert!(json.contains("\"x-death-counts\":[1,2]"));

        let back = MessageProperties::from_json(&json).unwrap();
        assert_eq!(back, properties);
    }

    #[test]
    fn property_field_as_str_uses_display_names() {
        assert_eq!(PropertyField::ContentType.as_str(), "ContentType");
        assert_eq!(PropertyField::Type.as_str(), "Type");
        assert_eq!(PropertyField::ALL.len(), 14);
        assert_eq!(PropertyField::ALL[0], PropertyField::ContentType);
        assert_eq!(PropertyField::ALL[13], PropertyField::ClusterId);
    }
}
