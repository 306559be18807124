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

//! # Message Properties Round Trip
//!
//! This example demonstrates the life of a property bag:
//! - building one with `MessagePropertiesBuilder`
//! - importing from a basic-properties carrier with `copy_from`
//! - exporting into a fresh carrier with `copy_to`
//! - the `NULL`-marked debug rendering

use cheetah_string::CheetahString;
use rabbitmq_common::AmqpTimestamp;
use rabbitmq_common::BasicProperties;
use rabbitmq_common::BasicPropertiesTrait;
use rabbitmq_common::DeliveryMode;
use rabbitmq_common::MessageProperties;
use rabbitmq_common::MessagePropertiesBuilder;
use rabbitmq_error::RabbitMQResult;
use tracing::info;

pub const CONTENT_TYPE: &str = "application/json";
pub const CORRELATION_ID: &str = "order-20231105-0042";
pub const REPLY_QUEUE: &str = "amq.rabbitmq.reply-to";
pub const PUBLISH_TIME: i64 = 1_700_000_000;

pub fn main() -> RabbitMQResult<()> {
    rabbitmq_common::log::init_logger();
    info!("starting message properties demo");

    println!("========== RabbitMQ Message Properties ==========\n");

    // 1. Build a bag field by field
    let properties = build_bag();

    // 2. Import the present fields of a carrier on top of it
    let properties = import_from_carrier(properties)?;

    // 3. Export the bag into a fresh carrier
    export_to_carrier(&properties)?;

    // 4. Render the bag for log lines
    render_debug_string(&properties);

    println!("\n========== All examples completed ==========");
    Ok(())
}

/// 1. Build a bag field by field
///
/// Every field is optional; the builder only marks present what it is given.
fn build_bag() -> MessageProperties {
    println!("1. Build with MessagePropertiesBuilder");

    let properties = MessagePropertiesBuilder::new()
        .content_type(CONTENT_TYPE)
        .delivery_mode(DeliveryMode::Persistent)
        .correlation_id(CORRELATION_ID)
        .reply_to(REPLY_QUEUE)
        .header("x-retry-count", 0)
        .build();

    println!("   Bag: {}", properties);
    println!("   Status: Completed\n");
    properties
}

/// 2. Import from a carrier
///
/// Fields present on the carrier overwrite the bag; absent carrier fields
/// leave the bag alone, and header entries merge additively.
fn import_from_carrier(mut properties: MessageProperties) -> RabbitMQResult<MessageProperties> {
    println!("2. Import with copy_from");
    println!("   Method: properties.copy_from(Some(&carrier))");

    let mut carrier = BasicProperties::new();
    carrier.set_message_id(CheetahString::from_static_str("msg-77f3b2"));
    carrier.set_timestamp(AmqpTimestamp::new(PUBLISH_TIME));
    carrier.set_priority(5);

    properties.copy_from(Some(&carrier))?;

    println!("   Imported message id: {:?}", properties.message_id());
    println!("   Imported timestamp:  {:?}", properties.timestamp());
    println!("   Status: Completed\n");
    Ok(properties)
}

/// 3. Export into a carrier
///
/// Only present fields are written; the timestamp is wrapped back into the
/// carrier's native `AmqpTimestamp`.
fn export_to_carrier(properties: &MessageProperties) -> RabbitMQResult<()> {
    println!("3. Export with copy_to");
    println!("   Method: properties.copy_to(Some(&mut carrier))");

    let mut destination = BasicProperties::new();
    properties.copy_to(Some(&mut destination))?;

    println!("   Carrier: {}", destination);
    println!("   Property flags: {:#06x}", destination.property_flags());
    println!("   Status: Completed\n");
    Ok(())
}

/// 4. Debug rendering
///
/// Every field renders in declaration order, absent ones as `NULL`.
fn render_debug_string(properties: &MessageProperties) {
    println!("4. Debug rendering");
    println!("   {}", properties);
    println!("   Status: Completed");
}
