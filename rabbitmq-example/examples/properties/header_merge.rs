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

//! # Header Tables
//!
//! This example demonstrates the application header table:
//! - the additive merge performed on import
//! - the wholesale replacement performed on export
//! - shape-checked reads with the typed getters
//! - riding a JSON payload with absent fields omitted

use rabbitmq_common::BasicProperties;
use rabbitmq_common::BasicPropertiesTrait;
use rabbitmq_common::FieldTable;
use rabbitmq_common::MessageProperties;
use rabbitmq_error::RabbitMQResult;
use tracing::info;

pub fn main() -> RabbitMQResult<()> {
    rabbitmq_common::log::init_logger();
    info!("starting header table demo");

    println!("========== RabbitMQ Header Tables ==========\n");

    // 1. Import merges additively
    let properties = import_merges()?;

    // 2. Export replaces wholesale
    export_replaces(&properties)?;

    // 3. Typed getters check the value shape
    typed_getters(&properties)?;

    // 4. JSON round trip
    json_round_trip(&properties)?;

    println!("\n========== All examples completed ==========");
    Ok(())
}

/// 1. Import merges additively
///
/// Entries already in the bag survive; colliding keys take the carrier's
/// value (last-write-wins).
fn import_merges() -> RabbitMQResult<MessageProperties> {
    println!("1. Import merges header entries");

    let mut properties = MessageProperties::new();
    properties.put_header("x-origin", "edge-gateway");
    properties.put_header("x-retry-count", 1);

    let mut carrier = BasicProperties::new();
    let mut incoming = FieldTable::new();
    incoming.insert("x-retry-count", 2);
    incoming.insert("x-redelivered", true);
    carrier.set_headers(incoming);

    properties.copy_from(Some(&carrier))?;

    println!("   Merged headers: {}", properties.headers().unwrap_or(&FieldTable::new()));
    println!("   Status: Completed\n");
    Ok(properties)
}

/// 2. Export replaces wholesale
///
/// Whatever table the destination carried is dropped in favour of a copy of
/// the bag's table.
fn export_replaces(properties: &MessageProperties) -> RabbitMQResult<()> {
    println!("2. Export replaces the destination table");

    let mut destination = BasicProperties::new();
    let mut stale = FieldTable::new();
    stale.insert("stale-entry", "about to vanish");
    destination.set_headers(stale);

    properties.copy_to(Some(&mut destination))?;

    if let Some(headers) = destination.headers() {
        println!("   Destination headers: {}", headers);
        println!("   stale-entry survived: {}", headers.contains_key("stale-entry"));
    }
    println!("   Status: Completed\n");
    Ok(())
}

/// 3. Typed getters
///
/// `get_str`/`get_i64`/`get_bool` distinguish "absent" from "present with
/// another shape"; the latter is an error worth surfacing.
fn typed_getters(properties: &MessageProperties) -> RabbitMQResult<()> {
    println!("3. Typed header getters");

    if let Some(headers) = properties.headers() {
        let origin = headers.get_str("x-origin")?;
        let retries = headers.get_i64("x-retry-count")?;
        let redelivered = headers.get_bool("x-redelivered")?;
        println!("   x-origin:      {:?}", origin);
        println!("   x-retry-count: {:?}", retries);
        println!("   x-redelivered: {:?}", redelivered);

        match headers.get_str("x-retry-count") {
            Err(err) => println!("   Reading an int as string fails: {}", err),
            Ok(value) => println!("   Unexpected success: {:?}", value),
        }
    }
    println!("   Status: Completed\n");
    Ok(())
}

/// 4. JSON round trip
///
/// Absent fields serialize to nothing, so a sparse bag stays sparse on the
/// wire.
fn json_round_trip(properties: &MessageProperties) -> RabbitMQResult<()> {
    println!("4. JSON round trip");

    let json = properties.to_json()?;
    println!("   JSON: {}", json);

    let back = MessageProperties::from_json(&json)?;
    println!("   Equal after round trip: {}", back == *properties);
    println!("   Status: Completed");
    Ok(())
}
