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

//! Common message primitives of the rabbitmq-rust crates: the basic-class
//! properties bag, the carrier abstraction it maps onto, the application
//! header field table and the wire-level presence flags.

pub use crate::common::message::basic_properties::BasicProperties;
pub use crate::common::message::basic_properties::BasicPropertyFlag;
pub use crate::common::message::field_table::FieldTable;
pub use crate::common::message::field_table::FieldValue;
pub use crate::common::message::message_enum::DeliveryMode;
pub use crate::common::message::message_properties::MessageProperties;
pub use crate::common::message::message_properties::PropertyField;
pub use crate::common::message::message_properties_builder::MessagePropertiesBuilder;
pub use crate::common::message::AmqpTimestamp;
pub use crate::common::message::BasicPropertiesTrait;

pub mod common;
pub mod log;
