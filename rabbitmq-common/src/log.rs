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
use std::str::FromStr;

/// Initializes the global logger for the process.
///
/// The level comes from the `RUST_LOG` environment variable, "INFO" when
/// unset. Output goes to stdout with thread names, thread ids and line
/// numbers, the layout the runnable examples expect.
pub fn init_logger() {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("INFO"));
    init_subscriber(&level);
}

/// Initializes the global logger at an explicit [`Level`], ignoring
/// `RUST_LOG`.
pub fn init_logger_with_level(level: Level) {
    init_subscriber(level.as_str());
}

fn init_subscriber(level: &str) {
    tracing_subscriber::fmt()
        .with_thread_names(true)
        .with_level(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_max_level(tracing::Level::from_str(level).expect("Invalid log level"))
        .init();
}

/// A validated log-level name accepted by [`init_logger_with_level`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Level(&'static str);

impl Level {
    pub const DEBUG: Level = Level("DEBUG");
    pub const ERROR: Level = Level("ERROR");
    pub const INFO: Level = Level("INFO");
    pub const TRACE: Level = Level("TRACE");
    pub const WARN: Level = Level("WARN");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl From<&'static str> for Level {
    /// Wraps a known level name; any other name is a programming error.
    fn from(level: &'static str) -> Self {
        match level {
            "ERROR" | "WARN" | "INFO" | "DEBUG" | "TRACE" => Level(level),
            _ => panic!("Invalid log level: {}", level),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_constants_expose_their_names() {
        assert_eq!(Level::ERROR.as_str(), "ERROR");
        assert_eq!(Level::WARN.as_str(), "WARN");
        assert_eq!(Level::INFO.as_str(), "INFO");
        assert_eq!(Level::DEBUG.as_str(), "DEBUG");
        assert_eq!(Level::TRACE.as_str(), "TRACE");
    }

    #[test]
    fn level_from_known_str_matches_constant() {
        assert_eq!(Level::from("INFO"), Level::INFO);
        assert_eq!(Level::from("TRACE"), Level::TRACE);
    }

    #[test]
    #[should_panic(expected = "Invalid log level")]
    fn level_from_unknown_str_panics() {
        let _ = Level::from("VERBOSE");
    }

    #[test]
    fn level_display_pads_like_str() {
        assert_eq!(format!("{}", Level::INFO), "INFO");
        assert_eq!(format!("{:>7}", Level::WARN), "   WARN");
    }
}
