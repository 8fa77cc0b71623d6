use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Level
///

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug, // least severe
    Info,
    Ok,
    Warn,
    Error, // most severe
}

///
/// Topic
///

#[derive(Clone, Copy, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum Topic {
    Amount,
    Config,
    Identity,
    Token,
}

///
/// Logger
///
/// Carries the minimum level; handed to whatever needs to log instead of
/// living in a global.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Logger {
    min_level: Level,
    enabled: bool,
}

impl Logger {
    #[must_use]
    pub const fn new(min_level: Level) -> Self {
        Self {
            min_level,
            enabled: true,
        }
    }

    #[must_use]
    pub const fn silent() -> Self {
        Self {
            min_level: Level::Error,
            enabled: false,
        }
    }

    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        self.enabled && level >= self.min_level
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Level::Info)
    }
}

#[macro_export]
macro_rules! log {
    // =========================================
    // INTERNAL
    // =========================================
    (@inner $logger:expr, $topic:expr, $level:expr, $fmt:expr $(, $arg:expr)*) => {{
        let level = $level;
        if $logger.enabled(level) {
            let topic_opt: Option<String> = $topic;
            let message = format!($fmt $(, $arg)*);
            println!("{}", $crate::log::__render_line(level, topic_opt.as_deref(), &message));
        }
    }};

    // =========================================
    // (1) With topic (normal + trailing comma)
    // =========================================
    ($logger:expr, $topic:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner $logger, Some($topic.to_string()), $crate::log::Level::$level, $fmt $(, $arg)*);
    }};

    // =========================================
    // (2) No topic (normal + trailing comma)
    // =========================================
    ($logger:expr, $level:ident, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        $crate::log!(@inner $logger, None::<String>, $crate::log::Level::$level, $fmt $(, $arg)*);
    }};
}

///
/// Helpers
///

#[doc(hidden)]
#[must_use]
pub fn __render_line(level: Level, topic: Option<&str>, message: &str) -> String {
    let (color, reset) = match level {
        Level::Ok => ("\x1b[32m", "\x1b[0m"),
        Level::Info => ("\x1b[34m", "\x1b[0m"),
        Level::Warn => ("\x1b[33m", "\x1b[0m"),
        Level::Error => ("\x1b[31m", "\x1b[0m"),
        Level::Debug => ("", ""),
    };

    let label = format!("{color}{:^5}{reset}", level.to_string().to_uppercase());

    match topic {
        Some(t) => format!("{label}| [{t}] {message}"),
        None => format!("{label}| {message}"),
    }
}

///
/// TESTS
///
