//! Console logging helpers.
//!
//! Emoji-prefixed, optionally indented lines. Informational output goes to
//! stdout, warnings and errors to stderr.

/// Log level for console display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info => "   ",
            LogLevel::Success => "   ✓",
            LogLevel::Warning => "   ⚠️",
            LogLevel::Error => "   ❌",
        }
    }
}

/// Render one log line.
pub fn format_line(level: LogLevel, message: &str, indent: u8) -> String {
    format!("{}{} {}", "   ".repeat(indent as usize), level.prefix(), message)
}

fn emit(level: LogLevel, message: &str, indent: u8) {
    let line = format_line(level, message, indent);
    match level {
        LogLevel::Info | LogLevel::Success => println!("{}", line),
        LogLevel::Warning | LogLevel::Error => eprintln!("{}", line),
    }
}

pub fn log_info(msg: impl AsRef<str>) {
    emit(LogLevel::Info, msg.as_ref(), 0);
}

pub fn log_success(msg: impl AsRef<str>) {
    emit(LogLevel::Success, msg.as_ref(), 0);
}

pub fn log_warning(msg: impl AsRef<str>) {
    emit(LogLevel::Warning, msg.as_ref(), 0);
}

pub fn log_error(msg: impl AsRef<str>) {
    emit(LogLevel::Error, msg.as_ref(), 0);
}

pub fn log_info_indent(msg: impl AsRef<str>, indent: u8) {
    emit(LogLevel::Info, msg.as_ref(), indent);
}

pub fn log_success_indent(msg: impl AsRef<str>, indent: u8) {
    emit(LogLevel::Success, msg.as_ref(), indent);
}
