#[derive(Debug, Clone)]
pub enum LogOutput {
    Log(log::Level),
    LogTarget(log::Level, String),
    StdOut,
    StdErr,
    #[cfg(feature = "log-to-file")]
    File(std::sync::Arc<parking_lot::Mutex<std::fs::File>>),
}

impl From<log::Level> for LogOutput {
    fn from(value: log::Level) -> Self {
        Self::Log(value)
    }
}

impl LogOutput {
    fn print(&self, msg: &str) {
        match self {
            LogOutput::Log(level) => log::log!(*level, "{}", msg),
            LogOutput::LogTarget(level, target) => {
                log::log!(target: target, *level, "{}", msg)
            }
            LogOutput::StdOut => println!("{}", msg),
            LogOutput::StdErr => eprintln!("{}", msg),
            #[cfg(feature = "log-to-file")]
            LogOutput::File(file) => {
                use std::io::Write;

                let mut file = file.lock();
                file.write_all(msg.as_bytes()).ok();
                file.write_all(b"\n").ok();
            }
        }
    }
}

#[derive(Debug)]
pub struct LogItem {
    level: usize,
    title: String,
    value: Option<String>,
}

impl<T: ToString, V: ToString> From<(usize, T, V)> for LogItem {
    fn from((level, title, value): (usize, T, V)) -> Self {
        Self {
            level,
            title: title.to_string(),
            value: Some(value.to_string()),
        }
    }
}

impl<T: ToString> From<(usize, T)> for LogItem {
    fn from((level, title): (usize, T)) -> Self {
        Self {
            level,
            title: title.to_string(),
            value: None,
        }
    }
}

/// Collect `(level, title)` and `(level, title, value)` tuples into a
/// `Vec<LogItem>` for a [`Loggable`] implementation.
#[macro_export]
macro_rules! log_vec {
    [$($item:expr),* $(,)?] => {
        vec![$($crate::LogItem::from($item)),*]
    };
}

pub trait Loggable {
    fn as_log(&self) -> Vec<LogItem>;
}

pub struct Logger;

impl Logger {
    pub fn log<T>(output: &LogOutput, loggable: &T)
    where
        T: Loggable,
    {
        Self::log_impl(output, &loggable.as_log())
    }

    fn log_impl(output: &LogOutput, items: &[LogItem]) {
        if let Some(header) = items.first() {
            output.print(&header.title);
        }

        let right_align = items
            .iter()
            .skip(1)
            .map(|i| i.title.len())
            .max()
            .unwrap_or(0);

        for item in items.iter().skip(1) {
            let indent = " ".repeat(item.level * 2);

            let line = match &item.value {
                Some(value) => {
                    let padding = " ".repeat(right_align - item.title.len());
                    format!("{indent}{}: {padding}{value}", item.title)
                }
                None => format!("{indent}{}", item.title),
            };

            output.print(&line);
        }
    }
}
