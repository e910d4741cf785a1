//! Host events as shown in the desktop event log.

use host_bridge::HostMessage;
use serde_json::Value;

const MAX_LOG_LINES: usize = 200;

pub fn describe_host_message(message: &HostMessage) -> String {
    let params: Vec<String> = message
        .params
        .iter()
        .map(|(name, value)| format!("{name}={}", render_value(value)))
        .collect();
    if params.is_empty() {
        message.name.clone()
    } else {
        format!("{} {}", message.name, params.join(" "))
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

/// Newest entries last; the oldest are dropped past the cap.
#[derive(Debug, Default)]
pub struct EventLog {
    lines: Vec<String>,
}

impl EventLog {
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        if self.lines.len() > MAX_LOG_LINES {
            let overflow = self.lines.len() - MAX_LOG_LINES;
            self.lines.drain(..overflow);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
