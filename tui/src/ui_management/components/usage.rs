use ratatui::{
    style::Stylize,
    text::{Line, Span},
};

#[derive(Debug, Clone)]
pub struct UsageInfoLine {
    pub keys: Vec<String>,
    pub description: String,
}

impl UsageInfoLine {
    pub fn new(keys: &[&str], description: &str) -> Self {
        UsageInfoLine {
            keys: keys.iter().map(|key| key.to_string()).collect(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsageInfo {
    pub lines: Vec<UsageInfoLine>,
}

pub trait HasUsageInfo {
    fn usage_info(&self) -> UsageInfo;
}

fn key_to_span<'a>(key: &str) -> Span<'a> {
    Span::from(format!("({})", key)).bold()
}

/// Renders the usage as a single line, e.g. `(↑)/(↓) to move · (Enter) to open`
pub fn usage_to_line<'a>(usage: UsageInfo) -> Line<'a> {
    let mut spans: Vec<Span> = vec![];

    for (idx, usage_line) in usage.lines.iter().enumerate() {
        if idx > 0 {
            spans.push(" · ".into());
        }

        for (key_idx, key) in usage_line.keys.iter().enumerate() {
            if key_idx > 0 {
                spans.push("/".into());
            }
            spans.push(key_to_span(key));
        }

        spans.push(Span::from(format!(" {}", usage_line.description)));
    }

    Line::from(spans)
}
