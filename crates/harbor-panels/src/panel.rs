//! Panel records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One overlay panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Panel {
    pub title: String,
    /// Status line under the title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub sections: Vec<PanelSection>,
    /// Footer line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
}

/// A group of label/value rows, optionally headed and with a text line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PanelSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub items: Vec<PanelItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelItem {
    pub label: String,
    pub value: String,
}

impl Panel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// First section with the given heading.
    pub fn section(&self, heading: &str) -> Option<&PanelSection> {
        self.sections
            .iter()
            .find(|s| s.heading.as_deref() == Some(heading))
    }

    /// Value of the first item labelled `label` in any section.
    pub fn value(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|s| &s.items)
            .find(|item| item.label == label)
            .map(|item| item.value.as_str())
    }
}

impl PanelSection {
    pub fn headed(heading: impl Into<String>) -> Self {
        Self {
            heading: Some(heading.into()),
            ..Default::default()
        }
    }

    pub fn item(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.push(PanelItem {
            label: label.into(),
            value: value.into(),
        });
        self
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} ==", self.title)?;
        if let Some(status) = &self.status {
            writeln!(f, "{status}")?;
        }
        for section in &self.sections {
            writeln!(f)?;
            write!(f, "{section}")?;
        }
        if let Some(meta) = &self.meta {
            writeln!(f)?;
            writeln!(f, "{meta}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PanelSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(heading) = &self.heading {
            writeln!(f, "-- {heading} --")?;
        }
        if let Some(text) = &self.text {
            writeln!(f, "{text}")?;
        }
        for item in &self.items {
            writeln!(f, "{}: {}", item.label, item.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_layout() {
        let mut panel = Panel::new("Port KPIs");
        panel.status = Some("live".to_string());
        panel
            .sections
            .push(PanelSection::default().item("Berth Occupancy", "75%"));
        panel
            .sections
            .push(PanelSection::headed("Container Throughput").item("Daily", "2,800 TEU"));
        panel.meta = Some("Updated 08:00".to_string());

        assert_eq!(
            panel.to_string(),
            "== Port KPIs ==\nlive\n\nBerth Occupancy: 75%\n\n-- Container Throughput --\nDaily: 2,800 TEU\n\nUpdated 08:00\n"
        );
    }

    #[test]
    fn test_serde_skips_empty_optionals() {
        let panel = Panel::new("Empty");
        let json = serde_json::to_string(&panel).unwrap();
        assert_eq!(json, r#"{"title":"Empty","sections":[]}"#);
        let back: Panel = serde_json::from_str(&json).unwrap();
        assert_eq!(back, panel);
    }
}
