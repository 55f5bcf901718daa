//! Comment banners.

use chrono::{DateTime, Utc};

/// Provenance block printed at the top of a generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    /// Source document file name.
    pub source: String,
    /// Generator name.
    pub generator: String,
    /// Generation time.
    pub timestamp: DateTime<Utc>,
    /// Host the generator ran on.
    pub host: String,
}

impl Banner {
    /// Creates a banner stamped with the current time.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        generator: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            generator: generator.into(),
            timestamp: Utc::now(),
            host: host.into(),
        }
    }

    /// Replaces the timestamp, for reproducible output.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Renders the banner followed by a blank line.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = section("Generated file ** DO NOT EDIT **");
        out.push_str(&format!("// from: {}\n", self.source));
        out.push_str(&format!("// with: {}\n", self.generator));
        out.push_str(&format!(
            "// time: {} UTC\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.6f")
        ));
        out.push_str(&format!("// node: {}\n\n", self.host));
        out
    }
}

/// Renders a dashed section banner followed by a blank line.
#[must_use]
pub fn section(title: &str) -> String {
    let rule = "-".repeat(title.chars().count());
    format!("// --{rule}--\n//  {title}\n// --{rule}--\n\n")
}
