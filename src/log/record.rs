/// Per-analysis operation record
///
/// Every step applied to a spectrum is recorded with a timestamp, an
/// operation name, and the parameter values used, in sequential order.
/// The record is caller-owned, one per analysis session, and can be
/// exported as human-readable text or JSON alongside the results.
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single recorded operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Sequential operation number (1-based)
    pub sequence: usize,
    /// When the operation ran
    pub timestamp: DateTime<Local>,
    /// Operation name, e.g. "Wavelength Mapping"
    pub operation: String,
    /// Parameter values and outcome
    pub details: String,
}

impl RecordEntry {
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.details
        )
    }
}

/// Ordered record of everything done to one spectrum
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub session_id: String,
    pub session_start: DateTime<Local>,
    /// Identifier of the analyzed spectrum (file name, usually)
    pub source: String,
    pub software_version: String,
    pub entries: Vec<RecordEntry>,
}

impl AnalysisRecord {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            source: String::new(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    pub fn set_source(&mut self, source: &str) {
        self.source = source.to_string();
    }

    pub fn add_entry(&mut self, operation: &str, details: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(RecordEntry {
            sequence: seq,
            timestamp: Local::now(),
            operation: operation.to_string(),
            details: details.to_string(),
        });
        log::info!("[{:03}] {} — {}", seq, operation, details);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as human-readable text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("───────────────────────────────────────────────\n");
        out.push_str("  Spectral Analysis Record\n");
        out.push_str("───────────────────────────────────────────────\n");
        out.push_str(&format!("  Session:    {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:    {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("  Source:     {}\n", self.source));
        out.push_str(&format!("  Software:   v{}\n", self.software_version));
        out.push_str(&format!("  Operations: {}\n\n", self.entries.len()));

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push('\n');
        }
        out
    }

    /// Export as JSON
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

impl Default for AnalysisRecord {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_creation_and_entries() {
        let mut record = AnalysisRecord::new();
        assert!(record.is_empty());

        record.add_entry("Wavelength Mapping", "pixel axis, 0.051 nm/px around 420.0 nm");
        assert_eq!(record.len(), 1);
        assert_eq!(record.entries[0].sequence, 1);
        assert_eq!(record.entries[0].operation, "Wavelength Mapping");

        record.add_entry("Baseline", "order 3, 24 iterations, average 102.4");
        assert_eq!(record.entries[1].sequence, 2);
    }

    #[test]
    fn test_text_export_contains_operations() {
        let mut record = AnalysisRecord::new();
        record.set_source("shot_0042.csv");
        record.add_entry("Calibration", "shift -0.012 nm over 3 iterations");
        let text = record.to_text();
        assert!(text.contains("shot_0042.csv"));
        assert!(text.contains("Calibration"));
        assert!(text.contains("-0.012 nm"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut record = AnalysisRecord::new();
        record.add_entry("Integration", "signal window 387.10–388.80 nm");
        let json = record.to_json();
        let parsed: AnalysisRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.entries[0].details, "signal window 387.10–388.80 nm");
    }
}
