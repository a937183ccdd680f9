//! Step-by-step reporting to a human-readable sink
//!
//! The engine and steps report progress through the [`Reporter`] trait:
//! a header per step, one success/error line per outcome, and indented
//! informational detail. [`ConsoleReporter`] writes to stdout/stderr;
//! [`MemoryReporter`] captures lines so tests can assert on them.

use std::sync::Mutex;

/// Reporting seam used by the runner and by individual steps.
pub trait Reporter: Send + Sync {
    fn header(&self, title: &str);
    fn success(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Writes report lines to stdout, errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for ConsoleReporter {
    fn header(&self, title: &str) {
        println!("\n=== {} ===\n", title);
    }

    fn success(&self, message: &str) {
        println!("✓ {}", message);
    }

    fn info(&self, message: &str) {
        println!("  {}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Captures report lines in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("reporter lock").clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }

    fn push(&self, line: String) {
        self.lines.lock().expect("reporter lock").push(line);
    }
}

impl Reporter for MemoryReporter {
    fn header(&self, title: &str) {
        self.push(format!("=== {} ===", title));
    }

    fn success(&self, message: &str) {
        self.push(format!("✓ {}", message));
    }

    fn info(&self, message: &str) {
        self.push(format!("  {}", message));
    }

    fn error(&self, message: &str) {
        self.push(format!("✗ {}", message));
    }
}

const REDACT_PREFIX: usize = 16;

/// Truncate a sensitive value to a short prefix for logging.
pub fn redact(value: &str) -> String {
    if value.chars().count() <= REDACT_PREFIX {
        value.to_string()
    } else {
        let prefix: String = value.chars().take(REDACT_PREFIX).collect();
        format!("{}...", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_short_value() {
        assert_eq!(redact("tok-A"), "tok-A");
    }

    #[test]
    fn test_redact_long_value() {
        let token = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload";
        let redacted = redact(token);
        assert_eq!(redacted, "eyJhbGciOiJIUzI1...");
        assert!(redacted.len() < token.len());
    }

    #[test]
    fn test_memory_reporter_captures_lines() {
        let reporter = MemoryReporter::new();
        reporter.header("Step 1: authenticate-admin");
        reporter.success("login ok");
        reporter.info("token: tok-A");
        reporter.error("boom");

        let lines = reporter.lines();
        assert_eq!(lines.len(), 4);
        assert!(reporter.contains("authenticate-admin"));
        assert!(reporter.contains("✓ login ok"));
        assert!(reporter.contains("✗ boom"));
    }
}
