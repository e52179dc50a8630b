//! Findings accumulator and report rendering
//!
//! Findings are collected in detection order and rendered as-is: no
//! deduplication, no sorting, no truncation. Running the same
//! validation twice on an unmodified file therefore renders
//! byte-identical output.

/// Ordered errors and warnings produced by one validation run
#[derive(Debug, Default)]
pub struct Findings {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Findings {
    /// Creates an empty findings list
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error finding
    pub fn error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Appends a warning finding
    pub fn warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// All error findings, in detection order
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// All warning findings, in detection order
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Whether any error finding was recorded
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Renders the final verdict text for a validated file
pub fn render_report(file_path: &str, findings: &Findings) -> String {
    let mut out = String::new();

    if !findings.warnings().is_empty() {
        out.push_str("The following warnings were found:\n");
        for warning in findings.warnings() {
            out.push_str(" - ");
            out.push_str(warning);
            out.push('\n');
        }
        out.push('\n');
    }

    if findings.has_errors() {
        out.push_str(file_path);
        out.push_str(" is NOT a valid cloud optimized GeoTIFF.\n");
        out.push_str("The following errors were found:\n");
        for error in findings.errors() {
            out.push_str(" - ");
            out.push_str(error);
            out.push('\n');
        }
        out.push('\n');
    } else {
        out.push_str(file_path);
        out.push_str(" is a valid cloud optimized GeoTIFF\n");
    }

    out
}
