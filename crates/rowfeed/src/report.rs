//! Error reporting to the host

use std::fmt;

/// Severity of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Information,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Information => "information",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        f.write_str(name)
    }
}

/// Whether a reporter keeps accepting reports after the first error.
///
/// Chosen by the host when it builds the reporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportPolicy {
    /// Accept every report
    #[default]
    Continue,
    /// Drop everything after the first `Error` report
    StopAfterFirst,
}

/// Receives reports from the source
pub trait ErrorReporter {
    /// Report a condition with a human-readable message
    fn report(&mut self, severity: Severity, source: &str, message: &str);
}

/// Tracks a [`ReportPolicy`] across reports
#[derive(Debug, Clone, Default)]
struct PolicyGate {
    policy: ReportPolicy,
    stopped: bool,
}

impl PolicyGate {
    fn new(policy: ReportPolicy) -> Self {
        Self {
            policy,
            stopped: false,
        }
    }

    /// Whether a report of `severity` should go through
    fn admit(&mut self, severity: Severity) -> bool {
        if self.stopped {
            return false;
        }
        if self.policy == ReportPolicy::StopAfterFirst && severity == Severity::Error {
            self.stopped = true;
        }
        true
    }
}

/// Forwards reports to the `log` facade
#[derive(Debug, Clone, Default)]
pub struct LogReporter {
    gate: PolicyGate,
}

impl LogReporter {
    /// Create a reporter with the given policy
    pub fn new(policy: ReportPolicy) -> Self {
        Self {
            gate: PolicyGate::new(policy),
        }
    }
}

impl ErrorReporter for LogReporter {
    fn report(&mut self, severity: Severity, source: &str, message: &str) {
        if !self.gate.admit(severity) {
            return;
        }
        match severity {
            Severity::Information => log::info!("[{}] {}", source, message),
            Severity::Warning => log::warn!("[{}] {}", source, message),
            Severity::Error => log::error!("[{}] {}", source, message),
        }
    }
}

/// A report kept by [`CollectingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub severity: Severity,
    pub source: String,
    pub message: String,
}

/// Keeps every admitted report in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    gate: PolicyGate,
    reports: Vec<Report>,
}

impl CollectingReporter {
    /// Create a reporter with the given policy
    pub fn new(policy: ReportPolicy) -> Self {
        Self {
            gate: PolicyGate::new(policy),
            reports: Vec::new(),
        }
    }

    /// All admitted reports, oldest first
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Admitted reports of `severity`
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Report> {
        self.reports.iter().filter(move |r| r.severity == severity)
    }

    /// Whether any `Error` report was admitted
    pub fn has_errors(&self) -> bool {
        self.with_severity(Severity::Error).next().is_some()
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&mut self, severity: Severity, source: &str, message: &str) {
        if self.gate.admit(severity) {
            self.reports.push(Report {
                severity,
                source: source.to_string(),
                message: message.to_string(),
            });
        }
    }
}
