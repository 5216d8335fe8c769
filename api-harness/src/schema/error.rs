use std::fmt::Display;

/// The schema keyword a payload broke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Required { property: String },
    Type,
    Format { format: String },
    AdditionalProperties { unexpected: Vec<String> },
    Other { keyword: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub instance_path: String,
    pub schema_path: String,
    pub constraint: Constraint,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    pub schema: String,
    pub violations: Vec<Violation>,
}

impl SchemaValidationError {
    pub fn has_violation_at(&self, instance_path: &str) -> bool {
        self.violations
            .iter()
            .any(|violation| violation.instance_path == instance_path)
    }
}

impl std::error::Error for SchemaValidationError {}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constraint::Required { property } => write!(f, "required \"{}\"", property),
            Constraint::Type => write!(f, "type"),
            Constraint::Format { format } => write!(f, "format \"{}\"", format),
            Constraint::AdditionalProperties { unexpected } => {
                write!(f, "additionalProperties {:?}", unexpected)
            }
            Constraint::Other { keyword } => write!(f, "{}", keyword),
        }
    }
}

impl Display for SchemaValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Payload does not match schema {} ({} violation(s))",
            self.schema,
            self.violations.len()
        )?;

        for violation in &self.violations {
            let path = if violation.instance_path.is_empty() {
                "<root>"
            } else {
                violation.instance_path.as_str()
            };
            write!(
                f,
                "\n  - {} at {} [{}]",
                violation.message, path, violation.constraint
            )?;
        }

        Ok(())
    }
}
