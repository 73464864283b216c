use std::fmt;

/// A single broken validation rule, rendered inline next to its field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("this field is required")]
    Required,
    #[error("must be at least {0} characters long")]
    TooShort(usize),
    #[error("must be at most {0} characters long")]
    TooLong(usize),
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("an option must be selected")]
    NotSelected,
    #[error("exactly {expected} file(s) must be attached, got {actual}")]
    FileCount { expected: usize, actual: usize },
    #[error("{0}")]
    Mismatch(String),
}

/// Violations grouped by field, in the order the fields were first reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, Vec<Violation>)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, violation: Violation) {
        let field = field.into();
        match self.0.iter_mut().find(|(name, _)| *name == field) {
            Some((_, violations)) => violations.push(violation),
            None => self.0.push((field, vec![violation])),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Violations of one field; empty when the field is valid.
    pub fn field(&self, field: &str) -> &[Violation] {
        self.0
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, violations)| violations.as_slice())
            .unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Violation])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, violations) in self.iter() {
            for violation in violations {
                if !first {
                    f.write_str("; ")?;
                }
                first = false;
                write!(f, "{field}: {violation}")?;
            }
        }
        Ok(())
    }
}
