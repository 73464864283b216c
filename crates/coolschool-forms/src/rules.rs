use std::sync::LazyLock;

use coolschool_bridge::validation::Violation;
use regex::Regex;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Current value of a single form field, as seen by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Free text input.
    Text(&'a str),
    /// Selection from a list of options. `None` when nothing is selected.
    Choice(Option<i64>),
    /// Amount of attached files.
    Files(usize),
}

/// Read access to a form's fields by name.
pub trait FormValues {
    fn value(&self, field: &str) -> Option<FieldValue<'_>>;
}

/// A declarative constraint on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Text must not be blank, a choice must be made, files must be attached.
    Required,
    /// Trimmed text must have at least this many characters. Blank text is
    /// left to [`Rule::Required`].
    MinLength(usize),
    /// Trimmed text must have at most this many characters.
    MaxLength(usize),
    /// Non-blank text must look like an email address.
    Email,
    /// A non-negative option must be selected.
    Selected,
    /// Exactly this many files must be attached.
    FileCount(usize),
    /// Text must be equal to another field's text.
    Matches {
        field: &'static str,
        message: &'static str,
    },
}

impl Rule {
    /// Checks the rule against `value`; `form` resolves cross-field rules.
    pub(crate) fn check(&self, value: FieldValue<'_>, form: &dyn FormValues) -> Option<Violation> {
        match (self, value) {
            (Rule::Required, FieldValue::Text(text)) => {
                text.trim().is_empty().then_some(Violation::Required)
            }
            (Rule::Required, FieldValue::Choice(choice)) => {
                choice.is_none().then_some(Violation::Required)
            }
            (Rule::Required, FieldValue::Files(count)) => (count == 0).then_some(Violation::Required),
            (Rule::MinLength(min), FieldValue::Text(text)) => {
                let len = text.trim().chars().count();
                (len > 0 && len < *min).then_some(Violation::TooShort(*min))
            }
            (Rule::MaxLength(max), FieldValue::Text(text)) => {
                (text.trim().chars().count() > *max).then_some(Violation::TooLong(*max))
            }
            (Rule::Email, FieldValue::Text(text)) => {
                let text = text.trim();
                (!text.is_empty() && !EMAIL.is_match(text)).then_some(Violation::InvalidEmail)
            }
            (Rule::Selected, FieldValue::Choice(choice)) => {
                (!choice.is_some_and(|id| id >= 0)).then_some(Violation::NotSelected)
            }
            (Rule::FileCount(expected), FieldValue::Files(actual)) => {
                (actual != *expected).then_some(Violation::FileCount {
                    expected: *expected,
                    actual,
                })
            }
            (Rule::Matches { field, message }, FieldValue::Text(text)) => {
                let matches = matches!(form.value(field), Some(FieldValue::Text(other)) if other == text);
                (!matches).then(|| Violation::Mismatch(message.to_string()))
            }
            (rule, value) => {
                log::error!("Rule {rule:?} cannot be applied to {value:?}");
                None
            }
        }
    }
}

/// Ordered list of fields and the rules each must satisfy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rules for `field`, appending to any rules it already has.
    pub fn field(mut self, field: &'static str, rules: impl IntoIterator<Item = Rule>) -> Self {
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => existing.extend(rules),
            None => self.fields.push((field, rules.into_iter().collect())),
        }
        self
    }

    pub fn rules_for(&self, field: &str) -> &[Rule] {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, rules)| rules.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[Rule])> {
        self.fields.iter().map(|(name, rules)| (*name, rules.as_slice()))
    }
}
