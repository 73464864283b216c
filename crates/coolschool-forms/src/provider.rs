use crate::rules::{Rule, RuleSet};

/// Field names of the course creation form.
pub mod course_fields {
    pub const NAME: &str = "name";
    pub const OBJECTIVES: &str = "objectives";
    pub const ELIGIBILITY: &str = "eligibility";
    pub const CATEGORY: &str = "category";
    pub const FILE: &str = "file";
}

/// Field names of the registration form.
pub mod register_fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const USERNAME: &str = "username";
    pub const ADDRESS: &str = "address";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const REPEAT_PASSWORD: &str = "repeatPassword";
}

/// Forms that have a declared rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    CourseCreate,
    Register,
}

/// Supplies the rule set a form is validated against.
pub trait ValidationRuleProvider {
    fn rules(&self, form: FormKind) -> RuleSet;
}

/// Rules used by the application unless a different provider is injected.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRules;

impl ValidationRuleProvider for DefaultRules {
    fn rules(&self, form: FormKind) -> RuleSet {
        match form {
            FormKind::CourseCreate => course_rules(),
            FormKind::Register => register_rules(),
        }
    }
}

fn text(min: usize, max: usize) -> [Rule; 3] {
    [Rule::Required, Rule::MinLength(min), Rule::MaxLength(max)]
}

fn course_rules() -> RuleSet {
    use course_fields::*;

    RuleSet::new()
        .field(NAME, text(3, 100))
        .field(OBJECTIVES, text(10, 1000))
        .field(ELIGIBILITY, text(10, 1000))
        .field(CATEGORY, [Rule::Selected])
        .field(FILE, [Rule::FileCount(1)])
}

fn register_rules() -> RuleSet {
    use register_fields::*;

    RuleSet::new()
        .field(FIRST_NAME, text(2, 50))
        .field(LAST_NAME, text(2, 50))
        .field(USERNAME, text(3, 30))
        .field(ADDRESS, text(5, 100))
        .field(EMAIL, [Rule::Required, Rule::Email])
        .field(PASSWORD, text(8, 64))
        .field(
            REPEAT_PASSWORD,
            [
                Rule::Required,
                Rule::Matches {
                    field: PASSWORD,
                    message: "Repeat password must match password.",
                },
            ],
        )
}
