//! Declarative validation of the application's forms.
//!
//! A [`ValidationRuleProvider`] hands out a [`RuleSet`] per [`FormKind`], and
//! [`validate`] checks a form against it. Workflows use the result as their
//! pre-condition gate: nothing touches the network until a form validates.

mod provider;
mod rules;

use coolschool_bridge::auth::RegistrationForm;
use coolschool_bridge::course::CourseForm;
use coolschool_bridge::validation::{FieldErrors, Violation};

pub use crate::provider::{
    DefaultRules, FormKind, ValidationRuleProvider, course_fields, register_fields,
};
pub use crate::rules::{FieldValue, FormValues, Rule, RuleSet};

/// Checks every field of `form` against `rules`.
pub fn validate<F: FormValues>(form: &F, rules: &RuleSet) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for (field, _) in rules.iter() {
        for violation in validate_field(form, rules, field) {
            errors.push(field, violation);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Checks a single field, e.g. after the user edited it.
pub fn validate_field<F: FormValues>(form: &F, rules: &RuleSet, field: &str) -> Vec<Violation> {
    let Some(value) = form.value(field) else {
        log::error!("Form has no field named {field:?}");
        return Vec::new();
    };

    rules
        .rules_for(field)
        .iter()
        .filter_map(|rule| rule.check(value, form))
        .collect()
}

impl FormValues for CourseForm {
    fn value(&self, field: &str) -> Option<FieldValue<'_>> {
        use course_fields::*;

        Some(match field {
            NAME => FieldValue::Text(&self.name),
            OBJECTIVES => FieldValue::Text(&self.objectives),
            ELIGIBILITY => FieldValue::Text(&self.eligibility),
            CATEGORY => FieldValue::Choice(self.category.map(|id| id.0)),
            FILE => FieldValue::Files(self.files.len()),
            _ => return None,
        })
    }
}

impl FormValues for RegistrationForm {
    fn value(&self, field: &str) -> Option<FieldValue<'_>> {
        use register_fields::*;

        Some(FieldValue::Text(match field {
            FIRST_NAME => &self.first_name,
            LAST_NAME => &self.last_name,
            USERNAME => &self.username,
            ADDRESS => &self.address,
            EMAIL => &self.email,
            PASSWORD => &self.password,
            REPEAT_PASSWORD => &self.repeat_password,
            _ => return None,
        }))
    }
}

#[cfg(test)]
mod tests {
    use coolschool_bridge::course::Asset;
    use coolschool_bridge::ids::CategoryId;

    use super::*;

    fn valid_course() -> CourseForm {
        CourseForm {
            name: "Intro to Rust".into(),
            objectives: "Learn ownership and borrowing".into(),
            eligibility: "Anyone who can write a loop".into(),
            category: Some(CategoryId(3)),
            files: vec![Asset {
                file_name: "cover.png".into(),
                content_type: Some("image/png".into()),
                bytes: vec![1, 2, 3],
            }],
        }
    }

    fn valid_registration() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ivan".into(),
            last_name: "Petrov".into(),
            username: "ivanp".into(),
            address: "Sofia, Bulgaria".into(),
            email: "ivan@example.com".into(),
            password: "correct horse".into(),
            repeat_password: "correct horse".into(),
        }
    }

    #[test]
    fn valid_course_form_passes() {
        let rules = DefaultRules.rules(FormKind::CourseCreate);
        assert_eq!(validate(&valid_course(), &rules), Ok(()));
    }

    #[test]
    fn empty_course_form_reports_every_field() {
        let rules = DefaultRules.rules(FormKind::CourseCreate);
        let errors = validate(&CourseForm::default(), &rules).unwrap_err();

        assert_eq!(errors.field(course_fields::NAME), [Violation::Required]);
        assert_eq!(errors.field(course_fields::CATEGORY), [Violation::NotSelected]);
        assert_eq!(
            errors.field(course_fields::FILE),
            [Violation::FileCount {
                expected: 1,
                actual: 0
            }]
        );
        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            [
                course_fields::NAME,
                course_fields::OBJECTIVES,
                course_fields::ELIGIBILITY,
                course_fields::CATEGORY,
                course_fields::FILE,
            ]
        );
    }

    #[test]
    fn lengths_are_measured_on_trimmed_text() {
        let rules = DefaultRules.rules(FormKind::CourseCreate);
        let form = CourseForm {
            name: "  ab   ".into(),
            ..valid_course()
        };

        assert_eq!(
            validate_field(&form, &rules, course_fields::NAME),
            [Violation::TooShort(3)]
        );
    }

    #[test]
    fn negative_category_is_not_a_selection() {
        let rules = DefaultRules.rules(FormKind::CourseCreate);
        let form = CourseForm {
            category: Some(CategoryId(-1)),
            ..valid_course()
        };

        assert_eq!(
            validate_field(&form, &rules, course_fields::CATEGORY),
            [Violation::NotSelected]
        );
    }

    #[test]
    fn repeat_password_must_match() {
        let rules = DefaultRules.rules(FormKind::Register);
        assert_eq!(validate(&valid_registration(), &rules), Ok(()));

        let mut form = valid_registration();
        form.repeat_password.push('!');
        let errors = validate(&form, &rules).unwrap_err();
        assert_eq!(
            errors.field(register_fields::REPEAT_PASSWORD),
            [Violation::Mismatch(
                "Repeat password must match password.".into()
            )]
        );

        form.repeat_password = form.password.clone();
        assert!(validate_field(&form, &rules, register_fields::REPEAT_PASSWORD).is_empty());
    }

    #[test]
    fn email_must_look_like_an_address() {
        let rules = DefaultRules.rules(FormKind::Register);
        let form = RegistrationForm {
            email: "ivan.example.com".into(),
            ..valid_registration()
        };

        assert_eq!(
            validate_field(&form, &rules, register_fields::EMAIL),
            [Violation::InvalidEmail]
        );
    }

    #[test]
    fn unknown_field_yields_no_violations() {
        let rules = RuleSet::new().field("missing", [Rule::Required]);
        assert_eq!(validate(&valid_course(), &rules), Ok(()));
    }
}
