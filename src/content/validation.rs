use crate::content::{NewContactMessage, PortfolioRecord};
use crate::error::FieldError;
use regex::Regex;
use std::sync::OnceLock;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Collects field errors in the order fields are checked.
#[derive(Default)]
struct Checks {
    errors: Vec<FieldError>,
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

impl Checks {
    /// Present (non-blank). Returns whether it was.
    fn present(&mut self, field: &str, label: &str, value: &str) -> bool {
        if value.trim().is_empty() {
            self.errors
                .push(FieldError::new(field, format!("{} is required", label)));
            return false;
        }
        true
    }

    /// Present and within `min..=max` characters.
    fn between(
        &mut self,
        field: &str,
        label: &str,
        value: &str,
        min: usize,
        max: usize,
    ) -> &mut Self {
        if self.present(field, label, value) {
            let len = char_len(value);
            if len < min || len > max {
                self.errors.push(FieldError::new(
                    field,
                    format!("{} must be between {} and {} characters", label, min, max),
                ));
            }
        }
        self
    }

    /// At most `max` characters, if set.
    fn at_most(
        &mut self,
        field: &str,
        label: &str,
        value: Option<&str>,
        max: usize,
    ) -> &mut Self {
        if value.is_some_and(|v| char_len(v) > max) {
            self.errors.push(FieldError::new(
                field,
                format!("{} must not exceed {} characters", label, max),
            ));
        }
        self
    }

    /// Present and at most `max` characters.
    fn required(&mut self, field: &str, label: &str, value: &str, max: usize) -> &mut Self {
        if self.present(field, label, value) {
            self.at_most(field, label, Some(value), max);
        }
        self
    }

    fn email(&mut self, field: &str, label: &str, value: &str) -> &mut Self {
        if self.present(field, label, value) && !email_regex().is_match(value.trim()) {
            self.errors
                .push(FieldError::new(field, format!("{} should be valid", label)));
        }
        self
    }

    /// Within `0..=100`, if set.
    fn percentage(&mut self, field: &str, label: &str, value: Option<i32>) -> &mut Self {
        match value {
            Some(v) if v < 0 => self
                .errors
                .push(FieldError::new(field, format!("{} must be at least 0", label))),
            Some(v) if v > 100 => self
                .errors
                .push(FieldError::new(field, format!("{} must not exceed 100", label))),
            _ => {}
        }
        self
    }

    fn finish(&mut self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

/// Validate a contact form submission.
pub fn validate_contact_message(message: &NewContactMessage) -> Result<(), Vec<FieldError>> {
    Checks::default()
        .between("name", "Name", &message.name, 2, 100)
        .email("email", "Email", &message.email)
        .between("subject", "Subject", &message.subject, 3, 200)
        .between("message", "Message", &message.message, 10, 2000)
        .finish()
}

/// Validate a record written through the admin API.
pub fn validate_record(record: &PortfolioRecord) -> Result<(), Vec<FieldError>> {
    let mut checks = Checks::default();

    match record {
        PortfolioRecord::About(r) => checks
            .between("name", "Name", &r.name, 2, 100)
            .between("title", "Title", &r.title, 2, 150)
            .between("description", "Description", &r.description, 10, 2000)
            .email("email", "Email", &r.email)
            .at_most("phone", "Phone", r.phone.as_deref(), 20)
            .at_most("location", "Location", r.location.as_deref(), 200)
            .at_most("linkedinUrl", "LinkedIn URL", r.linkedin_url.as_deref(), 500)
            .at_most("githubUrl", "GitHub URL", r.github_url.as_deref(), 500)
            .at_most("twitterUrl", "Twitter URL", r.twitter_url.as_deref(), 500)
            .at_most("resumeUrl", "Resume URL", r.resume_url.as_deref(), 500)
            .at_most(
                "profileImageUrl",
                "Profile image URL",
                r.profile_image_url.as_deref(),
                500,
            ),
        PortfolioRecord::Project(r) => checks
            .between("title", "Title", &r.title, 2, 200)
            .between("description", "Description", &r.description, 10, 2000)
            .at_most("imageUrl", "Image URL", r.image_url.as_deref(), 500)
            .at_most("demoUrl", "Demo URL", r.demo_url.as_deref(), 500)
            .at_most("githubUrl", "GitHub URL", r.github_url.as_deref(), 500)
            .at_most("category", "Category", r.category.as_deref(), 100),
        PortfolioRecord::Skill(r) => checks
            .between("name", "Name", &r.name, 1, 100)
            .at_most("category", "Category", r.category.as_deref(), 100)
            .percentage("proficiencyLevel", "Proficiency level", r.proficiency_level)
            .at_most("iconUrl", "Icon URL", r.icon_url.as_deref(), 500),
        PortfolioRecord::Experience(r) => checks
            .between("company", "Company name", &r.company, 2, 200)
            .between("position", "Position", &r.position, 2, 200)
            .at_most("location", "Location", r.location.as_deref(), 200)
            .required("startDate", "Start date", &r.start_date, 50)
            .at_most("endDate", "End date", r.end_date.as_deref(), 50)
            .at_most("description", "Description", r.description.as_deref(), 2000),
        PortfolioRecord::Education(r) => checks
            .between("institution", "Institution name", &r.institution, 2, 200)
            .between("degree", "Degree", &r.degree, 2, 200)
            .at_most("fieldOfStudy", "Field of study", r.field_of_study.as_deref(), 200)
            .at_most("location", "Location", r.location.as_deref(), 200)
            .required("startDate", "Start date", &r.start_date, 50)
            .at_most("endDate", "End date", r.end_date.as_deref(), 50)
            .at_most("description", "Description", r.description.as_deref(), 2000)
            .at_most("grade", "Grade", r.grade.as_deref(), 20),
        PortfolioRecord::Language(r) => checks
            .between("name", "Language name", &r.name, 2, 100)
            .between("proficiency", "Proficiency", &r.proficiency, 2, 50)
            .percentage(
                "proficiencyPercentage",
                "Proficiency percentage",
                r.proficiency_percentage,
            ),
        PortfolioRecord::Interest(r) => checks
            .between("name", "Interest name", &r.name, 2, 100)
            .at_most("description", "Description", r.description.as_deref(), 500)
            .at_most("icon", "Icon", r.icon.as_deref(), 100),
    };

    checks.finish()
}
