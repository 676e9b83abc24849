//! Schema-driven form state.
//!
//! Create/edit dialogs for services, events and clients share one reducer.
//! Each form is described by a [`FormSchema`]; conditional fields carry a
//! [`Visibility`] rule instead of ad-hoc booleans, and hidden fields are neither
//! validated nor submitted.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{debug, info};

use super::date_utils::parse_iso_date;
use super::time_slots::TimeSlot;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Number,
    Date,
    Time,
    Select(Vec<String>),
    Checkbox,
}

/// When a field is part of the form
#[derive(Debug, Clone, PartialEq)]
pub enum Visibility {
    Always,
    /// Shown only while another field holds one of the listed values
    WhenOneOf { field: String, values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub max_length: Option<usize>,
    pub default_value: String,
    pub visibility: Visibility,
}

impl FieldSchema {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            max_length: None,
            default_value: String::new(),
            visibility: Visibility::Always,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = value.to_string();
        self
    }

    pub fn visible_when(mut self, field: &str, values: &[&str]) -> Self {
        self.visibility = Visibility::WhenOneOf {
            field: field.to_string(),
            values: values.iter().map(|v| v.to_string()).collect(),
        };
        self
    }

    fn validate(&self, raw: &str) -> Result<(), FieldError> {
        let value = raw.trim();
        if value.is_empty() {
            return if self.required { Err(FieldError::Required) } else { Ok(()) };
        }

        if let Some(max) = self.max_length {
            let len = value.chars().count();
            if len > max {
                return Err(FieldError::TooLong { max, actual: len });
            }
        }

        match &self.kind {
            FieldKind::Text | FieldKind::TextArea => Ok(()),
            FieldKind::Email => is_valid_email(value).then_some(()).ok_or(FieldError::InvalidEmail),
            FieldKind::Number => value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .map(|_| ())
                .ok_or(FieldError::InvalidNumber),
            FieldKind::Date => parse_iso_date(value).map(|_| ()).ok_or(FieldError::InvalidDate),
            FieldKind::Time => TimeSlot::parse(value).map(|_| ()).map_err(|_| FieldError::InvalidTime),
            FieldKind::Select(options) => {
                if options.iter().any(|option| option == value) {
                    Ok(())
                } else {
                    Err(FieldError::NotAnOption(value.to_string()))
                }
            }
            FieldKind::Checkbox => match value {
                "true" | "false" => Ok(()),
                _ => Err(FieldError::NotAnOption(value.to_string())),
            },
        }
    }
}

/// Minimal shape check: one `@` with a non-empty local part and a dotted domain
pub fn is_valid_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("This field is required")]
    Required,
    #[error("Must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
    #[error("Enter a valid e-mail address")]
    InvalidEmail,
    #[error("Enter a valid non-negative number")]
    InvalidNumber,
    #[error("Enter a date as YYYY-MM-DD")]
    InvalidDate,
    #[error("Pick a half-hour time between 07:00 and 06:00")]
    InvalidTime,
    #[error("'{0}' is not one of the offered options")]
    NotAnOption(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Form '{form}' has no field named '{field}'")]
    UnknownField { form: String, field: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn new(name: &str, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn is_visible(&self, field: &FieldSchema, values: &BTreeMap<String, String>) -> bool {
        match &field.visibility {
            Visibility::Always => true,
            Visibility::WhenOneOf { field: other, values: allowed } => values
                .get(other)
                .map(|current| allowed.iter().any(|value| value == current.trim()))
                .unwrap_or(false),
        }
    }
}

/// User input driving a form
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    Set { field: String, value: String },
    Clear(String),
    Reset,
    Submit,
}

impl FormAction {
    pub fn set(field: &str, value: &str) -> Self {
        FormAction::Set {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Trimmed values of the fields that were visible at submit time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSubmission {
    pub values: BTreeMap<String, String>,
}

impl FormSubmission {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Value of a field, `None` when it is missing or blank
    pub fn non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|value| !value.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormOutcome {
    Updated,
    Invalid(BTreeMap<String, FieldError>),
    Submitted(FormSubmission),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: BTreeMap<String, String>,
    errors: BTreeMap<String, FieldError>,
}

impl FormState {
    pub fn new(schema: &FormSchema) -> Self {
        Self {
            values: schema
                .fields
                .iter()
                .map(|field| (field.name.clone(), field.default_value.clone()))
                .collect(),
            errors: BTreeMap::new(),
        }
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &BTreeMap<String, FieldError> {
        &self.errors
    }

    /// Names of the fields the form currently shows, in schema order
    pub fn visible_fields<'s>(&self, schema: &'s FormSchema) -> Vec<&'s FieldSchema> {
        schema
            .fields
            .iter()
            .filter(|field| schema.is_visible(field, &self.values))
            .collect()
    }

    pub fn apply(&mut self, schema: &FormSchema, action: FormAction) -> Result<FormOutcome, FormError> {
        match action {
            FormAction::Set { field, value } => {
                ensure_field(schema, &field)?;
                self.errors.remove(&field);
                self.values.insert(field, value);
                Ok(FormOutcome::Updated)
            }
            FormAction::Clear(field) => {
                ensure_field(schema, &field)?;
                self.errors.remove(&field);
                self.values.insert(field, String::new());
                Ok(FormOutcome::Updated)
            }
            FormAction::Reset => {
                *self = FormState::new(schema);
                debug!("Reset form '{}'", schema.name);
                Ok(FormOutcome::Updated)
            }
            FormAction::Submit => Ok(self.submit(schema)),
        }
    }

    fn submit(&mut self, schema: &FormSchema) -> FormOutcome {
        let visible = self.visible_fields(schema);

        let errors: BTreeMap<String, FieldError> = visible
            .iter()
            .filter_map(|field| {
                let raw = self.values.get(&field.name).map(String::as_str).unwrap_or("");
                field.validate(raw).err().map(|error| (field.name.clone(), error))
            })
            .collect();

        if !errors.is_empty() {
            info!("Form '{}' rejected with {} error(s)", schema.name, errors.len());
            self.errors = errors.clone();
            return FormOutcome::Invalid(errors);
        }

        let values = visible
            .iter()
            .map(|field| {
                let value = self.values.get(&field.name).map(|v| v.trim().to_string()).unwrap_or_default();
                (field.name.clone(), value)
            })
            .collect();

        self.errors.clear();
        info!("Form '{}' submitted", schema.name);
        FormOutcome::Submitted(FormSubmission { values })
    }
}

fn ensure_field(schema: &FormSchema, field: &str) -> Result<(), FormError> {
    match schema.field(field) {
        Some(_) => Ok(()),
        None => Err(FormError::UnknownField {
            form: schema.name.clone(),
            field: field.to_string(),
        }),
    }
}

const CHANNELS: [&str; 3] = ["online", "offline", "hybrid"];

/// Event create/edit dialog. Platform and link apply to online and hybrid
/// events, the venue to offline and hybrid ones.
pub fn event_form_schema() -> FormSchema {
    FormSchema::new(
        "event",
        vec![
            FieldSchema::new("title", "Event title", FieldKind::Text).required().max_length(120),
            FieldSchema::new("description", "Description", FieldKind::TextArea).max_length(2000),
            FieldSchema::new(
                "channel",
                "Channel",
                FieldKind::Select(CHANNELS.iter().map(|c| c.to_string()).collect()),
            )
            .required()
            .default_value("online"),
            FieldSchema::new(
                "platform",
                "Platform",
                FieldKind::Select(
                    ["zoom", "google-meet", "teams", "other"].iter().map(|p| p.to_string()).collect(),
                ),
            )
            .required()
            .visible_when("channel", &["online", "hybrid"]),
            FieldSchema::new("meeting_link", "Meeting link", FieldKind::Text)
                .max_length(500)
                .visible_when("channel", &["online", "hybrid"]),
            FieldSchema::new("location", "Location", FieldKind::Text)
                .required()
                .max_length(250)
                .visible_when("channel", &["offline", "hybrid"]),
            FieldSchema::new("date", "Date", FieldKind::Date).required(),
            FieldSchema::new("time", "Start time", FieldKind::Time).required(),
            FieldSchema::new("capacity", "Capacity", FieldKind::Number).required().default_value("10"),
        ],
    )
}

/// Service create/edit dialog
pub fn service_form_schema() -> FormSchema {
    FormSchema::new(
        "service",
        vec![
            FieldSchema::new("title", "Service name", FieldKind::Text).required().max_length(120),
            FieldSchema::new("description", "Description", FieldKind::TextArea).max_length(2000),
            FieldSchema::new("price", "Price", FieldKind::Number).required(),
            FieldSchema::new("duration", "Duration (minutes)", FieldKind::Number).required().default_value("60"),
            FieldSchema::new(
                "channel",
                "Channel",
                FieldKind::Select(CHANNELS.iter().map(|c| c.to_string()).collect()),
            )
            .required()
            .default_value("online"),
            FieldSchema::new("location", "Location", FieldKind::Text)
                .required()
                .visible_when("channel", &["offline", "hybrid"]),
            FieldSchema::new("is_active", "Active", FieldKind::Checkbox).default_value("true"),
        ],
    )
}

/// Client record dialog
pub fn client_form_schema() -> FormSchema {
    FormSchema::new(
        "client",
        vec![
            FieldSchema::new("name", "Full name", FieldKind::Text).required().max_length(120),
            FieldSchema::new("email", "E-mail", FieldKind::Email).required(),
            FieldSchema::new("phone", "Phone", FieldKind::Text).max_length(32),
            FieldSchema::new("notes", "Notes", FieldKind::TextArea).max_length(2000),
        ],
    )
}
