// src/normalizer.rs
//! Turns a raw form submission into a validated [`ResumeRecord`] or a set of
//! field-level error messages.

use std::collections::HashMap;
use std::fmt;
use tracing::{error, info, warn};
use validator::ValidateEmail;

use crate::core::fs_ops::ImageStore;
use crate::image_validator::ImageValidator;
use crate::types::{Education, ResumeRecord, WorkExperience};
use crate::utils::picture_extension;

/// Every key the details form submits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Address,
    EducationSchool,
    EducationDegree,
    EducationYear,
    WorkCompany,
    WorkPosition,
    WorkYears,
    Skills,
    ProfilePicture,
}

impl FormField {
    pub const TEXT_FIELDS: [FormField; 11] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Address,
        FormField::EducationSchool,
        FormField::EducationDegree,
        FormField::EducationYear,
        FormField::WorkCompany,
        FormField::WorkPosition,
        FormField::WorkYears,
        FormField::Skills,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::EducationSchool => "education_school",
            Self::EducationDegree => "education_degree",
            Self::EducationYear => "education_year",
            Self::WorkCompany => "work_company",
            Self::WorkPosition => "work_position",
            Self::WorkYears => "work_years",
            Self::Skills => "skills",
            Self::ProfilePicture => "profile_picture",
        }
    }

    /// Message shown when a required field is left empty
    fn required_message(self) -> Option<&'static str> {
        match self {
            Self::Name => Some("Name is required."),
            Self::Email => Some("Email is required."),
            Self::Phone => Some("Phone number is required."),
            Self::EducationSchool => Some("School name is required."),
            Self::EducationDegree => Some("Degree is required."),
            Self::EducationYear => Some("Graduation year is required."),
            Self::WorkCompany => Some("Company name is required."),
            Self::WorkPosition => Some("Position is required."),
            Self::WorkYears => Some("Years of experience are required."),
            Self::Address | Self::Skills | Self::ProfilePicture => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field errors in evaluation order, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(FormField, String)>,
}

impl FieldErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        if !self.contains(field) {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.errors.iter().map(|(field, _)| *field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

/// What arrived in the `profile_picture` part of the submission
#[derive(Debug, Clone, Default)]
pub enum PictureUpload {
    #[default]
    Missing,
    Received {
        file_name: Option<String>,
        bytes: Vec<u8>,
    },
    /// The transport reported a failure before the bytes could be read
    TransferFailed,
}

/// Raw submission: form key → raw value, plus the optional picture
#[derive(Debug, Clone, Default)]
pub struct RawSubmission {
    pub fields: HashMap<String, String>,
    pub picture: PictureUpload,
}

impl RawSubmission {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self {
            fields,
            picture: PictureUpload::Missing,
        }
    }

    /// Submission reproducing `record`, used to prefill the form and to
    /// re-check records loaded from disk
    pub fn from_record(record: &ResumeRecord) -> Self {
        let fields = [
            (FormField::Name, &record.name),
            (FormField::Email, &record.email),
            (FormField::Phone, &record.phone),
            (FormField::Address, &record.address),
            (FormField::EducationSchool, &record.education.school),
            (FormField::EducationDegree, &record.education.degree),
            (FormField::EducationYear, &record.education.year),
            (FormField::WorkCompany, &record.work.company),
            (FormField::WorkPosition, &record.work.position),
            (FormField::WorkYears, &record.work.years),
            (FormField::Skills, &record.skills),
        ]
        .into_iter()
        .map(|(field, value)| (field.key().to_string(), value.clone()))
        .collect();

        Self::new(fields)
    }

    pub fn with_picture(mut self, picture: PictureUpload) -> Self {
        self.picture = picture;
        self
    }

    /// Trimmed value of `field`, empty when the key was not submitted
    pub fn value(&self, field: FormField) -> String {
        self.fields
            .get(field.key())
            .map(|raw| raw.trim().to_string())
            .unwrap_or_default()
    }
}

pub struct Normalizer<'a> {
    validator: ImageValidator,
    store: &'a dyn ImageStore,
}

/// Email syntax check. The domain must contain a dot, so `a@b` is refused
/// even though it is a valid RFC 5322 address.
fn is_deliverable_email(value: &str) -> bool {
    let dotted_domain = value
        .rsplit_once('@')
        .map(|(_, domain)| {
            domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
        })
        .unwrap_or(false);

    dotted_domain && value.validate_email()
}

impl<'a> Normalizer<'a> {
    pub fn new(validator: ImageValidator, store: &'a dyn ImageStore) -> Self {
        Self { validator, store }
    }

    /// Validate `raw` and build the record. `previous_picture` is the path
    /// already held in the session; it is kept when no new file is supplied.
    /// The picture is only written to storage once every other check passed.
    pub fn normalize(
        &self,
        raw: &RawSubmission,
        previous_picture: Option<&str>,
    ) -> Result<ResumeRecord, FieldErrors> {
        let mut errors = FieldErrors::default();
        let values: HashMap<FormField, String> = FormField::TEXT_FIELDS
            .iter()
            .map(|field| (*field, raw.value(*field)))
            .collect();

        for field in FormField::TEXT_FIELDS {
            let value = &values[&field];
            if value.is_empty() {
                if let Some(message) = field.required_message() {
                    errors.insert(field, message);
                }
            } else if field == FormField::Email && !is_deliverable_email(value) {
                errors.insert(field, "Please enter a valid email address.");
            }
        }

        let accepted_picture = match &raw.picture {
            PictureUpload::Missing => None,
            PictureUpload::Received { file_name, bytes }
                if bytes.is_empty() && file_name.as_deref().unwrap_or("").is_empty() =>
            {
                None
            }
            PictureUpload::Received { file_name, bytes } => {
                match self.validator.validate_profile_image(bytes) {
                    Ok(format) => Some((picture_extension(file_name.as_deref(), format), bytes)),
                    Err(rejection) => {
                        errors.insert(FormField::ProfilePicture, rejection.message);
                        None
                    }
                }
            }
            PictureUpload::TransferFailed => {
                warn!("Profile picture transfer failed");
                errors.insert(
                    FormField::ProfilePicture,
                    "An error occurred while uploading the profile picture.",
                );
                None
            }
        };

        if !errors.is_empty() {
            info!("Submission rejected with {} field errors", errors.len());
            return Err(errors);
        }

        let profile_picture = match accepted_picture {
            Some((extension, bytes)) => match self.store.store(bytes, &extension) {
                Ok(path) => Some(path),
                Err(e) => {
                    error!("Failed to store profile picture: {}", e);
                    errors.insert(FormField::ProfilePicture, "Failed to upload profile picture.");
                    return Err(errors);
                }
            },
            None => previous_picture.map(str::to_string),
        };

        let take = |field: FormField| values[&field].clone();
        Ok(ResumeRecord {
            name: take(FormField::Name),
            email: take(FormField::Email),
            phone: take(FormField::Phone),
            address: take(FormField::Address),
            education: Education {
                school: take(FormField::EducationSchool),
                degree: take(FormField::EducationDegree),
                year: take(FormField::EducationYear),
            },
            work: WorkExperience {
                company: take(FormField::WorkCompany),
                position: take(FormField::WorkPosition),
                years: take(FormField::WorkYears),
            },
            skills: take(FormField::Skills),
            profile_picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::image_validator::png_bytes;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        stored: Mutex<Vec<String>>,
        fail: bool,
    }

    impl ImageStore for RecordingStore {
        fn store(&self, _bytes: &[u8], extension: &str) -> Result<String, StorageError> {
            if self.fail {
                return Err(StorageError {
                    path: "uploads".into(),
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            let path = format!("uploads/profile_1_deadbeef.{}", extension);
            self.stored.lock().unwrap().push(path.clone());
            Ok(path)
        }
    }

    fn valid_fields() -> HashMap<String, String> {
        [
            ("name", "  Ada Lovelace "),
            ("email", "ada@example.com"),
            ("phone", "0123"),
            ("address", ""),
            ("education_school", "University of London"),
            ("education_degree", "Mathematics"),
            ("education_year", "1835"),
            ("work_company", "Analytical Engine <Ltd>"),
            ("work_position", "Programmer & Poet"),
            ("work_years", "2"),
            ("skills", "PHP, , JavaScript ,MySQL"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn normalize(raw: &RawSubmission, store: &RecordingStore) -> Result<ResumeRecord, FieldErrors> {
        Normalizer::new(ImageValidator::default(), store).normalize(raw, None)
    }

    #[test]
    fn test_valid_submission_keeps_trimmed_text() {
        let store = RecordingStore::default();
        let record = normalize(&RawSubmission::new(valid_fields()), &store).unwrap();

        assert_eq!(record.name, "Ada Lovelace");
        assert_eq!(record.work.company, "Analytical Engine <Ltd>");
        assert_eq!(record.work.position, "Programmer & Poet");
        assert_eq!(record.address, "");
        assert_eq!(record.skills_list(), vec!["PHP", "JavaScript", "MySQL"]);
        assert_eq!(record.profile_picture, None);
    }

    #[test]
    fn test_empty_required_fields_are_reported_exactly() {
        let mut fields = valid_fields();
        fields.insert("name".to_string(), "   ".to_string());
        fields.insert("education_year".to_string(), String::new());
        fields.remove("work_position");

        let store = RecordingStore::default();
        let errors = normalize(&RawSubmission::new(fields), &store).unwrap_err();

        assert_eq!(
            errors.fields(),
            vec![
                FormField::Name,
                FormField::EducationYear,
                FormField::WorkPosition
            ]
        );
        assert_eq!(errors.get(FormField::Name), Some("Name is required."));
    }

    #[test]
    fn test_everything_missing() {
        let store = RecordingStore::default();
        let errors = normalize(&RawSubmission::default(), &store).unwrap_err();
        assert_eq!(errors.len(), 9);
        assert!(!errors.contains(FormField::Address));
        assert!(!errors.contains(FormField::Skills));
        assert_eq!(errors.get(FormField::Email), Some("Email is required."));
    }

    #[test]
    fn test_email_syntax() {
        let store = RecordingStore::default();

        let mut fields = valid_fields();
        fields.insert("email".to_string(), "not-an-email".to_string());
        let errors = normalize(&RawSubmission::new(fields), &store).unwrap_err();
        assert_eq!(
            errors.get(FormField::Email),
            Some("Please enter a valid email address.")
        );
        assert_eq!(errors.len(), 1);

        let mut fields = valid_fields();
        fields.insert("email".to_string(), " a@b.co ".to_string());
        let record = normalize(&RawSubmission::new(fields), &store).unwrap();
        assert_eq!(record.email, "a@b.co");
    }

    #[test]
    fn test_email_needs_dotted_domain() {
        let store = RecordingStore::default();

        for email in ["a@b", "a@localhost", "a@.co", "a@b.", "a@b..co"] {
            let mut fields = valid_fields();
            fields.insert("email".to_string(), email.to_string());
            let errors = normalize(&RawSubmission::new(fields), &store).unwrap_err();
            assert_eq!(
                errors.get(FormField::Email),
                Some("Please enter a valid email address."),
                "{email}"
            );
        }

        let mut fields = valid_fields();
        fields.insert("email".to_string(), "ada@mail.example.co.uk".to_string());
        assert!(normalize(&RawSubmission::new(fields), &store).is_ok());
    }

    #[test]
    fn test_picture_is_stored_with_client_extension() {
        let store = RecordingStore::default();
        let raw = RawSubmission::new(valid_fields()).with_picture(PictureUpload::Received {
            file_name: Some("../../me.PNG".to_string()),
            bytes: png_bytes(64),
        });

        let record = normalize(&raw, &store).unwrap();
        assert_eq!(
            record.profile_picture.as_deref(),
            Some("uploads/profile_1_deadbeef.png")
        );
        assert_eq!(store.stored.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_picture_content_is_checked_not_extension() {
        let store = RecordingStore::default();
        let raw = RawSubmission::new(valid_fields()).with_picture(PictureUpload::Received {
            file_name: Some("avatar.png".to_string()),
            bytes: b"<?php system($_GET['c']); ?>".to_vec(),
        });

        let errors = normalize(&raw, &store).unwrap_err();
        assert_eq!(
            errors.get(FormField::ProfilePicture),
            Some("Only JPG, PNG, and GIF images are allowed.")
        );
        assert!(store.stored.lock().unwrap().is_empty());
    }

    #[test]
    fn test_picture_not_stored_when_other_fields_fail() {
        let store = RecordingStore::default();
        let mut fields = valid_fields();
        fields.remove("phone");
        let raw = RawSubmission::new(fields).with_picture(PictureUpload::Received {
            file_name: Some("me.png".to_string()),
            bytes: png_bytes(64),
        });

        let errors = normalize(&raw, &store).unwrap_err();
        assert_eq!(errors.fields(), vec![FormField::Phone]);
        assert!(store.stored.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_picture_keeps_previous_path() {
        let store = RecordingStore::default();
        let raw = RawSubmission::new(valid_fields()).with_picture(PictureUpload::Received {
            file_name: Some(String::new()),
            bytes: Vec::new(),
        });

        let record = Normalizer::new(ImageValidator::default(), &store)
            .normalize(&raw, Some("uploads/previous.jpg"))
            .unwrap();
        assert_eq!(record.profile_picture.as_deref(), Some("uploads/previous.jpg"));
    }

    #[test]
    fn test_transfer_failure_is_a_field_error() {
        let store = RecordingStore::default();
        let raw = RawSubmission::new(valid_fields()).with_picture(PictureUpload::TransferFailed);

        let errors = normalize(&raw, &store).unwrap_err();
        assert_eq!(
            errors.get(FormField::ProfilePicture),
            Some("An error occurred while uploading the profile picture.")
        );
    }

    #[test]
    fn test_storage_failure_is_a_field_error() {
        let store = RecordingStore {
            fail: true,
            ..Default::default()
        };
        let raw = RawSubmission::new(valid_fields()).with_picture(PictureUpload::Received {
            file_name: Some("me.png".to_string()),
            bytes: png_bytes(64),
        });

        let errors = normalize(&raw, &store).unwrap_err();
        assert_eq!(
            errors.get(FormField::ProfilePicture),
            Some("Failed to upload profile picture.")
        );
    }

    #[test]
    fn test_record_round_trips_through_submission() {
        let store = RecordingStore::default();
        let record = crate::types::resume::sample_record();
        let raw = RawSubmission::from_record(&record);
        assert_eq!(raw.fields.len(), FormField::TEXT_FIELDS.len());

        let normalized = Normalizer::new(ImageValidator::default(), &store)
            .normalize(&raw, record.profile_picture.as_deref())
            .unwrap();
        assert_eq!(normalized, record);
        assert!(store.stored.lock().unwrap().is_empty());
    }
}
