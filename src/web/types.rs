// src/web/types.rs

use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::{ContentType, Status};
use rocket::response::content::RawHtml;
use rocket::response::status::Custom;
use rocket::response::{self, Redirect, Responder};
use rocket::serde::Serialize;
use rocket::{Request, Response};
use std::collections::HashMap;
use tracing::{error, info};

use crate::error::FlowError;
use crate::normalizer::FormField;
use crate::types::TemplateSelector;
use crate::web::pages;

/// Details step submission. Every text field defaults to empty so that a
/// missing key is reported by the normalizer, not by the form guard.
#[derive(FromForm)]
pub struct DetailsForm<'f> {
    #[field(default = String::new())]
    pub name: String,
    #[field(default = String::new())]
    pub email: String,
    #[field(default = String::new())]
    pub phone: String,
    #[field(default = String::new())]
    pub address: String,
    #[field(default = String::new())]
    pub education_school: String,
    #[field(default = String::new())]
    pub education_degree: String,
    #[field(default = String::new())]
    pub education_year: String,
    #[field(default = String::new())]
    pub work_company: String,
    #[field(default = String::new())]
    pub work_position: String,
    #[field(default = String::new())]
    pub work_years: String,
    #[field(default = String::new())]
    pub skills: String,
    pub profile_picture: Option<TempFile<'f>>,
}

impl DetailsForm<'_> {
    /// Text fields keyed by their form name
    pub fn text_fields(&self) -> HashMap<String, String> {
        FormField::TEXT_FIELDS
            .iter()
            .map(|field| (field.key().to_string(), self.text(*field).to_string()))
            .collect()
    }

    fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::Address => &self.address,
            FormField::EducationSchool => &self.education_school,
            FormField::EducationDegree => &self.education_degree,
            FormField::EducationYear => &self.education_year,
            FormField::WorkCompany => &self.work_company,
            FormField::WorkPosition => &self.work_position,
            FormField::WorkYears => &self.work_years,
            FormField::Skills => &self.skills,
            FormField::ProfilePicture => "",
        }
    }
}

#[derive(FromForm)]
pub struct TemplateForm {
    pub template: Option<String>,
}

pub struct PdfResponse {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

impl PdfResponse {
    pub fn with_filename(data: Vec<u8>, filename: String) -> Self {
        Self {
            data,
            filename: Some(filename),
        }
    }
}

impl<'r> Responder<'r, 'static> for PdfResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let mut binding = Response::build();
        let mut response = binding
            .header(ContentType::PDF)
            .sized_body(self.data.len(), std::io::Cursor::new(self.data));

        if let Some(filename) = self.filename {
            response = response.raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", filename),
            );
        }

        response.ok()
    }
}

/// Outcome of the details step
#[derive(rocket::Responder)]
pub enum SubmitResponse {
    Accepted(Redirect),
    #[response(status = 422)]
    Rejected(RawHtml<String>),
}

/// A flow step that could not complete. Missing session state sends the
/// visitor back to the details form, everything else gets an error page.
#[derive(Debug)]
pub struct FlowFailure(pub FlowError);

impl From<FlowError> for FlowFailure {
    fn from(e: FlowError) -> Self {
        Self(e)
    }
}

impl FlowFailure {
    pub fn status(&self) -> Status {
        match self.0 {
            FlowError::StateMissing => Status::SeeOther,
            FlowError::Conversion(_) => Status::BadGateway,
            FlowError::Render(_) | FlowError::Session(_) => Status::InternalServerError,
        }
    }

    fn public_message(&self) -> &'static str {
        match self.0 {
            FlowError::Conversion(_) => {
                "The PDF could not be generated. Please try again later."
            }
            _ => "Your resume could not be displayed.",
        }
    }
}

impl<'r> Responder<'r, 'static> for FlowFailure {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        if let FlowError::StateMissing = self.0 {
            info!("No resume data in session, redirecting to details form");
            return Redirect::to("/").respond_to(request);
        }

        let status = self.status();
        error!("{} failed [{}]: {}", request.uri(), self.0.code(), self.0);
        Custom(
            status,
            RawHtml(pages::error_page(status.code, self.public_message())),
        )
        .respond_to(request)
    }
}

pub struct ServerConfig {
    pub max_picture_bytes: u64,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TemplateInfo {
    pub id: u8,
    pub name: String,
    pub description: String,
}

impl From<TemplateSelector> for TemplateInfo {
    fn from(selector: TemplateSelector) -> Self {
        Self {
            id: selector.id(),
            name: selector.name().to_string(),
            description: selector.description().to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}
