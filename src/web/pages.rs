// src/web/pages.rs
//! Server-rendered pages of the three-step flow

use std::collections::HashMap;

use crate::image_validator::format_megabytes;
use crate::normalizer::{FieldErrors, FormField};
use crate::render::{escape_html, RESUME_STYLESHEET};
use crate::types::TemplateSelector;

const PAGE_STYLESHEET: &str = r#"
body { margin: 0; background: #f5f5f5; font-family: helvetica, arial, sans-serif; color: #222222; }
.navbar { background: #222222; color: #ffffff; padding: 12px 24px; }
.navbar a { color: #ffffff; text-decoration: none; font-weight: bold; }
.container { max-width: 960px; margin: 24px auto; padding: 0 16px; }
.card { background: #ffffff; border: 1px solid #dddddd; border-radius: 6px; padding: 24px; margin-bottom: 24px; }
.muted { color: #666666; }
.alert { background: #fde8e8; border: 1px solid #f5b5b5; color: #8a1f1f; padding: 12px 16px; border-radius: 6px; margin-bottom: 16px; }
.field { margin-bottom: 12px; }
.field label { display: block; font-weight: bold; margin-bottom: 4px; }
.field input, .field textarea { width: 100%; box-sizing: border-box; padding: 6px 8px; border: 1px solid #cccccc; border-radius: 4px; }
.field .invalid { border-color: #c0392b; }
.hint { font-size: 0.85em; color: #666666; }
.actions { display: flex; justify-content: space-between; gap: 8px; margin-top: 16px; }
.button { display: inline-block; padding: 8px 14px; border-radius: 4px; border: 1px solid #333333; background: #ffffff; color: #222222; text-decoration: none; cursor: pointer; }
.button.primary { background: #1f5fbf; border-color: #1f5fbf; color: #ffffff; }
.template-choice { display: flex; gap: 16px; }
.template-choice .card { flex: 1; }
.template-choice .selected { border-color: #1f5fbf; }
"#;

fn layout(title: &str, body: &str) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"UTF-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str(&format!(
        "<title>Resume Builder - {}</title>\n",
        escape_html(title)
    ));
    out.push_str("<style>");
    out.push_str(PAGE_STYLESHEET);
    out.push_str(RESUME_STYLESHEET);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<nav class=\"navbar\"><a href=\"/\">Resume Builder</a></nav>\n");
    out.push_str("<div class=\"container\">\n");
    out.push_str(body);
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

struct InputSpec {
    field: FormField,
    label: &'static str,
    input_type: &'static str,
    required: bool,
}

const PERSONAL_INPUTS: [InputSpec; 4] = [
    InputSpec { field: FormField::Name, label: "Full Name", input_type: "text", required: true },
    InputSpec { field: FormField::Email, label: "Email", input_type: "email", required: true },
    InputSpec { field: FormField::Phone, label: "Phone", input_type: "text", required: true },
    InputSpec { field: FormField::Address, label: "Address", input_type: "text", required: false },
];

const EDUCATION_INPUTS: [InputSpec; 3] = [
    InputSpec { field: FormField::EducationSchool, label: "School / University", input_type: "text", required: true },
    InputSpec { field: FormField::EducationDegree, label: "Degree", input_type: "text", required: true },
    InputSpec { field: FormField::EducationYear, label: "Graduation Year", input_type: "text", required: true },
];

const WORK_INPUTS: [InputSpec; 3] = [
    InputSpec { field: FormField::WorkCompany, label: "Company", input_type: "text", required: true },
    InputSpec { field: FormField::WorkPosition, label: "Position", input_type: "text", required: true },
    InputSpec { field: FormField::WorkYears, label: "Years of Experience", input_type: "text", required: true },
];

fn input(out: &mut String, spec: &InputSpec, values: &HashMap<String, String>, errors: &FieldErrors) {
    let key = spec.field.key();
    let value = values.get(key).map(String::as_str).unwrap_or("");
    out.push_str("<div class=\"field\">\n");
    out.push_str(&format!(
        "<label for=\"{}\">{}{}</label>\n",
        key,
        spec.label,
        if spec.required { " *" } else { "" }
    ));
    out.push_str(&format!(
        "<input type=\"{}\" id=\"{}\" name=\"{}\" value=\"{}\"{}{}>\n",
        spec.input_type,
        key,
        key,
        escape_html(value),
        if errors.contains(spec.field) { " class=\"invalid\"" } else { "" },
        if spec.required { " required" } else { "" }
    ));
    out.push_str("</div>\n");
}

/// Details form, prefilled with `values` (form key → text)
pub fn details_page(
    values: &HashMap<String, String>,
    errors: &FieldErrors,
    current_picture: Option<&str>,
    max_picture_bytes: u64,
) -> String {
    let mut body = String::new();
    body.push_str("<h1>Create Your Resume</h1>\n");
    body.push_str("<p class=\"muted\">Fill in your details below. You can preview and download your resume as a PDF in the next steps.</p>\n");

    if !errors.is_empty() {
        body.push_str("<div class=\"alert\">\n<strong>There were some problems with your input:</strong>\n<ul class=\"form-errors\">\n");
        for (_, message) in errors.iter() {
            body.push_str(&format!("<li>{}</li>\n", escape_html(message)));
        }
        body.push_str("</ul>\n</div>\n");
    }

    body.push_str("<form action=\"/\" method=\"post\" enctype=\"multipart/form-data\" class=\"card\">\n");

    body.push_str("<h2>Personal Information</h2>\n");
    for spec in &PERSONAL_INPUTS {
        input(&mut body, spec, values, errors);
    }

    body.push_str("<div class=\"field\">\n");
    body.push_str("<label for=\"profile_picture\">Profile Picture (Optional)</label>\n");
    body.push_str(&format!(
        "<input type=\"file\" id=\"profile_picture\" name=\"profile_picture\" accept=\"image/jpeg,image/png,image/gif\"{}>\n",
        if errors.contains(FormField::ProfilePicture) { " class=\"invalid\"" } else { "" }
    ));
    body.push_str(&format!(
        "<div class=\"hint\">Maximum size: {} MB. Allowed types: JPG, PNG, GIF.{}</div>\n",
        format_megabytes(max_picture_bytes),
        if current_picture.is_some() { " Leave empty to keep the current picture." } else { "" }
    ));
    body.push_str("</div>\n");

    body.push_str("<h2>Education</h2>\n");
    for spec in &EDUCATION_INPUTS {
        input(&mut body, spec, values, errors);
    }

    body.push_str("<h2>Work Experience</h2>\n");
    for spec in &WORK_INPUTS {
        input(&mut body, spec, values, errors);
    }

    let skills = values
        .get(FormField::Skills.key())
        .map(String::as_str)
        .unwrap_or("");
    body.push_str("<h2>Skills</h2>\n<div class=\"field\">\n");
    body.push_str("<label for=\"skills\">Skills</label>\n");
    body.push_str(&format!(
        "<textarea id=\"skills\" name=\"skills\" rows=\"3\">{}</textarea>\n",
        escape_html(skills)
    ));
    body.push_str("<div class=\"hint\">Separate skills with commas, e.g. PHP, JavaScript, MySQL</div>\n");
    body.push_str("</div>\n");

    body.push_str("<div class=\"actions\"><span></span><button type=\"submit\" class=\"button primary\">Continue to Template Selection</button></div>\n");
    body.push_str("</form>\n");

    layout("Home", &body)
}

pub fn template_page(current: TemplateSelector) -> String {
    let mut body = String::new();
    body.push_str("<h1>Choose a Resume Template</h1>\n");
    body.push_str("<p class=\"muted\">Select one of the templates below, then preview and download your resume as a PDF.</p>\n");
    body.push_str("<form action=\"/template\" method=\"post\">\n<div class=\"template-choice\">\n");

    for selector in TemplateSelector::ALL {
        let selected = selector == current;
        body.push_str(&format!(
            "<div class=\"card{}\">\n",
            if selected { " selected" } else { "" }
        ));
        body.push_str(&format!(
            "<h2>Template {} - {}</h2>\n",
            selector.id(),
            selector.name()
        ));
        body.push_str(&format!("<p class=\"muted\">{}</p>\n", selector.description()));
        body.push_str(&format!(
            "<label><input type=\"radio\" name=\"template\" value=\"{}\"{}> Use Template {}</label>\n",
            selector.id(),
            if selected { " checked" } else { "" },
            selector.id()
        ));
        body.push_str("</div>\n");
    }

    body.push_str("</div>\n<div class=\"actions\">\n");
    body.push_str("<a href=\"/\" class=\"button\">Back to Edit Details</a>\n");
    body.push_str("<button type=\"submit\" class=\"button primary\">Continue to Live Preview</button>\n");
    body.push_str("</div>\n</form>\n");

    layout("Choose Template", &body)
}

/// Preview page around an already rendered resume fragment
pub fn preview_page(resume_markup: &str, selector: TemplateSelector) -> String {
    let mut body = String::new();
    body.push_str("<h1>Live Resume Preview</h1>\n");
    body.push_str("<p class=\"muted\">This is how your resume will look. You can go back to edit your details or change the template.</p>\n");
    body.push_str("<div class=\"actions\">\n<div>\n");
    body.push_str("<a href=\"/\" class=\"button\">Edit Details</a>\n");
    body.push_str("<a href=\"/template\" class=\"button\">Change Template</a>\n");
    body.push_str("</div>\n");
    body.push_str(&format!(
        "<a href=\"/generate?template={}\" class=\"button primary\">Download as PDF</a>\n",
        selector.id()
    ));
    body.push_str("</div>\n");
    body.push_str("<div class=\"card\">\n");
    body.push_str(resume_markup);
    body.push_str("</div>\n");

    layout("Preview", &body)
}

pub fn error_page(status: u16, message: &str) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>Error {}</h1>\n", status));
    body.push_str(&format!(
        "<div class=\"alert\">{}</div>\n",
        escape_html(message)
    ));
    body.push_str("<p><a href=\"/\" class=\"button\">Back to the start</a></p>\n");

    layout("Error", &body)
}
