// src/render/classic.rs
//! Single-column layout: header, Education, Work Experience, Skills

use super::markup::{self, escape_html};
use crate::picture_path::SafePicturePath;
use crate::types::ResumeRecord;

pub fn render(record: &ResumeRecord, picture: Option<SafePicturePath<'_>>) -> String {
    let mut out = String::new();

    out.push_str("<div class=\"resume-template resume-template-1\">\n");

    // Header
    out.push_str("<header class=\"resume-header\">\n");
    out.push_str("<div class=\"resume-identity\">\n");
    out.push_str(&format!(
        "<h1 class=\"resume-name\">{}</h1>\n",
        escape_html(&record.name)
    ));
    let mut contact = format!(
        "{} | {}",
        escape_html(&record.email),
        escape_html(&record.phone)
    );
    if record.has_address() {
        contact.push_str(&format!(" | {}", escape_html(&record.address)));
    }
    out.push_str(&format!("<p class=\"resume-contact\">{}</p>\n", contact));
    out.push_str("</div>\n");
    markup::picture(&mut out, picture, "resume-photo");
    out.push_str("</header>\n");
    out.push_str("<hr>\n");

    out.push_str("<section class=\"resume-section resume-education\">\n");
    out.push_str("<h2 class=\"resume-section-title\">Education</h2>\n");
    out.push_str(&format!(
        "<p><strong>{}</strong></p>\n",
        escape_html(&record.education.degree)
    ));
    out.push_str(&format!("<p>{}</p>\n", escape_html(&record.education.school)));
    out.push_str(&format!(
        "<p class=\"resume-muted\">{}</p>\n",
        escape_html(&record.education.year)
    ));
    out.push_str("</section>\n");

    out.push_str("<section class=\"resume-section resume-work\">\n");
    out.push_str("<h2 class=\"resume-section-title\">Work Experience</h2>\n");
    out.push_str(&format!(
        "<p><strong>{}</strong> - {}</p>\n",
        escape_html(&record.work.position),
        escape_html(&record.work.company)
    ));
    out.push_str(&format!(
        "<p class=\"resume-muted\">{}</p>\n",
        escape_html(&record.work.years)
    ));
    out.push_str("</section>\n");

    markup::skills(&mut out, &record.skills_list(), "resume-skills-list");

    out.push_str("</div>\n");
    out
}
