// src/render/markup.rs
//! Escaping and shared fragments for the resume layouts

use crate::picture_path::SafePicturePath;

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub(crate) fn picture(out: &mut String, picture: Option<SafePicturePath<'_>>, class: &str) {
    if let Some(path) = picture {
        out.push_str("<div class=\"resume-photo-slot\">");
        out.push_str(&format!(
            "<img src=\"{}\" alt=\"Profile Picture\" class=\"{}\">",
            escape_html(path.as_str()),
            class
        ));
        out.push_str("</div>\n");
    }
}

/// Skills section, omitted entirely when there are no skills
pub(crate) fn skills(out: &mut String, skills: &[String], list_class: &str) {
    if skills.is_empty() {
        return;
    }

    out.push_str("<section class=\"resume-section resume-skills\">\n");
    out.push_str("<h2 class=\"resume-section-title\">Skills</h2>\n");
    out.push_str(&format!("<ul class=\"{}\">\n", list_class));
    for skill in skills {
        out.push_str(&format!("<li>{}</li>\n", escape_html(skill)));
    }
    out.push_str("</ul>\n");
    out.push_str("</section>\n");
}
