// src/types/resume.rs
//! Resume record held in the session between the form, preview and export steps

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub education: Education,
    pub work: WorkExperience,
    /// Free text, comma separated. Use [`ResumeRecord::skills_list`] to read it.
    #[serde(default)]
    pub skills: String,
    /// Relative path under the uploads root, always generated server side.
    #[serde(default)]
    pub profile_picture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub years: String,
}

impl ResumeRecord {
    /// Skills split on commas, trimmed, empty entries dropped
    pub fn skills_list(&self) -> Vec<String> {
        split_skills(&self.skills)
    }

    pub fn has_address(&self) -> bool {
        !self.address.is_empty()
    }
}

pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) fn sample_record() -> ResumeRecord {
    ResumeRecord {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+44 20 7946 0000".to_string(),
        address: "12 St James's Square, London".to_string(),
        education: Education {
            school: "University of London".to_string(),
            degree: "Mathematics".to_string(),
            year: "1835".to_string(),
        },
        work: WorkExperience {
            company: "Analytical Engine Ltd".to_string(),
            position: "Programmer".to_string(),
            years: "1842-1843".to_string(),
        },
        skills: "Mathematics, Algorithms, Poetry".to_string(),
        profile_picture: None,
    }
}
