pub mod resume;
pub mod template;

pub use resume::{split_skills, Education, ResumeRecord, WorkExperience};
pub use template::TemplateSelector;
