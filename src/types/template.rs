// src/types/template.rs
use serde::{Deserialize, Serialize};

/// Visual layout of the rendered resume. Wire ids are 1 (Classic) and 2 (Modern).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateSelector {
    #[default]
    Classic,
    Modern,
}

impl TemplateSelector {
    pub const ALL: [TemplateSelector; 2] = [TemplateSelector::Classic, TemplateSelector::Modern];

    pub fn id(self) -> u8 {
        match self {
            Self::Classic => 1,
            Self::Modern => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Classic),
            2 => Some(Self::Modern),
            _ => None,
        }
    }

    /// Parse a user supplied selector, e.g. a query parameter. Anything that is
    /// not a known id yields `None`; callers decide on the fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u8>().ok().and_then(Self::from_id)
    }

    /// Lenient form used by the web flow: invalid or missing means Classic
    pub fn from_query(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or_default()
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Modern => "Modern",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Classic => "A clean, classic layout with clear headings and left-aligned details.",
            Self::Modern => "A modern layout with colored header and stronger visual hierarchy.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids() {
        assert_eq!(TemplateSelector::Classic.id(), 1);
        assert_eq!(TemplateSelector::Modern.id(), 2);
        assert_eq!(TemplateSelector::from_id(2), Some(TemplateSelector::Modern));
        assert_eq!(TemplateSelector::from_id(0), None);
        assert_eq!(TemplateSelector::from_id(3), None);
    }

    #[test]
    fn test_from_query_defaults_to_classic() {
        assert_eq!(TemplateSelector::from_query(None), TemplateSelector::Classic);
        assert_eq!(TemplateSelector::from_query(Some("7")), TemplateSelector::Classic);
        assert_eq!(TemplateSelector::from_query(Some("abc")), TemplateSelector::Classic);
        assert_eq!(TemplateSelector::from_query(Some(" 2 ")), TemplateSelector::Modern);
    }
}
