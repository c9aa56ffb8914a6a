use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorter {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl Sorter {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            order: SortOrder::Desc,
        }
    }

    /// Parse `field:asc,other:desc`; a missing order means ascending
    pub fn parse_list(raw: &str) -> Vec<Sorter> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| match part.rsplit_once(':') {
                Some((field, order)) if order.eq_ignore_ascii_case("desc") => Sorter::desc(field),
                Some((field, order)) if order.eq_ignore_ascii_case("asc") => Sorter::asc(field),
                _ => Sorter::asc(part),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(
            Sorter::parse_list("createdAt:desc, title ,done:ASC"),
            vec![
                Sorter::desc("createdAt"),
                Sorter::asc("title"),
                Sorter::asc("done")
            ]
        );
        assert!(Sorter::parse_list(" , ").is_empty());
    }
}
