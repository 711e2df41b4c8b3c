//! Boolean search query types.
//!
//! Field and operator sets are closed and ordered; form selectors address
//! them by position, the wire format by display name.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Searchable book metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchField {
    #[serde(rename = "Title")]
    Title,
    #[serde(rename = "Author")]
    Author,
    #[serde(rename = "Accession Number")]
    AccessionNumber,
    #[serde(rename = "Publisher")]
    Publisher,
    #[serde(rename = "ISBN/ISSN")]
    IsbnIssn,
    #[serde(rename = "Category")]
    Category,
}

impl SearchField {
    /// All fields in selector order
    pub const ALL: [SearchField; 6] = [
        SearchField::Title,
        SearchField::Author,
        SearchField::AccessionNumber,
        SearchField::Publisher,
        SearchField::IsbnIssn,
        SearchField::Category,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::AccessionNumber => "Accession Number",
            SearchField::Publisher => "Publisher",
            SearchField::IsbnIssn => "ISBN/ISSN",
            SearchField::Category => "Category",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for SearchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for SearchField {
    type Err = String;

    /// Accepts the display label or a short keyword, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        let field = match needle.as_str() {
            "title" => SearchField::Title,
            "author" => SearchField::Author,
            "accession" | "accession number" | "accession_number" => SearchField::AccessionNumber,
            "publisher" => SearchField::Publisher,
            "isbn" | "issn" | "isbn/issn" => SearchField::IsbnIssn,
            "category" => SearchField::Category,
            _ => return Err(format!("unknown search field: {}", s)),
        };
        Ok(field)
    }
}

/// How the two conditions of a query combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BooleanOperator {
    And,
    Or,
    Not,
}

impl BooleanOperator {
    /// All operators in selector order
    pub const ALL: [BooleanOperator; 3] =
        [BooleanOperator::And, BooleanOperator::Or, BooleanOperator::Not];

    pub fn label(&self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
            BooleanOperator::Not => "NOT",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for BooleanOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BooleanOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(BooleanOperator::And),
            "OR" => Ok(BooleanOperator::Or),
            "NOT" => Ok(BooleanOperator::Not),
            _ => Err(format!("unknown operator: {}", s)),
        }
    }
}

/// One (field, expression) pair of a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCondition {
    pub field: SearchField,
    pub expression: String,
}

/// Search request payload: exactly two conditions and one operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub conditions: [SearchCondition; 2],
    pub operator: BooleanOperator,
}
