use super::ids::StudentId;
use phf::{Map, phf_map};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[serde(rename = "O")]
    Other,
}

static GENDER_TOKENS: Map<&'static str, Gender> = phf_map! {
    "M" => Gender::Male,
    "MALE" => Gender::Male,
    "F" => Gender::Female,
    "FEMALE" => Gender::Female,
    "O" => Gender::Other,
    "OTHER" => Gender::Other,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid gender \"{0}\" (expected M/F/O)")]
pub struct ParseGenderError(pub String);

impl Gender {
    pub fn code(&self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
            Gender::Other => 'O',
        }
    }
}

impl FromStr for Gender {
    type Err = ParseGenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GENDER_TOKENS
            .get(s.trim().to_ascii_uppercase().as_str())
            .copied()
            .ok_or_else(|| ParseGenderError(s.trim().to_string()))
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

impl Student {
    pub fn new(
        id: impl Into<StudentId>,
        first_name: &str,
        last_name: &str,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender,
        }
    }

    /// "Last, First", or just the first name when there is no last name.
    pub fn sort_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{}, {}", self.last_name, self.first_name)
        }
    }

    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Compact seat label such as "Smith, J.".
    pub fn seat_label(&self) -> String {
        match self.first_name.chars().next() {
            Some(initial) if !self.last_name.is_empty() => {
                format!("{}, {}.", self.last_name, initial)
            }
            _ => self.first_name.clone(),
        }
    }
}
