use core::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Field separator of a stored record. Only the first one on a line counts.
pub const FIELD_SEPARATOR: char = ',';

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Contact {
    pub name: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Contact {
            name: name.into(),
            phone: phone.into(),
        }
    }

    pub fn update_contact(&mut self, new_name: impl Into<String>, new_phone: impl Into<String>) {
        self.name = new_name.into();
        self.phone = new_phone.into();
    }

    /// Stored form of the contact: `name,phone`, nothing escaped.
    pub fn to_record(&self) -> String {
        format!("{}{}{}", self.name, FIELD_SEPARATOR, self.phone)
    }
}

impl FromStr for Contact {
    type Err = AppError;

    /// Parses one stored line. Everything after the first separator is the phone,
    /// further separators included. Empty fields are accepted.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();

        match line.split_once(FIELD_SEPARATOR) {
            Some((name, phone)) => Ok(Contact::new(name, phone)),
            None => Err(AppError::InvalidRecord(line.to_string())),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<15} {:>10}", self.name, self.phone)
    }
}

pub fn display_header() -> String {
    format!("{:<15} {:>10}", "Name", "Phone")
}
