pub mod memory;
pub mod txt;

use core::fmt;
use std::path::PathBuf;

use crate::domain::contact::Contact;
use crate::errors::AppError;

pub use memory::MemStore;
pub use txt::TxtStore;

/// Persistence backend of a phone book. `save` always replaces the whole
/// stored list; there is no partial update.
pub trait ContactStore {
    fn load(&self) -> Result<Loaded, AppError>;

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

/// Result of a tolerant load: the contacts that parsed, in stored order,
/// plus one diagnostic per recoverable problem.
#[derive(Debug, Default)]
pub struct Loaded {
    pub contacts: Vec<Contact>,
    pub diagnostics: Vec<LoadDiagnostic>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LoadDiagnostic {
    MissingFile(PathBuf),
    InvalidLine { number: usize, line: String },
}

impl fmt::Display for LoadDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDiagnostic::MissingFile(_) => write!(f, "Phonebook file not found."),
            LoadDiagnostic::InvalidLine { line, .. } => {
                write!(f, "Skipping invalid line: {}", line)
            }
        }
    }
}
