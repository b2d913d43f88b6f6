use std::fs::{File, OpenOptions};
use std::io::{BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::*;
use crate::helper;

pub const DEFAULT_FILE_PATH: &str = "phonebook.txt";

/// Flat text file, one `name,phone` record per line.
pub struct TxtStore {
    pub path: PathBuf,
}

impl TxtStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TxtStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for TxtStore {
    fn default() -> Self {
        TxtStore::new(DEFAULT_FILE_PATH)
    }
}

impl ContactStore for TxtStore {
    fn load(&self) -> Result<Loaded, AppError> {
        // A missing file is an empty phone book, not an error.
        // Load never creates the file; the first save does.
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %self.path.display(), "phonebook file not found");
                return Ok(Loaded {
                    contacts: Vec::new(),
                    diagnostics: vec![LoadDiagnostic::MissingFile(self.path.clone())],
                });
            }
            Err(e) => return Err(e.into()),
        };

        let loaded = helper::deserialize_contacts_from_txt_buffer(BufReader::new(file))?;

        for diagnostic in &loaded.diagnostics {
            if let LoadDiagnostic::InvalidLine { number, line } = diagnostic {
                info!(path = %self.path.display(), number, line = %line, "skipping invalid line");
            }
        }
        debug!(
            path = %self.path.display(),
            count = loaded.contacts.len(),
            "loaded contacts"
        );

        Ok(loaded)
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let mut file = OpenOptions::new()
            .write(true) // WRITE to file on save
            .truncate(true)
            .create(true)
            .open(&self.path)?;

        let data = helper::serialize_contacts(contacts);
        file.write_all(data.as_bytes())?;
        file.flush()?;

        debug!(path = %self.path.display(), count = contacts.len(), "saved contacts");
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "txt"
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn missing_file_loads_empty() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("nothing-here.txt");
        let store = TxtStore::new(&path);

        let loaded = store.load()?;

        assert!(loaded.contacts.is_empty());
        assert_eq!(loaded.diagnostics, vec![LoadDiagnostic::MissingFile(path.clone())]);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn save_then_load_keeps_order() -> Result<(), AppError> {
        let dir = tempdir()?;
        let store = TxtStore::new(dir.path().join("phonebook.txt"));
        let contacts = vec![
            Contact::new("Wayne", "08062866694"),
            Contact::new("Thomas", "08019271836"),
            Contact::new("Alex", ""),
        ];

        store.save(&contacts)?;
        let loaded = store.load()?;

        assert_eq!(loaded.contacts, contacts);
        assert!(loaded.diagnostics.is_empty());
        Ok(())
    }

    #[test]
    fn save_overwrites_previous_content() -> Result<(), AppError> {
        let dir = tempdir()?;
        let path = dir.path().join("phonebook.txt");
        fs::write(&path, "Old,1\nOlder,2\nOldest,3\n")?;
        let store = TxtStore::new(&path);

        store.save(&[Contact::new("New", "9")])?;

        assert_eq!(fs::read_to_string(&path)?, "New,9\n");
        Ok(())
    }

    #[test]
    fn save_into_missing_directory_fails() -> Result<(), AppError> {
        let dir = tempdir()?;
        let store = TxtStore::new(dir.path().join("no-such-dir").join("phonebook.txt"));

        let result = store.save(&[Contact::new("Bob", "555")]);

        assert!(matches!(result, Err(AppError::Io(_))));
        Ok(())
    }

    #[test]
    fn default_path_is_phonebook_txt() {
        let store = TxtStore::default();

        assert_eq!(store.path(), Path::new("phonebook.txt"));
        assert_eq!(store.get_medium(), "txt");
    }
}
