use std::io::BufRead;

use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::store::{LoadDiagnostic, Loaded};

pub fn serialize_contacts(contacts: &[Contact]) -> String {
    let mut data = String::new();

    for contact in contacts {
        data.push_str(&contact.to_record());
        data.push('\n');
    }
    data
}

/// Reads `name,phone` records line by line. Blank lines are ignored; lines
/// without a separator or that are not valid UTF-8 are skipped with a
/// diagnostic. Only read errors fail.
pub fn deserialize_contacts_from_txt_buffer<R: BufRead>(buffer: R) -> Result<Loaded, AppError> {
    let mut loaded = Loaded::default();

    for (idx, raw) in buffer.split(b'\n').enumerate() {
        let raw = raw?;

        let parsed = match String::from_utf8(raw) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                line.parse::<Contact>().map_err(|_| line.to_string())
            }
            Err(e) => Err(String::from_utf8_lossy(e.as_bytes()).trim().to_string()),
        };

        match parsed {
            Ok(contact) => loaded.contacts.push(contact),
            Err(line) => loaded.diagnostics.push(LoadDiagnostic::InvalidLine {
                number: idx + 1,
                line,
            }),
        }
    }

    Ok(loaded)
}
