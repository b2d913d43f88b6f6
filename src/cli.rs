pub mod command;
pub mod run;

use std::io::{BufRead, Write};

use crate::domain::contact::{self, Contact};
use crate::errors::AppError;

// OUTPUT FUNCTIONS
pub fn show_menu<W: Write>(out: &mut W) -> Result<(), AppError> {
    writeln!(out, "\nPhoneBook Application")?;
    writeln!(out, "1. Add Contact")?;
    writeln!(out, "2. Find Contact")?;
    writeln!(out, "3. Delete Contact")?;
    writeln!(out, "4. Display All Contacts")?;
    writeln!(out, "5. Sort Contacts by Name")?;
    writeln!(out, "6. Exit")?;
    Ok(())
}

pub fn display_all<W: Write>(out: &mut W, contacts: &[Contact]) -> Result<(), AppError> {
    writeln!(out, "{}", contact::display_header())?;
    for contact in contacts {
        writeln!(out, "{}", contact)?;
    }
    Ok(())
}

// INPUT FUNCTIONS

/// Prints `message` and reads one line. The line terminator is dropped,
/// other whitespace is kept. `None` once input is exhausted.
pub fn get_input<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    message: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{}", message)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    let len = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(len);
    Ok(Some(line))
}
