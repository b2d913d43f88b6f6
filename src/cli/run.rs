use std::io::{self, BufRead, Write};

use clap::Parser;
use dotenv::dotenv;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{
    self,
    command::{Cli, Command},
};
use crate::domain::{Contact, PhoneBook};
use crate::errors::AppError;
use crate::store::{ContactStore, TxtStore};

/// The interactive shell: owns the phone book and the I/O handles and
/// turns menu choices into phone book calls.
pub struct App<R, W, S: ContactStore = TxtStore> {
    phonebook: PhoneBook<S>,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write, S: ContactStore> App<R, W, S> {
    pub fn new(phonebook: PhoneBook<S>, input: R, out: W) -> Self {
        App {
            phonebook,
            input,
            out,
        }
    }

    /// Loads the phone book, prints load diagnostics, then serves the menu
    /// until `6` or end of input.
    pub fn run(&mut self) -> Result<(), AppError> {
        for diagnostic in self.phonebook.load()? {
            writeln!(self.out, "{}", diagnostic)?;
        }

        loop {
            cli::show_menu(&mut self.out)?;

            let Some(choice) = self.ask("Enter your choice (only use number): ")? else {
                debug!("input closed, leaving");
                return Ok(());
            };

            let command = match Command::from_choice(&choice) {
                Ok(command) => command,
                Err(e) => {
                    debug!("{}", e);
                    writeln!(self.out, "Invalid choice.")?;
                    continue;
                }
            };

            if command == Command::Exit {
                writeln!(self.out, "Exit")?;
                return Ok(());
            }

            if !self.dispatch(command)? {
                return Ok(());
            }
        }
    }

    pub fn phonebook(&self) -> &PhoneBook<S> {
        &self.phonebook
    }

    /// Runs one menu action. `Ok(false)` means input ran out mid-action.
    fn dispatch(&mut self, command: Command) -> Result<bool, AppError> {
        match command {
            Command::AddContact => {
                let Some(name) = self.ask("Enter name: ")? else {
                    return Ok(false);
                };
                let Some(phone) = self.ask("Enter phone number: ")? else {
                    return Ok(false);
                };

                if let Err(e) = self.phonebook.add_contact(Contact::new(name, phone)) {
                    return self.save_failed(e);
                }
                writeln!(self.out, "Contact added successfully.")?;
            }
            Command::FindContact => {
                let Some(name) = self.ask("Enter the name of the contact to search: ")? else {
                    return Ok(false);
                };

                match self.phonebook.find_contact(&name) {
                    Some(contact) => writeln!(self.out, "{}", contact)?,
                    None => writeln!(self.out, "Contact not found.")?,
                }
            }
            Command::DeleteContact => {
                let Some(name) = self.ask("Enter the name of the contact to delete: ")? else {
                    return Ok(false);
                };

                // Same message whether or not anything matched.
                if let Err(e) = self.phonebook.delete_contact(&name) {
                    return self.save_failed(e);
                }
                writeln!(self.out, "Contact deleted ")?;
            }
            Command::DisplayAll => {
                cli::display_all(&mut self.out, self.phonebook.contact_list())?;
            }
            Command::SortByName => {
                if let Err(e) = self.phonebook.sort_by_name() {
                    return self.save_failed(e);
                }
                writeln!(self.out, "Contacts sorted by name.")?;
            }
            Command::Exit => return Ok(false),
        }
        Ok(true)
    }

    /// A failed save aborts the current action only; the menu carries on.
    fn save_failed(&mut self, e: AppError) -> Result<bool, AppError> {
        error!(error = %e, "could not save phonebook");
        writeln!(self.out, "Error: {}", e)?;
        Ok(true)
    }

    fn ask(&mut self, message: &str) -> Result<Option<String>, AppError> {
        cli::get_input(&mut self.input, &mut self.out, message)
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    // Already installed when called twice in one process.
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    debug!(file = %cli.file, "starting phonebook");

    let phonebook = PhoneBook::new(TxtStore::new(&cli.file));
    let stdin = io::stdin();
    let mut app = App::new(phonebook, stdin.lock(), io::stdout().lock());

    app.run()
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::store::{Loaded, MemStore};

    /// Backend whose every save fails.
    struct ReadOnlyStore;

    impl ContactStore for ReadOnlyStore {
        fn load(&self) -> Result<Loaded, AppError> {
            Ok(Loaded::default())
        }

        fn save(&self, _contacts: &[Contact]) -> Result<(), AppError> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into())
        }

        fn get_medium(&self) -> &str {
            "read-only"
        }
    }

    /// Output that refuses every write.
    struct ClosedOutput;

    impl Write for ClosedOutput {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_save_reports_and_returns_to_menu() -> Result<(), AppError> {
        let mut out = Vec::new();
        let mut app = App::new(
            PhoneBook::new(ReadOnlyStore),
            Cursor::new("1\nBob\n555\n5\n6\n"),
            &mut out,
        );
        app.run()?;
        drop(app);

        let out = String::from_utf8_lossy(&out);
        assert_eq!(out.matches("Error: I/O error").count(), 2);
        assert!(!out.contains("Contact added successfully."));
        assert!(!out.contains("Contacts sorted by name."));
        assert!(out.ends_with("Exit\n"));
        Ok(())
    }

    #[test]
    fn output_failure_stops_the_shell() {
        let mut app = App::new(
            PhoneBook::new(MemStore::new()),
            Cursor::new("4\n6\n"),
            ClosedOutput,
        );

        let result = app.run();

        assert!(matches!(result, Err(AppError::Io(ref e)) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    fn run_with(store: MemStore, input: &str) -> Result<(String, Vec<Contact>), AppError> {
        let mut out = Vec::new();
        let mut app = App::new(PhoneBook::new(store), Cursor::new(input.to_string()), &mut out);
        app.run()?;
        let saved = app.phonebook().store().snapshot();
        drop(app);

        Ok((String::from_utf8_lossy(&out).into_owned(), saved))
    }

    #[test]
    fn adds_and_finds_contact() -> Result<(), AppError> {
        let (out, saved) = run_with(MemStore::new(), "1\nBob\n555\n2\nBob\n6\n")?;

        assert!(out.contains("Contact added successfully."));
        assert!(out.contains(&Contact::new("Bob", "555").to_string()));
        assert!(out.ends_with("Exit\n"));
        assert_eq!(saved, vec![Contact::new("Bob", "555")]);
        Ok(())
    }

    #[test]
    fn reports_missing_contact() -> Result<(), AppError> {
        let (out, _) = run_with(MemStore::new(), "2\nNobody\n6\n")?;

        assert!(out.contains("Contact not found."));
        Ok(())
    }

    #[test]
    fn delete_reports_success_even_without_match() -> Result<(), AppError> {
        let store = MemStore::with_contacts(vec![Contact::new("A", "1")]);
        let (out, saved) = run_with(store, "3\nB\n6\n")?;

        assert!(out.contains("Contact deleted \n"));
        assert_eq!(saved, vec![Contact::new("A", "1")]);
        Ok(())
    }

    #[test]
    fn invalid_choice_shows_menu_again() -> Result<(), AppError> {
        let (out, _) = run_with(MemStore::new(), "9\n6\n")?;

        assert!(out.contains("Invalid choice."));
        assert_eq!(out.matches("PhoneBook Application").count(), 2);
        Ok(())
    }

    #[test]
    fn sorts_and_displays() -> Result<(), AppError> {
        let store = MemStore::with_contacts(vec![Contact::new("B", "1"), Contact::new("A", "2")]);
        let (out, saved) = run_with(store, "5\n4\n6\n")?;

        assert!(out.contains("Contacts sorted by name."));
        assert_eq!(saved, vec![Contact::new("A", "2"), Contact::new("B", "1")]);
        let a = out.find(&Contact::new("A", "2").to_string());
        let b = out.find(&Contact::new("B", "1").to_string());
        assert!(a.is_some() && b.is_some() && a < b);
        Ok(())
    }

    #[test]
    fn end_of_input_exits_cleanly() -> Result<(), AppError> {
        let (out, saved) = run_with(MemStore::new(), "1\nBob\n")?;

        assert!(!out.contains("Contact added successfully."));
        assert!(saved.is_empty());
        Ok(())
    }
}
