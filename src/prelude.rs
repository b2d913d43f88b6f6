pub use crate::cli::{
    command::{self, Cli, Command},
    run::{App, run_app},
};
pub use crate::domain::{
    contact::{self, Contact},
    phonebook::PhoneBook,
};
pub use crate::errors::AppError;
pub use crate::store::{
    self, ContactStore, LoadDiagnostic, Loaded, MemStore, TxtStore, txt::DEFAULT_FILE_PATH,
};
