use clap::{ArgAction, Parser};

use crate::errors::AppError;
use crate::store::txt::DEFAULT_FILE_PATH;

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Simple phone book")]
pub struct Cli {
    /// Path of the phone book file
    #[arg(short, long, env = "PHONEBOOK_FILE", default_value_t = String::from(DEFAULT_FILE_PATH))]
    pub file: String,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Menu entries, selected by their number.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Command {
    AddContact,
    FindContact,
    DeleteContact,
    DisplayAll,
    SortByName,
    Exit,
}

impl Command {
    pub fn from_choice(choice: &str) -> Result<Command, AppError> {
        match choice {
            "1" => Ok(Command::AddContact),
            "2" => Ok(Command::FindContact),
            "3" => Ok(Command::DeleteContact),
            "4" => Ok(Command::DisplayAll),
            "5" => Ok(Command::SortByName),
            "6" => Ok(Command::Exit),
            _ => Err(AppError::ParseCommand(choice.to_string())),
        }
    }
}
