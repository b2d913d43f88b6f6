pub mod contact;
pub mod phonebook;

pub use contact::Contact;
pub use phonebook::PhoneBook;
