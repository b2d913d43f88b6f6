use tracing::debug;

use crate::domain::contact::Contact;
use crate::errors::AppError;
use crate::store::{ContactStore, LoadDiagnostic, TxtStore};

/// In-memory contact list mirrored to a [`ContactStore`].
///
/// Every mutating call (add, delete, update, sort) ends with a full rewrite
/// of the backing store, so after a successful mutation the store holds
/// exactly the in-memory list in the same order. Nothing is batched.
pub struct PhoneBook<S: ContactStore = TxtStore> {
    contacts: Vec<Contact>,
    store: S,
}

impl<S: ContactStore> PhoneBook<S> {
    /// Empty phone book over `store`; nothing is read until [`PhoneBook::load`].
    pub fn new(store: S) -> Self {
        PhoneBook {
            contacts: Vec::new(),
            store,
        }
    }

    pub fn open(store: S) -> Result<(Self, Vec<LoadDiagnostic>), AppError> {
        let mut phonebook = PhoneBook::new(store);
        let diagnostics = phonebook.load()?;
        Ok((phonebook, diagnostics))
    }

    /// Replaces the in-memory list with the stored one. A missing file or
    /// malformed lines come back as diagnostics; only read failures are errors.
    pub fn load(&mut self) -> Result<Vec<LoadDiagnostic>, AppError> {
        let loaded = self.store.load()?;
        self.contacts = loaded.contacts;

        debug!(
            medium = self.store.get_medium(),
            count = self.contacts.len(),
            skipped = loaded.diagnostics.len(),
            "phonebook loaded"
        );
        Ok(loaded.diagnostics)
    }

    pub fn save(&self) -> Result<(), AppError> {
        self.store.save(&self.contacts)
    }

    /// Appends without any duplicate check.
    pub fn add_contact(&mut self, contact: Contact) -> Result<(), AppError> {
        self.contacts.push(contact);
        self.save()
    }

    /// Removes every contact named exactly `name` and rewrites the store even
    /// when nothing matched. Returns how many were removed.
    pub fn delete_contact(&mut self, name: &str) -> Result<usize, AppError> {
        let before = self.contacts.len();
        self.contacts.retain(|contact| contact.name != name);
        let removed = before - self.contacts.len();

        debug!(name, removed, "deleted contacts");
        self.save()?;
        Ok(removed)
    }

    /// First contact in list order named exactly `name`.
    pub fn find_contact(&self, name: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.name == name)
    }

    /// Replaces name and phone of the first contact named `name`.
    /// Returns false and leaves the store untouched when there is none.
    pub fn update_contact(
        &mut self,
        name: &str,
        new_name: &str,
        new_phone: &str,
    ) -> Result<bool, AppError> {
        let Some(contact) = self.contacts.iter_mut().find(|c| c.name == name) else {
            return Ok(false);
        };

        contact.update_contact(new_name, new_phone);
        self.save()?;
        Ok(true)
    }

    pub fn contact_list(&self) -> &[Contact] {
        &self.contacts
    }

    /// Stable ascending sort on the raw name, then persisted.
    pub fn sort_by_name(&mut self) -> Result<(), AppError> {
        self.contacts.sort_by(|a, b| a.name.cmp(&b.name));
        self.save()
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
