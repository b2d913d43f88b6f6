use std::cell::{Cell, RefCell};

use super::*;

/// In-memory backend. Remembers the last saved list and how many saves
/// happened, which is what tests and benches need to observe write-through.
#[derive(Default)]
pub struct MemStore {
    data: RefCell<Vec<Contact>>,
    saves: Cell<usize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            data: RefCell::new(contacts),
            saves: Cell::new(0),
        }
    }

    pub fn snapshot(&self) -> Vec<Contact> {
        self.data.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<Loaded, AppError> {
        Ok(Loaded {
            contacts: self.snapshot(),
            diagnostics: Vec::new(),
        })
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        *self.data.borrow_mut() = contacts.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
