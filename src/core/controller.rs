//! Screen logic shared by every entity kind
//!
//! An [`EntityController`] pairs a repository with a snapshot and runs the
//! full write cycle: validate, write, re-fetch, re-select. Writes take
//! `&mut self`, so one controller never has two writes in flight.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::repository::{Record, Repository};
use crate::core::snapshot::{Snapshot, SyncOutcome};
use crate::core::store::{Store, StoreError};
use crate::core::validation::{FormInput, ValidationError};

#[derive(Debug, Error, Diagnostic)]
pub enum ControllerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error("no {label} selected")]
    #[diagnostic(
        code(stockroom::controller::no_selection),
        help("select a record before deleting it")
    )]
    NoSelection { label: &'static str },
}

/// Result of a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing was selected, so a new record was added
    Inserted,
    /// The selected record was overwritten
    Updated(i64),
    /// The selected record was deleted elsewhere before the update ran,
    /// so nothing was written
    Vanished(i64),
}

/// Repository plus live snapshot for one entity kind
#[derive(Debug)]
pub struct EntityController<R> {
    repo: Repository<R>,
    snapshot: Snapshot<R>,
}

impl<R: Record> EntityController<R> {
    /// Build a controller and load the current rows
    pub fn open(store: &Store) -> Result<Self, StoreError> {
        let mut controller = Self {
            repo: Repository::new(store),
            snapshot: Snapshot::new(),
        };
        controller.refresh()?;
        Ok(controller)
    }

    pub fn repository(&self) -> &Repository<R> {
        &self.repo
    }

    pub fn snapshot(&self) -> &Snapshot<R> {
        &self.snapshot
    }

    /// Re-fetch every row and re-apply the selection
    ///
    /// On a store error the previous snapshot is left as it was.
    pub fn refresh(&mut self) -> Result<SyncOutcome, StoreError> {
        let fresh = self.repo.list_all()?;
        Ok(self.snapshot.apply(fresh))
    }

    pub fn select(&mut self, id: i64) -> bool {
        self.snapshot.select(id)
    }

    /// Start a blank entry: the next save inserts
    pub fn new_entry(&mut self) {
        self.snapshot.clear_selection();
    }

    pub fn selected(&self) -> Option<&R> {
        self.snapshot.selected()
    }

    /// Form populated from the selected record
    pub fn details(&self) -> Option<R::Input> {
        self.snapshot.selected().map(R::to_input)
    }

    /// Validate `input` and write it
    ///
    /// Updates the selected record, or inserts when nothing is selected.
    /// Nothing touches the store when validation fails. An update whose
    /// row is gone after the refresh is reported as `Vanished`.
    pub fn save(&mut self, input: &R::Input) -> Result<SaveOutcome, ControllerError> {
        let fields = input.validate()?;

        let outcome = match self.snapshot.selected_id() {
            Some(id) => {
                self.repo.update(id, &fields)?;
                SaveOutcome::Updated(id)
            }
            None => {
                self.repo.insert(&fields)?;
                SaveOutcome::Inserted
            }
        };

        let sync = self.refresh()?;
        match outcome {
            SaveOutcome::Updated(id) if !sync.restored => {
                tracing::warn!(kind = R::LABEL, id, "record vanished before update");
                Ok(SaveOutcome::Vanished(id))
            }
            outcome => Ok(outcome),
        }
    }

    /// Delete the selected record, returning its id
    pub fn delete_selected(&mut self) -> Result<i64, ControllerError> {
        let id = self
            .snapshot
            .selected_id()
            .ok_or(ControllerError::NoSelection { label: R::LABEL })?;

        self.repo.delete(id)?;
        self.refresh()?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::item::{Item, ItemInput};
    use crate::entities::supplier::{Supplier, SupplierInput};
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store) {
        let tmp = TempDir::new().unwrap();
        let store = Store::new(tmp.path().join("inventory.db"));
        store.ensure_schema().unwrap();
        (tmp, store)
    }

    fn item_input(name: &str, quantity: &str, price: &str) -> ItemInput {
        ItemInput {
            name: name.to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
        }
    }

    #[test]
    fn test_save_without_selection_inserts() {
        let (_tmp, store) = setup();
        let mut items = EntityController::<Item>::open(&store).unwrap();

        let outcome = items.save(&item_input("Widget", "3", "1.25")).unwrap();

        assert_eq!(outcome, SaveOutcome::Inserted);
        assert_eq!(items.snapshot().len(), 1);
        assert!(items.selected().is_none());
    }

    #[test]
    fn test_save_with_selection_updates_and_keeps_selection() {
        let (_tmp, store) = setup();
        let mut items = EntityController::<Item>::open(&store).unwrap();
        items.save(&item_input("Widget", "3", "1.25")).unwrap();
        items.save(&item_input("Gadget", "8", "2.00")).unwrap();
        let id = items.snapshot().rows()[1].id;
        assert!(items.select(id));

        let outcome = items.save(&item_input("Gadget XL", "9", "2.50")).unwrap();

        assert_eq!(outcome, SaveOutcome::Updated(id));
        assert_eq!(items.snapshot().len(), 2);
        let selected = items.selected().unwrap();
        assert_eq!(selected.id, id);
        assert_eq!(selected.name, "Gadget XL");
        assert_eq!(selected.quantity, 9);
    }

    #[test]
    fn test_update_of_externally_deleted_row_reports_vanished() {
        let (_tmp, store) = setup();
        let mut items = EntityController::<Item>::open(&store).unwrap();
        items.save(&item_input("Widget", "3", "1.25")).unwrap();
        let id = items.snapshot().rows()[0].id;
        items.select(id);
        Repository::<Item>::new(&store).delete(id).unwrap();

        let outcome = items.save(&item_input("Widget", "4", "1.25")).unwrap();

        assert_eq!(outcome, SaveOutcome::Vanished(id));
        assert!(items.snapshot().is_empty());
        assert!(items.selected().is_none());
    }

    #[test]
    fn test_invalid_input_writes_nothing() {
        let (_tmp, store) = setup();
        let mut items = EntityController::<Item>::open(&store).unwrap();

        let err = items.save(&item_input("Widget", "-2", "1.00")).unwrap_err();

        assert!(matches!(
            err,
            ControllerError::Validation(ValidationError::NegativeValue { field: "quantity" })
        ));
        assert!(Repository::<Item>::new(&store).list_all().unwrap().is_empty());
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let (_tmp, store) = setup();
        let mut items = EntityController::<Item>::open(&store).unwrap();
        items.save(&item_input("Widget", "3", "1.25")).unwrap();
        let id = items.snapshot().rows()[0].id;
        items.select(id);

        assert_eq!(items.delete_selected().unwrap(), id);

        assert!(items.snapshot().find(id).is_none());
        assert!(items.selected().is_none());
    }

    #[test]
    fn test_delete_without_selection_fails() {
        let (_tmp, store) = setup();
        let mut suppliers = EntityController::<Supplier>::open(&store).unwrap();

        let err = suppliers.delete_selected().unwrap_err();

        assert!(matches!(err, ControllerError::NoSelection { label: "supplier" }));
    }

    #[test]
    fn test_new_entry_switches_save_to_insert() {
        let (_tmp, store) = setup();
        let mut suppliers = EntityController::<Supplier>::open(&store).unwrap();
        let acme = SupplierInput {
            name: "Acme".to_string(),
            ..SupplierInput::default()
        };
        suppliers.save(&acme).unwrap();
        let id = suppliers.snapshot().rows()[0].id;
        suppliers.select(id);

        suppliers.new_entry();
        let outcome = suppliers.save(&acme).unwrap();

        assert_eq!(outcome, SaveOutcome::Inserted);
        assert_eq!(suppliers.snapshot().len(), 2);
    }

    #[test]
    fn test_details_reflect_selection() {
        let (_tmp, store) = setup();
        let mut suppliers = EntityController::<Supplier>::open(&store).unwrap();
        suppliers
            .save(&SupplierInput {
                name: "Acme".to_string(),
                contact_person: "Wile".to_string(),
                email: String::new(),
                phone: "555-0100".to_string(),
            })
            .unwrap();
        assert!(suppliers.details().is_none());

        let id = suppliers.snapshot().rows()[0].id;
        suppliers.select(id);
        let details = suppliers.details().unwrap();

        assert_eq!(details.name, "Acme");
        assert_eq!(details.contact_person, "Wile");
        assert_eq!(details.email, "");
        assert_eq!(details.phone, "555-0100");
    }

    #[test]
    fn test_refresh_sees_external_writes() {
        let (_tmp, store) = setup();
        let mut items = EntityController::<Item>::open(&store).unwrap();
        let other = EntityController::<Item>::open(&store).unwrap();
        other
            .repository()
            .insert(&item_input("Widget", "1", "1").validate().unwrap())
            .unwrap();

        let outcome = items.refresh().unwrap();

        assert_eq!(outcome.rows, 1);
    }
}
