//! Uniform CRUD over the id-keyed catalogs (products, customers, bank
//! accounts).

use uuid::Uuid;

use crate::error::Result;
use crate::model::{BankAccount, Party, Product};

/// What an upsert did. A stale id (record carries an id no longer present in
/// the collection) is treated as an append rather than an error, matching the
/// original app; the distinction is only reported, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Replaced,
}

pub trait CatalogRecord {
    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn validate(&self) -> Result<()>;
}

impl CatalogRecord for Product {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn validate(&self) -> Result<()> {
        Product::validate(self)
    }
}

impl CatalogRecord for Party {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn validate(&self) -> Result<()> {
        Party::validate(self)
    }
}

impl CatalogRecord for BankAccount {
    fn id(&self) -> &str {
        &self.id
    }
    fn set_id(&mut self, id: String) {
        self.id = id;
    }
    fn validate(&self) -> Result<()> {
        BankAccount::validate(self)
    }
}

/// Inserts or replaces `record` in `collection`, validating first. On a
/// validation failure the collection is left untouched. An empty id gets a
/// fresh UUID and appends; a matching id replaces that entry in place.
pub fn upsert<T: CatalogRecord>(mut record: T, collection: &mut Vec<T>) -> Result<Upsert> {
    record.validate()?;

    if record.id().is_empty() {
        record.set_id(Uuid::new_v4().to_string());
        collection.push(record);
        return Ok(Upsert::Created);
    }

    match collection.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            Ok(Upsert::Replaced)
        }
        None => {
            collection.push(record);
            Ok(Upsert::Created)
        }
    }
}

/// Removes the record with `id`, if any. Deleting an absent id is a no-op.
pub fn remove<T: CatalogRecord>(id: &str, collection: &mut Vec<T>) {
    collection.retain(|r| r.id() != id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: f64) -> Product {
        Product {
            id: String::new(),
            name: name.into(),
            unit: "piece".into(),
            price,
        }
    }

    #[test]
    fn empty_id_appends_with_fresh_unique_id() {
        let mut products = Vec::new();
        assert_eq!(
            upsert(product("A", 100.0), &mut products).unwrap(),
            Upsert::Created
        );
        assert_eq!(
            upsert(product("B", 200.0), &mut products).unwrap(),
            Upsert::Created
        );
        assert_eq!(products.len(), 2);
        assert!(!products[0].id.is_empty());
        assert_ne!(products[0].id, products[1].id);
    }

    #[test]
    fn matching_id_replaces_only_that_record() {
        let mut products = Vec::new();
        upsert(product("A", 100.0), &mut products).unwrap();
        upsert(product("B", 200.0), &mut products).unwrap();

        let mut edited = products[0].clone();
        edited.price = 150.0;
        assert_eq!(upsert(edited, &mut products).unwrap(), Upsert::Replaced);

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].price, 150.0);
        // The untouched record keeps its field values.
        assert_eq!(products[1].name, "B");
        assert_eq!(products[1].price, 200.0);
    }

    #[test]
    fn stale_id_appends_instead_of_failing() {
        let mut products = Vec::new();
        let mut ghost = product("Ghost", 50.0);
        ghost.id = "deleted-long-ago".into();
        assert_eq!(upsert(ghost, &mut products).unwrap(), Upsert::Created);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "deleted-long-ago");
    }

    #[test]
    fn validation_failure_leaves_collection_unchanged() {
        let mut products = Vec::new();
        upsert(product("A", 100.0), &mut products).unwrap();
        assert!(upsert(product("", 100.0), &mut products).is_err());
        assert!(upsert(product("C", 0.0), &mut products).is_err());
        assert_eq!(products.len(), 1);
    }

    #[test]
    fn remove_filters_by_id_and_is_idempotent() {
        let mut products = Vec::new();
        upsert(product("A", 100.0), &mut products).unwrap();
        let id = products[0].id.clone();

        remove(&id, &mut products);
        assert!(products.is_empty());
        // Removing again is a no-op.
        remove(&id, &mut products);
    }
}
