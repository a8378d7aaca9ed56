//! Loads the initial data into empty collections when the server starts.

use crate::{
    Error,
    category::{Category, CategoryStore},
    document::Document,
    stores::DocumentStore,
    vendor::{Vendor, VendorStore},
};

/// The categories loaded into an empty category collection.
pub fn category_seed() -> Vec<Category> {
    ["Fruits", "Nuts", "Breads", "Meats", "Eggs"]
        .into_iter()
        .map(Category::new)
        .collect()
}

/// The vendors loaded into an empty vendor collection.
pub fn vendor_seed() -> Vec<Vendor> {
    [
        ("Ian", "Gillan"),
        ("Ronnie James", "Dio"),
        ("Ozzy", "Osbourne"),
        ("Rob", "Halford"),
        ("Jim", "Morrison"),
    ]
    .into_iter()
    .map(|(first_name, last_name)| Vendor::new(first_name, last_name))
    .collect()
}

/// Seed every collection that is currently empty.
///
/// # Errors
/// Returns the first error from the stores. Seeding stops at that point, so
/// callers should treat the error as fatal.
pub async fn seed_database(categories: &CategoryStore, vendors: &VendorStore) -> Result<(), Error> {
    tracing::info!("Bootstrapping data...");

    seed_collection(categories, category_seed()).await?;
    seed_collection(vendors, vendor_seed()).await?;

    Ok(())
}

/// Save `documents` into `store` if, and only if, the store is empty.
///
/// Documents are saved one at a time, in order, each save completing before
/// the next one starts. Returns the number of documents in the store
/// afterwards, or `None` if the store already had documents.
///
/// # Errors
/// Returns an error if the store could not be counted or a save failed.
pub async fn seed_collection<T: Document>(
    store: &dyn DocumentStore<T>,
    documents: Vec<T>,
) -> Result<Option<u64>, Error> {
    if store.count().await? != 0 {
        tracing::debug!("{} collection is not empty, skipping seed data", T::COLLECTION);
        return Ok(None);
    }

    tracing::info!("Loading {} data...", T::COLLECTION);

    for document in documents {
        store.save(document).await?;
    }

    let count = store.count().await?;
    tracing::info!("Loaded {count} {}", T::PLURAL);

    Ok(Some(count))
}
