/*! Sets up the application's SQLite database. */

use rusqlite::Connection;

use crate::{category::Category, stores::sqlite::create_document_table, vendor::Vendor};

/// Create the tables for every collection.
///
/// Existing tables and their documents are left as they are, so this is safe
/// to call on every start up.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_document_table::<Category>(connection)?;
    create_document_table::<Vendor>(connection)?;

    Ok(())
}
