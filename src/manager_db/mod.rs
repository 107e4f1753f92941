pub mod errors;
pub mod models;

use rusqlite::{params, Connection, ErrorCode};
use crate::manager_db::errors::DBError;
use crate::manager_db::models::SavedLocation;

/// Outcome of an add operation, a duplicate city is not an error
#[derive(Debug, PartialEq)]
pub enum AddOutcome {
    Created(SavedLocation),
    AlreadyExists,
    InvalidInput,
}

#[derive(Debug, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

pub struct DB {
    db_conn: Connection,
}

impl DB {

    /// Creates a new instance of DB
    ///
    /// # Arguments
    ///
    /// * 'db_path' - full path to db file, or `:memory:` for an in-memory database
    pub fn new(db_path: &str) -> Result<Self, DBError> {
        let db_conn = Connection::open(db_path)?;
        db_conn.execute(
           "CREATE TABLE IF NOT EXISTS saved_locations (
                id integer primary key autoincrement,
                city text not null unique
           )",
           [],
        )?;

        Ok(DB { db_conn })
    }

    /// Returns all saved locations in insertion order
    ///
    pub fn list_locations(&self) -> Result<Vec<SavedLocation>, DBError> {
        let mut stmt = self.db_conn.prepare(
            "SELECT id, city
                FROM saved_locations
                ORDER BY id;",
        )?;
        let mut rows = stmt.query([])?;

        let mut result: Vec<SavedLocation> = Vec::new();
        while let Some(row) = rows.next()? {
            result.push(SavedLocation { id: row.get(0)?, city: row.get(1)? });
        }

        Ok(result)
    }

    /// Saves a city name
    ///
    /// The name is trimmed of surrounding whitespace and compared case-sensitively.
    /// The unique constraint on `city` is the arbiter for duplicates, so a
    /// constraint violation reports `AlreadyExists` rather than an error.
    ///
    /// # Arguments
    ///
    /// * 'city' - city name as submitted by the caller
    pub fn add_location(&self, city: &str) -> Result<AddOutcome, DBError> {
        let city = city.trim();
        if city.is_empty() {
            return Ok(AddOutcome::InvalidInput);
        }

        match self.db_conn.execute(
            "INSERT INTO saved_locations (city) values (?1)",
            params![city],
        ) {
            Ok(_) => Ok(AddOutcome::Created(SavedLocation {
                id: self.db_conn.last_insert_rowid(),
                city: city.to_string(),
            })),
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                Ok(AddOutcome::AlreadyExists)
            },
            Err(e) => Err(DBError::from(e)),
        }
    }

    /// Deletes the location matching the given city name
    ///
    /// # Arguments
    ///
    /// * 'city' - city name, matched exactly after trimming
    pub fn delete_location(&self, city: &str) -> Result<DeleteOutcome, DBError> {
        let affected = self.db_conn.execute(
            "DELETE FROM saved_locations WHERE city = ?1",
            params![city.trim()],
        )?;

        if affected == 0 {
            Ok(DeleteOutcome::NotFound)
        } else {
            Ok(DeleteOutcome::Deleted)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> DB {
        DB::new(":memory:").unwrap()
    }

    #[test]
    fn add_then_list_contains_city() {
        let db = db();

        let outcome = db.add_location("Paris").unwrap();
        match outcome {
            AddOutcome::Created(loc) => assert_eq!(loc.city, "Paris"),
            other => panic!("expected Created, got {:?}", other),
        }

        let locations = db.list_locations().unwrap();
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].city, "Paris");
    }

    #[test]
    fn add_is_idempotent() {
        let db = db();

        db.add_location("Paris").unwrap();
        let second = db.add_location("Paris").unwrap();

        assert_eq!(second, AddOutcome::AlreadyExists);
        assert_eq!(db.list_locations().unwrap().len(), 1);
    }

    #[test]
    fn add_trims_before_matching() {
        let db = db();

        db.add_location("Paris").unwrap();
        let second = db.add_location("  Paris  ").unwrap();

        assert_eq!(second, AddOutcome::AlreadyExists);
    }

    #[test]
    fn add_rejects_empty_city() {
        let db = db();

        assert_eq!(db.add_location("").unwrap(), AddOutcome::InvalidInput);
        assert_eq!(db.add_location("   ").unwrap(), AddOutcome::InvalidInput);
        assert!(db.list_locations().unwrap().is_empty());
    }

    #[test]
    fn city_match_is_case_sensitive() {
        let db = db();

        db.add_location("Paris").unwrap();
        match db.add_location("paris").unwrap() {
            AddOutcome::Created(_) => (),
            other => panic!("expected Created, got {:?}", other),
        }

        assert_eq!(db.list_locations().unwrap().len(), 2);
    }

    #[test]
    fn delete_unknown_city_is_not_found() {
        let db = db();

        assert_eq!(db.delete_location("Atlantis").unwrap(), DeleteOutcome::NotFound);
        assert!(db.list_locations().unwrap().is_empty());
    }

    #[test]
    fn delete_removes_row() {
        let db = db();

        db.add_location("Paris").unwrap();
        assert_eq!(db.delete_location("Paris").unwrap(), DeleteOutcome::Deleted);
        assert!(db.list_locations().unwrap().is_empty());
        assert_eq!(db.delete_location("Paris").unwrap(), DeleteOutcome::NotFound);
    }

    #[test]
    fn list_reflects_net_set_after_interleaved_operations() {
        let db = db();

        db.add_location("Paris").unwrap();
        db.add_location("London").unwrap();
        db.delete_location("Paris").unwrap();
        db.add_location("Tokyo").unwrap();
        db.add_location("London").unwrap();
        db.delete_location("Oslo").unwrap();

        let cities: Vec<String> = db.list_locations().unwrap()
            .into_iter()
            .map(|l| l.city)
            .collect();

        assert_eq!(cities, vec!["London".to_string(), "Tokyo".to_string()]);
    }

    #[test]
    fn ids_are_assigned_and_stable() {
        let db = db();

        let first = match db.add_location("Paris").unwrap() {
            AddOutcome::Created(loc) => loc,
            other => panic!("expected Created, got {:?}", other),
        };
        let second = match db.add_location("London").unwrap() {
            AddOutcome::Created(loc) => loc,
            other => panic!("expected Created, got {:?}", other),
        };

        assert!(second.id > first.id);
        assert_eq!(db.list_locations().unwrap(), vec![first, second]);
    }
}
