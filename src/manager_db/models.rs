use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedLocation {
    pub id: i64,
    pub city: String,
}
