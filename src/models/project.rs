use serde::Serialize;

/// A project as stored in the `project` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: i64,           // ⇔ project.id
    pub name: String,      // ⇔ project.name (canonical, UNIQUE)
    pub last_touched: i64, // ⇔ project.last_touched (Unix seconds)
}
