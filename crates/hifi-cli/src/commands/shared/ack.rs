use serde::Serialize;

/// Confirmation printed by delete commands, which have no record to show.
#[derive(Debug, Serialize)]
pub struct Deleted<'a> {
    pub id: &'a str,
    pub deleted: bool,
}

impl<'a> Deleted<'a> {
    pub const fn new(id: &'a str) -> Self {
        Self { id, deleted: true }
    }
}
