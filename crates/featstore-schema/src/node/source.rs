use crate::prelude::*;

///
/// Source
///
/// Declares where raw feature rows live: a database/table pair plus the
/// columns carrying event time and record-creation time. Whether those
/// columns actually exist in the warehouse is checked by the consuming
/// engine at query time, not here.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Source {
    pub name: String,
    pub database: String,
    pub table: String,
    pub event_timestamp_field: String,
    pub created_timestamp_field: String,
}

impl Source {
    /// Physical location as a `database.table` pair.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }
}

impl ValidateNode for Source {
    fn validate(&self) -> Result<(), ErrorTree> {
        let mut errs = ErrorTree::new();

        check_ident(&mut errs, "name", &self.name);

        if self.database.is_empty() {
            err!(errs, "database must not be empty");
        }
        if self.table.is_empty() {
            err!(errs, "table must not be empty");
        }
        if self.event_timestamp_field.is_empty() {
            err!(errs, "event_timestamp_field must not be empty");
        }
        if self.created_timestamp_field.is_empty() {
            err!(errs, "created_timestamp_field must not be empty");
        }

        // Event time drives recency, created time resolves duplicate-row
        // ties; the same column cannot do both.
        if !self.event_timestamp_field.is_empty()
            && self.event_timestamp_field == self.created_timestamp_field
        {
            err!(
                errs,
                "event_timestamp_field and created_timestamp_field must name different columns (both are '{}')",
                self.event_timestamp_field,
            );
        }

        errs.result()
    }
}

impl VisitableNode for Source {
    fn route_key(&self) -> String {
        self.name.clone()
    }
}

///
/// TESTS
///
