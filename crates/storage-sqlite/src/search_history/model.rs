//! Database model for recorded searches.

use diesel::prelude::*;

/// One row of `search_history`.
#[derive(Queryable, Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::search_history)]
pub struct SearchHistoryDb {
    pub id: String,
    pub search_query: String,
    pub searched_at: String,
}
