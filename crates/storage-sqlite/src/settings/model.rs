//! Database model for application settings.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Key-value row in `app_settings`.
#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingDb {
    pub setting_key: String,
    pub setting_value: String,
}
