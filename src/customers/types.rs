//! Customer records as served by the API

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A customer owned by the remote API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Whether the customer is active
    pub status: bool,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn status_label(&self) -> &'static str {
        if self.status {
            "Ativo"
        } else {
            "Inativo"
        }
    }

    /// Creation time in the local timezone, `dd/mm/yyyy, hh:mm:ss`
    pub fn created_at_display(&self) -> String {
        self.created_at_in(&Local)
    }

    pub fn created_at_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        self.created_at
            .with_timezone(tz)
            .format("%d/%m/%Y, %H:%M:%S")
            .to_string()
    }
}
