use serde::Serialize;

use crate::api::client::HttpClient;
use crate::api::types::{JournalEntry, JournalRecord};
use crate::error::ServiceResult;

/// Wire body for `POST /journal/newJournalEntry`.
#[derive(Debug, Serialize)]
struct NewEntryBody<'a> {
    entry_date: &'a str,
    entry_body: &'a str,
}

/// Wire body for `PUT /journal/updateJournalEntry/{id}`. The server reads
/// the id from the body, so it is sent in both places.
#[derive(Debug, Serialize)]
struct EditEntryBody<'a> {
    entry_id: &'a str,
    entry_date: &'a str,
    entry_body: &'a str,
}

/// Journal endpoints under `/journal`. There is no delete endpoint.
#[derive(Clone)]
pub struct JournalApi {
    http: HttpClient,
}

impl JournalApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_all_entries(&self) -> ServiceResult<Vec<JournalRecord>> {
        self.http.get("/journal/all").await
    }

    pub async fn create_entry(&self, entry: &JournalEntry) -> ServiceResult<JournalRecord> {
        let body = NewEntryBody {
            entry_date: &entry.date,
            entry_body: &entry.content,
        };
        self.http.post("/journal/newJournalEntry", &body).await
    }

    pub async fn update_entry(&self, id: &str, entry: &JournalEntry) -> ServiceResult<JournalRecord> {
        let body = EditEntryBody {
            entry_id: id,
            entry_date: &entry.date,
            entry_body: &entry.content,
        };
        self.http
            .put(&format!("/journal/updateJournalEntry/{}", id), &body)
            .await
    }
}
