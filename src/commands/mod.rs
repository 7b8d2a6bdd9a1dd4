//! Command handlers behind the CLI.
//!
//! Each handler calls one adapter (or a read-modify-write on a project),
//! then renders the result either as colored text or as pretty JSON.

pub mod config;
pub mod journal;
pub mod project;
pub mod task;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use crate::api::{HttpClient, JournalApi, ProjectApi};
use crate::error::{ServiceError, ServiceResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Adapters plus output preferences, built once per invocation.
pub struct Context {
    pub projects: ProjectApi,
    pub journal: JournalApi,
    pub json: bool,
}

impl Context {
    pub fn new(http: HttpClient, json: bool) -> Self {
        Self {
            projects: ProjectApi::new(http.clone()),
            journal: JournalApi::new(http),
            json,
        }
    }

    /// Print `value` as JSON or through `render`.
    pub fn emit<T, F>(&self, value: &T, render: F) -> ServiceResult<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", render(value));
        }
        Ok(())
    }
}

/// Validate an ISO calendar date and return it in canonical form.
pub fn parse_date(raw: &str) -> ServiceResult<String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .map_err(|e| ServiceError::InvalidInput(format!("'{}' is not a YYYY-MM-DD date: {}", raw, e)))
}

pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// The given date, validated, or today's date when none was given.
pub fn date_or_today(raw: Option<&str>) -> ServiceResult<String> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(today()),
    }
}
