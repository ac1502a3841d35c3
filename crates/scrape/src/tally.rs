//! Per-author running tallies.
//!
//! A [`Tally`] folds records one at a time into a map keyed by author login.
//! Malformed records are never rejected: a missing login or email is replaced
//! with a sentinel so every record still counts.

use std::collections::HashMap;

use serde::Serialize;

/// Login used for records without an identifiable author.
pub const USERNAME_MISSING: &str = "username missing";

/// Email used for commit records without an author signature.
pub const EMAIL_MISSING: &str = "fake@fake.com";

/// A record that can be attributed to an author.
pub trait Contribution {
    /// Whether records of this kind carry an author email worth tracking.
    const TRACKS_EMAIL: bool;

    /// Login of the author, if the record names one.
    fn author_login(&self) -> Option<&str>;

    /// Email of the author, if the record carries one.
    fn author_email(&self) -> Option<&str> {
        None
    }
}

/// Running aggregate for one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorTally {
    pub login: String,
    /// Distinct emails in the order they were first seen.
    pub emails: Vec<String>,
    /// Number of records attributed to this author.
    pub count: u64,
}

impl AuthorTally {
    fn new(login: String) -> Self {
        Self {
            login,
            emails: Vec::new(),
            count: 0,
        }
    }

    /// Append `email` unless it is already present.
    fn add_email(&mut self, email: &str) {
        if !self.emails.iter().any(|e| e == email) {
            self.emails.push(email.to_string());
        }
    }
}

/// Tallies keyed by author login, local to one report run.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    authors: HashMap<String, AuthorTally>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the tally.
    pub fn fold<R: Contribution>(&mut self, record: &R) {
        let login = record.author_login().unwrap_or(USERNAME_MISSING);

        let entry = self
            .authors
            .entry(login.to_string())
            .or_insert_with(|| AuthorTally::new(login.to_string()));
        entry.count += 1;

        if R::TRACKS_EMAIL {
            entry.add_email(record.author_email().unwrap_or(EMAIL_MISSING));
        }
    }

    /// Fold every record of a page.
    pub fn fold_all<'a, R, I>(&mut self, records: I)
    where
        R: Contribution + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        for record in records {
            self.fold(record);
        }
    }

    /// Number of distinct authors.
    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Sum of all per-author counts.
    pub fn total_count(&self) -> u64 {
        self.authors.values().map(|t| t.count).sum()
    }

    pub fn get(&self, login: &str) -> Option<&AuthorTally> {
        self.authors.get(login)
    }

    /// Consume the tally, yielding every author in unspecified order.
    pub fn into_tallies(self) -> impl Iterator<Item = AuthorTally> {
        self.authors.into_values()
    }
}
