//! Attribution of GitHub records to authors.

use super::types::{CommitRecord, ContributorStats, PullRequestRecord, SimpleUser};
use crate::tally::Contribution;

fn login_of(user: &Option<SimpleUser>) -> Option<&str> {
    user.as_ref().and_then(|u| u.login.as_deref())
}

impl Contribution for CommitRecord {
    const TRACKS_EMAIL: bool = true;

    /// The linked GitHub account, not the git author name.
    fn author_login(&self) -> Option<&str> {
        login_of(&self.author)
    }

    fn author_email(&self) -> Option<&str> {
        self.commit.author.as_ref().and_then(|a| a.email.as_deref())
    }
}

impl Contribution for PullRequestRecord {
    const TRACKS_EMAIL: bool = false;

    fn author_login(&self) -> Option<&str> {
        login_of(&self.user)
    }
}

impl ContributorStats {
    pub fn author_login(&self) -> Option<&str> {
        login_of(&self.author)
    }
}
