use std::fmt;
use std::str::FromStr;

/// An `org/repo` pair naming a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RepoTarget {
    pub org: String,
    pub repo: String,
}

/// Why a target string was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TargetError {
    Malformed(String),
    MissingOrg,
    MissingRepo,
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(raw) => write!(f, "poorly formatted org/repo: {raw:?}"),
            Self::MissingOrg => f.write_str("please supply the organization as <org>/<repo>"),
            Self::MissingRepo => f.write_str("please supply the repository as <org>/<repo>"),
        }
    }
}

impl std::error::Error for TargetError {}

impl FromStr for RepoTarget {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let (Some(org), Some(repo), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TargetError::Malformed(s.to_string()));
        };

        if org.is_empty() {
            return Err(TargetError::MissingOrg);
        }
        if repo.is_empty() {
            return Err(TargetError::MissingRepo);
        }

        Ok(Self {
            org: org.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}
