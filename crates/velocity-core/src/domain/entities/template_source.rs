//! Where the boilerplate comes from.
//!
//! Sources are written either in the `host:owner/repo[#ref]` shorthand
//! (`github:`, `gitlab:`, `bitbucket:`; no prefix means GitHub) or as a full
//! git URL with an optional `#ref` suffix.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::DomainError;

/// The template every new project starts from unless configured otherwise.
pub const DEFAULT_TEMPLATE_SOURCE: &str = "gitlab:etribes/velocity-boilerplate";

/// A hosting service understood by the shorthand syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitHost {
    GitHub,
    GitLab,
    Bitbucket,
}

impl GitHost {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "github",
            Self::GitLab => "gitlab",
            Self::Bitbucket => "bitbucket",
        }
    }

    pub const fn domain(&self) -> &'static str {
        match self {
            Self::GitHub => "github.com",
            Self::GitLab => "gitlab.com",
            Self::Bitbucket => "bitbucket.org",
        }
    }
}

impl FromStr for GitHost {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "github" => Ok(Self::GitHub),
            "gitlab" => Ok(Self::GitLab),
            "bitbucket" => Ok(Self::Bitbucket),
            _ => Err(()),
        }
    }
}

/// A parsed template location.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateSource {
    Hosted {
        host: GitHost,
        owner: String,
        repo: String,
        reference: Option<String>,
    },
    Url {
        url: String,
        reference: Option<String>,
    },
}

impl TemplateSource {
    /// The URL handed to `git clone`.
    pub fn clone_url(&self) -> String {
        match self {
            Self::Hosted {
                host, owner, repo, ..
            } => format!("https://{}/{owner}/{repo}.git", host.domain()),
            Self::Url { url, .. } => url.clone(),
        }
    }

    /// Branch or tag to check out, if pinned.
    pub fn reference(&self) -> Option<&str> {
        match self {
            Self::Hosted { reference, .. } | Self::Url { reference, .. } => reference.as_deref(),
        }
    }
}

impl Default for TemplateSource {
    fn default() -> Self {
        Self::Hosted {
            host: GitHost::GitLab,
            owner: "etribes".into(),
            repo: "velocity-boilerplate".into(),
            reference: None,
        }
    }
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hosted {
                host, owner, repo, ..
            } => write!(f, "{}:{owner}/{repo}", host.as_str())?,
            Self::Url { url, .. } => f.write_str(url)?,
        }
        if let Some(reference) = self.reference() {
            write!(f, "#{reference}")?;
        }
        Ok(())
    }
}

impl FromStr for TemplateSource {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let invalid = |reason: &str| DomainError::InvalidTemplateSource {
            input: input.into(),
            reason: reason.into(),
        };

        if input.is_empty() {
            return Err(invalid("source cannot be empty"));
        }

        let (location, reference) = match input.rsplit_once('#') {
            Some((_, "")) => return Err(invalid("'#' must be followed by a branch or tag")),
            Some((location, reference)) => (location, Some(reference.to_string())),
            None => (input, None),
        };

        if location.contains("://") || location.starts_with("git@") {
            return Ok(Self::Url {
                url: location.to_string(),
                reference,
            });
        }

        let (host, path) = match location.split_once(':') {
            Some((prefix, path)) => {
                let host = prefix
                    .parse::<GitHost>()
                    .map_err(|()| invalid("host must be one of github, gitlab, bitbucket"))?;
                (host, path)
            }
            None => (GitHost::GitHub, location),
        };

        let mut segments = path.split('/');
        let (owner, repo) = match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(repo), None) if !owner.is_empty() && !repo.is_empty() => {
                (owner, repo)
            }
            _ => return Err(invalid("expected owner/repo")),
        };
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        if repo.is_empty() {
            return Err(invalid("expected owner/repo"));
        }

        Ok(Self::Hosted {
            host,
            owner: owner.to_string(),
            repo: repo.to_string(),
            reference,
        })
    }
}
