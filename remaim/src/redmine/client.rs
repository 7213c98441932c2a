//! Redmine REST client.

use super::{IssueList, SourceClient, SourceError, SourceIssue, SourceProject};
use crate::config::RedmineSettings;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

/// Page size used for every list endpoint.
const PAGE_SIZE: usize = 100;

/// Reads projects, issues and attachments from a Redmine instance.
pub struct RedmineClient {
    base: Url,
    api_key: Option<String>,
    basic_auth: Option<(String, String)>,
    protocol: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct ProjectPage {
    projects: Vec<SourceProject>,
    #[serde(default)]
    total_count: usize,
}

#[derive(Deserialize)]
struct IssuePage {
    issues: Vec<SourceIssue>,
    #[serde(default)]
    total_count: usize,
}

#[derive(Deserialize)]
struct ProjectEnvelope {
    project: SourceProject,
}

#[derive(Deserialize)]
struct IssueEnvelope {
    issue: SourceIssue,
}

#[derive(Deserialize)]
struct MembershipPage {
    memberships: Vec<Membership>,
}

#[derive(Deserialize)]
struct Membership {
    #[serde(default)]
    user: Option<super::NamedRef>,
}

impl RedmineClient {
    /// Builds a client from the `[redmine]` settings.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidUrl`] if the host is not a valid URL.
    pub fn new(settings: &RedmineSettings) -> Result<Self, SourceError> {
        let host = format!("{}/", settings.host.trim_end_matches('/'));
        let base = Url::parse(&host).map_err(|source| SourceError::InvalidUrl {
            url: settings.host.clone(),
            source,
        })?;

        let basic_auth = match (&settings.user, &settings.password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        };

        Ok(Self {
            base,
            api_key: settings.resolved_api_key(),
            basic_auth,
            protocol: settings.protocol.clone(),
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SourceError> {
        self.base.join(path).map_err(|source| SourceError::InvalidUrl {
            url: path.to_string(),
            source,
        })
    }

    fn request(&self, url: Url) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("X-Redmine-API-Key", key);
        } else if let Some((user, password)) = &self.basic_auth {
            request = request.basic_auth(user, Some(password));
        }
        request
    }

    async fn send(&self, url: Url) -> Result<reqwest::Response, SourceError> {
        let url_str = url.to_string();
        debug!(url = %url_str, "Requesting Redmine");

        let response =
            self.request(url)
                .send()
                .await
                .map_err(|source| SourceError::Connectivity {
                    url: url_str.clone(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Http {
                url: url_str,
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let mut url = self.endpoint(path)?;
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        let url_str = url.to_string();

        self.send(url)
            .await?
            .json()
            .await
            .map_err(|source| SourceError::Decode {
                url: url_str,
                source,
            })
    }

    /// Rewrites the scheme of an attachment URL when a protocol is forced.
    fn download_url(&self, content_url: &str) -> Result<Url, SourceError> {
        force_protocol(content_url, self.protocol.as_deref())
    }
}

/// Parses `content_url`, replacing its scheme with `protocol` if one is given.
pub(crate) fn force_protocol(content_url: &str, protocol: Option<&str>) -> Result<Url, SourceError> {
    let mut url = Url::parse(content_url).map_err(|source| SourceError::InvalidUrl {
        url: content_url.to_string(),
        source,
    })?;
    if let Some(protocol) = protocol {
        // http <-> https is always accepted by `set_scheme`
        let _ = url.set_scheme(protocol);
    }
    Ok(url)
}

#[async_trait]
impl SourceClient for RedmineClient {
    async fn check_connection(&self) -> Result<(), SourceError> {
        let url = self.endpoint("projects.json")?;
        self.send(url).await.map(|_| ())
    }

    async fn list_projects(&self) -> Result<Vec<SourceProject>, SourceError> {
        let mut projects = Vec::new();
        loop {
            let page: ProjectPage = self
                .get_json(
                    "projects.json",
                    &[
                        ("limit", PAGE_SIZE.to_string()),
                        ("offset", projects.len().to_string()),
                    ],
                )
                .await?;
            let received = page.projects.len();
            projects.extend(page.projects);
            if received == 0 || projects.len() >= page.total_count {
                break;
            }
        }
        Ok(projects)
    }

    async fn project_details(&self, project_id: u64) -> Result<SourceProject, SourceError> {
        let envelope: ProjectEnvelope = self
            .get_json(&format!("projects/{project_id}.json"), &[])
            .await?;
        Ok(envelope.project)
    }

    async fn issues_for_project(&self, project_id: u64) -> Result<IssueList, SourceError> {
        let mut issues = Vec::new();
        let mut total_count;
        loop {
            let page: IssuePage = self
                .get_json(
                    "issues.json",
                    &[
                        ("project_id", project_id.to_string()),
                        ("status_id", "*".to_string()),
                        ("sort", "id".to_string()),
                        ("limit", PAGE_SIZE.to_string()),
                        ("offset", issues.len().to_string()),
                    ],
                )
                .await?;
            total_count = page.total_count;
            let received = page.issues.len();
            issues.extend(page.issues);
            if received == 0 || issues.len() >= total_count {
                break;
            }
        }

        if total_count == 0 {
            return Err(SourceError::NoIssuesFound { project_id });
        }
        Ok(IssueList {
            issues,
            total_count,
        })
    }

    async fn issue_detail(&self, issue_id: u64) -> Result<SourceIssue, SourceError> {
        let envelope: IssueEnvelope = self
            .get_json(
                &format!("issues/{issue_id}.json"),
                &[("include", "attachments,journals,watchers".to_string())],
            )
            .await?;
        Ok(envelope.issue)
    }

    async fn project_members(&self, project_id: u64) -> Result<Vec<String>, SourceError> {
        let page: MembershipPage = self
            .get_json(
                &format!("projects/{project_id}/memberships.json"),
                &[("limit", PAGE_SIZE.to_string())],
            )
            .await?;
        Ok(page
            .memberships
            .into_iter()
            .filter_map(|membership| membership.user)
            .map(|user| user.name)
            .filter(|name| !name.is_empty())
            .collect())
    }

    async fn attachment_bytes(&self, attachment: &super::Attachment) -> Result<Vec<u8>, SourceError> {
        let url = self.download_url(&attachment.content_url)?;
        let url_str = url.to_string();
        let bytes = self
            .send(url)
            .await?
            .bytes()
            .await
            .map_err(|source| SourceError::Connectivity {
                url: url_str,
                source,
            })?;
        Ok(bytes.to_vec())
    }
}
