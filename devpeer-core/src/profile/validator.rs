//! Profile lookups over HTTP.

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};

use super::error::{ProfileError, ProfileResult};

/// Outcome of a successful round-trip to the profile service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    /// The service answered with a success status.
    Found,
    /// The service answered 404.
    NotFound,
}

/// Trims user input into a handle.
///
/// Handles are case-sensitive and otherwise passed through as given.
///
/// # Errors
///
/// Returns [`ProfileError::EmptyHandle`] if nothing is left after trimming.
///
/// # Examples
///
/// ```
/// use devpeer_core::profile::normalize_handle;
///
/// assert_eq!(normalize_handle("  torvalds \n").unwrap(), "torvalds");
/// assert!(normalize_handle("   ").is_err());
/// ```
pub fn normalize_handle(raw: &str) -> ProfileResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProfileError::EmptyHandle);
    }
    Ok(trimmed.to_string())
}

/// Checks whether a handle exists on the public profile service.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    /// Looks up `handle` and reports what the service said.
    ///
    /// # Errors
    ///
    /// Returns an error if the handle is empty, the request fails, or the
    /// service answers with anything other than success or 404.
    async fn lookup(&self, handle: &str) -> ProfileResult<HandleStatus>;

    /// Returns `true` only when the service confirmed the handle.
    ///
    /// Transport failures and unexpected statuses count as invalid.
    async fn is_valid_handle(&self, handle: &str) -> bool {
        match self.lookup(handle).await {
            Ok(HandleStatus::Found) => true,
            Ok(HandleStatus::NotFound) => false,
            Err(e) => {
                debug!("Treating handle {handle:?} as invalid: {e}");
                false
            }
        }
    }
}

/// [`ProfileLookup`] backed by the GitHub users API (`GET /users/{handle}`).
#[derive(Debug, Clone)]
pub struct GitHubProfileClient {
    client: Client,
    api_base_url: Url,
}

impl GitHubProfileClient {
    /// Creates a client for the API at `api_base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot carry a path or the HTTP client
    /// cannot be built.
    pub fn new(api_base_url: &str, user_agent: &str) -> ProfileResult<Self> {
        let api_base_url = Url::parse(api_base_url)
            .map_err(|e| ProfileError::InvalidUrl(format!("{api_base_url}: {e}")))?;
        if api_base_url.cannot_be_a_base() {
            return Err(ProfileError::InvalidUrl(api_base_url.to_string()));
        }

        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(Self {
            client,
            api_base_url,
        })
    }

    /// Builds `{api_base_url}/users/{handle}` with the handle as one escaped segment.
    fn user_url(&self, handle: &str) -> ProfileResult<Url> {
        let mut url = self.api_base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ProfileError::InvalidUrl(self.api_base_url.to_string()))?
            .pop_if_empty()
            .push("users")
            .push(handle);
        Ok(url)
    }
}

#[async_trait]
impl ProfileLookup for GitHubProfileClient {
    async fn lookup(&self, handle: &str) -> ProfileResult<HandleStatus> {
        let handle = normalize_handle(handle)?;
        let url = self.user_url(&handle)?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!("Profile lookup for {handle:?} returned {status}");

        if status.is_success() {
            Ok(HandleStatus::Found)
        } else if status == StatusCode::NOT_FOUND {
            Ok(HandleStatus::NotFound)
        } else {
            Err(ProfileError::UnexpectedStatus(status.as_u16()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> GitHubProfileClient {
        GitHubProfileClient::new(base, "devpeer-test").unwrap()
    }

    #[test]
    fn normalize_trims_whitespace() {
        assert_eq!(normalize_handle("\tgaearon  ").unwrap(), "gaearon");
    }

    #[test]
    fn normalize_keeps_case() {
        assert_eq!(normalize_handle("TJ").unwrap(), "TJ");
    }

    #[test]
    fn normalize_rejects_blank() {
        assert!(matches!(normalize_handle(""), Err(ProfileError::EmptyHandle)));
        assert!(matches!(
            normalize_handle(" \n "),
            Err(ProfileError::EmptyHandle)
        ));
    }

    #[test]
    fn user_url_appends_users_segment() {
        let url = client("https://api.github.com").user_url("torvalds").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/torvalds");
    }

    #[test]
    fn user_url_keeps_base_path() {
        let url = client("http://127.0.0.1:9000/github/")
            .user_url("rauchg")
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/github/users/rauchg");
    }

    #[test]
    fn user_url_escapes_separators() {
        let url = client("https://api.github.com").user_url("a/b c").unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/users/a%2Fb%20c");
    }

    #[test]
    fn new_rejects_unparseable_url() {
        assert!(matches!(
            GitHubProfileClient::new("not a url", "ua"),
            Err(ProfileError::InvalidUrl(_))
        ));
    }

    #[test]
    fn new_rejects_cannot_be_a_base_url() {
        assert!(matches!(
            GitHubProfileClient::new("mailto:octocat@github.com", "ua"),
            Err(ProfileError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn lookup_rejects_empty_handle_without_request() {
        // Port 9 is discard; an attempted request would surface as Transport.
        let lookup = client("http://127.0.0.1:9");
        let result = lookup.lookup("   ").await;
        assert!(matches!(result, Err(ProfileError::EmptyHandle)));
    }
}
