//! Directory access over REST.

use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, Response, Url};

use super::error::{DirectoryError, DirectoryResult};
use super::types::UserRecord;

/// What [`UserDirectory::register`] ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// No record existed for the handle, so one was created.
    Created,
    /// A record for the handle already existed; nothing was written.
    AlreadyRegistered,
    /// The lookup or the create failed. The failure was logged.
    Failed(String),
}

impl RegistrationOutcome {
    /// Returns true unless registration failed.
    #[must_use]
    pub const fn is_registered(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// The remote set of registered users.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the records whose handle equals `handle` (normally zero or one).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be reached or answers badly.
    async fn find_by_handle(&self, handle: &str) -> DirectoryResult<Vec<UserRecord>>;

    /// Creates a record. The directory assigns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be reached or rejects the record.
    async fn create(&self, record: &UserRecord) -> DirectoryResult<()>;

    /// Returns every registered user in backend order.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be reached or answers badly.
    async fn fetch_all(&self) -> DirectoryResult<Vec<UserRecord>>;

    /// Creates a record for `record.handle` unless one already exists.
    ///
    /// Never fails: errors are logged and reported as
    /// [`RegistrationOutcome::Failed`]. The lookup and the create are separate
    /// requests, so concurrent registrations of one handle can both create.
    async fn register(&self, record: &UserRecord) -> RegistrationOutcome {
        match self.find_by_handle(&record.handle).await {
            Ok(existing) if !existing.is_empty() => {
                debug!(
                    "{} already registered ({} record(s))",
                    record.handle,
                    existing.len()
                );
                RegistrationOutcome::AlreadyRegistered
            }
            Ok(_) => match self.create(record).await {
                Ok(()) => {
                    info!("Registered {} in the directory", record.handle);
                    RegistrationOutcome::Created
                }
                Err(e) => {
                    error!("User registration error: {e}");
                    RegistrationOutcome::Failed(e.to_string())
                }
            },
            Err(e) => {
                error!("User registration error: {e}");
                RegistrationOutcome::Failed(e.to_string())
            }
        }
    }
}

/// [`UserDirectory`] backed by the DevPeer REST backend.
///
/// | Operation | Request |
/// |-----------|---------|
/// | `find_by_handle` | `GET /users?username={handle}` |
/// | `create` | `POST /users` |
/// | `fetch_all` | `GET /users` |
///
/// No timeouts are configured beyond the transport defaults.
#[derive(Debug, Clone)]
pub struct HttpDirectoryClient {
    client: Client,
    users_url: Url,
}

impl HttpDirectoryClient {
    /// Creates a client for the directory at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not usable as a base or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> DirectoryResult<Self> {
        let mut users_url = Url::parse(base_url)
            .map_err(|e| DirectoryError::InvalidUrl(format!("{base_url}: {e}")))?;
        users_url
            .path_segments_mut()
            .map_err(|()| DirectoryError::InvalidUrl(base_url.to_string()))?
            .pop_if_empty()
            .push("users");

        let client = Client::builder().build()?;

        Ok(Self { client, users_url })
    }

    /// The collection URL all requests target.
    #[must_use]
    pub const fn users_url(&self) -> &Url {
        &self.users_url
    }

    fn check_status(&self, response: Response) -> DirectoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(DirectoryError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.users_url.to_string(),
            })
        }
    }

    async fn decode_records(&self, response: Response) -> DirectoryResult<Vec<UserRecord>> {
        let response = self.check_status(response)?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl UserDirectory for HttpDirectoryClient {
    async fn find_by_handle(&self, handle: &str) -> DirectoryResult<Vec<UserRecord>> {
        let response = self
            .client
            .get(self.users_url.clone())
            .query(&[("username", handle)])
            .send()
            .await?;
        self.decode_records(response).await
    }

    async fn create(&self, record: &UserRecord) -> DirectoryResult<()> {
        let response = self
            .client
            .post(self.users_url.clone())
            .json(record)
            .send()
            .await?;
        self.check_status(response)?;
        Ok(())
    }

    async fn fetch_all(&self) -> DirectoryResult<Vec<UserRecord>> {
        let response = self.client.get(self.users_url.clone()).send().await?;
        let records = self.decode_records(response).await?;
        debug!("Fetched {} user(s) from the directory", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn users_url_from_bare_host() {
        let client = HttpDirectoryClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.users_url().as_str(), "http://localhost:3000/users");
    }

    #[test]
    fn users_url_keeps_base_path() {
        let client = HttpDirectoryClient::new("http://10.0.0.5:3000/api/").unwrap();
        assert_eq!(client.users_url().as_str(), "http://10.0.0.5:3000/api/users");
    }

    #[test]
    fn new_rejects_invalid_url() {
        assert!(matches!(
            HttpDirectoryClient::new("localhost:3000:xyz"),
            Err(DirectoryError::InvalidUrl(_))
        ));
    }

    #[test]
    fn registration_outcome_is_registered() {
        assert!(RegistrationOutcome::Created.is_registered());
        assert!(RegistrationOutcome::AlreadyRegistered.is_registered());
        assert!(!RegistrationOutcome::Failed("boom".to_string()).is_registered());
    }
}
