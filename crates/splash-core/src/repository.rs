use crate::entry::LinkEntry;
use crate::error::Result;
use crate::username::Username;
use async_trait::async_trait;

/// Storage interface for redirect links.
///
/// Implementations own the backing document exclusively for the
/// duration of one call; no state is held across calls.
#[async_trait]
pub trait LinkRepository: Send + Sync + 'static {
    /// Resolves an identifier to its entry, searching every namespace.
    /// Returns `None` if the id does not exist. No ownership check:
    /// this backs the public redirect path.
    async fn lookup(&self, id: &str) -> Result<Option<LinkEntry>>;

    /// Returns the entries visible to `username`: the user's own
    /// namespace, or every entry when the document is still in the
    /// legacy flat layout.
    async fn list(&self, username: &Username) -> Result<Vec<LinkEntry>>;

    /// Inserts a new entry under `username`.
    /// Fails with `DuplicateId` if the id exists anywhere in the
    /// document, leaving the document untouched.
    async fn create(&self, username: &Username, entry: LinkEntry) -> Result<()>;

    /// Removes an entry and its stored image (best-effort).
    ///
    /// In the legacy flat layout no requester is needed and no
    /// ownership is enforced. In the nested layout a missing requester
    /// is `Unauthorized` and a non-owner is `Forbidden`.
    async fn delete(&self, requester: Option<&Username>, id: &str) -> Result<()>;

    /// Guarantees a namespace exists for `username`, migrating a flat
    /// document first. Called when an account is registered.
    async fn ensure_namespace(&self, username: &Username) -> Result<()>;
}

/// Storage interface for account credentials.
#[async_trait]
pub trait CredentialRepository: Send + Sync + 'static {
    /// Stores a credential for a new account.
    /// Fails with `UsernameTaken` if the name is already registered.
    async fn register(&self, username: &Username, password: &str) -> Result<()>;

    /// Verifies a password. Unknown usernames and wrong passwords both
    /// fail with the same `InvalidCredentials`.
    async fn authenticate(&self, username: &Username, password: &str) -> Result<()>;
}
