//! crates/resumelens_core/src/session.rs
//!
//! The session store: holds the at-most-one logged-in identity, persists it
//! through the `SessionRepository` port, and fakes the latency a real
//! credential check would have. Login always succeeds in this mock; there is
//! no token expiry, refresh, or multi-session concept.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::domain::{Provider, UserIdentity};
use crate::ports::{Clock, PortError, PortResult, SessionRepository};

/// Pause between reading the persisted session and clearing the restoring
/// flag, so consumers can avoid a flash of an unauthenticated view.
pub const RESTORE_GRACE: Duration = Duration::from_millis(200);

/// Simulated latency for login, signup, and social login.
pub const AUTH_LATENCY: Duration = Duration::from_millis(500);

/// Display name assigned by the credential-less login path.
pub const DEMO_DISPLAY_NAME: &str = "Demo User";

//=========================================================================================
// Store State
//=========================================================================================

/// A consistent view of the store, read under a single lock.
///
/// The two fields span four observable states: restoring with nothing known
/// yet, restored-but-within-grace, anonymous, and authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// True until `restore` has finished (including its grace pause).
    pub restoring: bool,
    pub user: Option<UserIdentity>,
}

#[derive(Debug)]
struct SessionInner {
    user: Option<UserIdentity>,
    restoring: bool,
}

//=========================================================================================
// SessionStore
//=========================================================================================

/// Single-instance session state, constructed once at process start and
/// shared by reference with every consumer.
pub struct SessionStore {
    repo: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
    inner: Arc<Mutex<SessionInner>>,
    /// Taken for the whole install-then-persist span of every mutation, so
    /// overlapping completions cannot leave memory and the repository
    /// naming different sessions.
    commit_gate: Arc<tokio::sync::Mutex<()>>,
}

impl SessionStore {
    /// Creates a store in the initial "unknown" phase. Nothing is read from
    /// the repository until [`restore`](Self::restore) runs.
    pub fn new(repo: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            clock,
            inner: Arc::new(Mutex::new(SessionInner {
                user: None,
                restoring: true,
            })),
            commit_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Attempts to recover a persisted identity. A corrupt or unreadable
    /// entry is logged and treated as anonymous; it is never surfaced. The
    /// restoring flag clears only after the grace pause.
    pub async fn restore(&self) {
        match self.repo.load().await {
            Ok(Some(identity)) => {
                info!(email = %identity.email, "restored persisted session");
                self.inner.lock().user = Some(identity);
            }
            Ok(None) => {
                info!("no persisted session found");
            }
            Err(e) => {
                warn!("failed to restore persisted session: {e}");
            }
        }
        self.clock.sleep(RESTORE_GRACE).await;
        self.inner.lock().restoring = false;
    }

    /// Fake login: any credentials are accepted and the password is ignored.
    ///
    /// The returned future resolves after [`AUTH_LATENCY`]. The error arm
    /// exists for real replacements to signal invalid credentials as an
    /// error kind; this mock only produces it if the completion task dies.
    pub async fn login(&self, email: &str, _password: &str) -> PortResult<UserIdentity> {
        info!(email, "attempting login");
        self.complete_auth(UserIdentity {
            name: DEMO_DISPLAY_NAME.to_string(),
            email: email.to_string(),
        })
        .await
    }

    /// Fake signup: identical to login except the identity carries the
    /// supplied display name.
    pub async fn signup(&self, name: &str, email: &str, _password: &str) -> PortResult<UserIdentity> {
        info!(name, email, "attempting signup");
        self.complete_auth(UserIdentity {
            name: name.to_string(),
            email: email.to_string(),
        })
        .await
    }

    /// Fake social login: produces the provider's deterministic identity.
    pub async fn social_login(&self, provider: Provider) -> PortResult<UserIdentity> {
        info!(provider = %provider, "attempting social login");
        self.complete_auth(UserIdentity {
            name: format!("{} User", provider.label()),
            email: format!("{}@example.com", provider.as_str()),
        })
        .await
    }

    /// Drops the current identity and best-effort clears the persisted
    /// entry. Always succeeds and involves no simulated delay.
    pub async fn logout(&self) {
        let _commit = self.commit_gate.lock().await;
        self.inner.lock().user = None;
        if let Err(e) = self.repo.clear().await {
            warn!("failed to clear persisted session: {e}");
        }
        info!("logged out");
    }

    pub fn current_user(&self) -> Option<UserIdentity> {
        self.inner.lock().user.clone()
    }

    pub fn is_restoring(&self) -> bool {
        self.inner.lock().restoring
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock();
        SessionSnapshot {
            restoring: inner.restoring,
            user: inner.user.clone(),
        }
    }

    /// Runs the delayed tail of an auth operation on a spawned task so a
    /// dropped caller cannot abort the timer: once started, the identity
    /// lands no matter what happens to the request that asked for it. The
    /// commit gate keeps simultaneous completions from splitting the
    /// in-memory session and the persisted one.
    async fn complete_auth(&self, identity: UserIdentity) -> PortResult<UserIdentity> {
        let repo = Arc::clone(&self.repo);
        let clock = Arc::clone(&self.clock);
        let inner = Arc::clone(&self.inner);
        let gate = Arc::clone(&self.commit_gate);

        let task = tokio::spawn(async move {
            clock.sleep(AUTH_LATENCY).await;
            // Commit whole relative to other completions and to logout.
            let _commit = gate.lock().await;
            inner.lock().user = Some(identity.clone());
            // Write-through persistence. A failed write only costs the
            // session its durability, so it is logged and swallowed.
            if let Err(e) = repo.save(&identity).await {
                warn!("failed to persist session: {e}");
            }
            identity
        });

        match task.await {
            Ok(identity) => {
                info!(email = %identity.email, "session established");
                Ok(identity)
            }
            Err(e) => {
                error!("auth completion task failed: {e}");
                Err(PortError::Unexpected(e.to_string()))
            }
        }
    }
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MemoryRepo, VirtualClock};

    fn store_with(repo: Arc<MemoryRepo>) -> Arc<SessionStore> {
        let clock = Arc::new(VirtualClock::new(1_700_000_000_000));
        Arc::new(SessionStore::new(repo, clock))
    }

    #[tokio::test(start_paused = true)]
    async fn restore_with_empty_storage_clears_loading_after_grace() {
        let store = store_with(Arc::new(MemoryRepo::new()));
        assert!(store.is_restoring());

        let started = tokio::time::Instant::now();
        let handle = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.restore().await })
        };
        tokio::task::yield_now().await;
        assert!(store.is_restoring(), "flag must stay set during the grace pause");

        handle.await.unwrap();
        assert!(!store.is_restoring());
        assert_eq!(store.current_user(), None);
        assert_eq!(started.elapsed(), RESTORE_GRACE);
    }

    #[tokio::test(start_paused = true)]
    async fn restore_recovers_persisted_identity() {
        let identity = UserIdentity {
            name: "Demo User".to_string(),
            email: "kept@example.com".to_string(),
        };
        let store = store_with(Arc::new(MemoryRepo::with_identity(identity.clone())));

        store.restore().await;
        assert_eq!(store.current_user(), Some(identity));
        assert!(!store.is_restoring());
    }

    #[tokio::test(start_paused = true)]
    async fn corrupt_persistence_restores_to_anonymous() {
        let store = store_with(Arc::new(MemoryRepo::corrupted()));

        store.restore().await;
        let snapshot = store.snapshot();
        assert!(!snapshot.restoring);
        assert_eq!(snapshot.user, None);
    }

    #[tokio::test(start_paused = true)]
    async fn login_installs_and_persists_demo_identity() {
        let repo = Arc::new(MemoryRepo::new());
        let store = store_with(Arc::clone(&repo));
        store.restore().await;

        let started = tokio::time::Instant::now();
        let identity = store.login("a@b.com", "x").await.unwrap();
        assert_eq!(started.elapsed(), AUTH_LATENCY);

        assert_eq!(identity.name, DEMO_DISPLAY_NAME);
        assert_eq!(identity.email, "a@b.com");
        assert_eq!(store.current_user(), Some(identity.clone()));
        // Round-trips through the repository unchanged.
        assert_eq!(repo.stored(), Some(identity));
    }

    #[tokio::test(start_paused = true)]
    async fn most_recent_auth_wins() {
        let repo = Arc::new(MemoryRepo::new());
        let store = store_with(Arc::clone(&repo));
        store.restore().await;

        store.login("first@example.com", "pw").await.unwrap();
        store.signup("Ada", "ada@example.com", "pw").await.unwrap();
        let last = store.social_login(Provider::Google).await.unwrap();

        assert_eq!(store.current_user(), Some(last.clone()));
        assert_eq!(repo.stored(), Some(last));
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_logins_commit_memory_and_persistence_together() {
        let repo = Arc::new(MemoryRepo::stalling_save(
            "slow@example.com",
            Duration::from_millis(100),
        ));
        let store = store_with(Arc::clone(&repo));
        store.restore().await;

        let first = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.login("slow@example.com", "pw").await })
        };
        // Stagger the second login into the first one's latency window.
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.login("fast@example.com", "pw").await })
        };

        first.await.unwrap().unwrap();
        let winner = second.await.unwrap().unwrap();
        assert_eq!(winner.email, "fast@example.com");

        // The stalled write finishes after the second login starts, but it
        // cannot land on top of the second login's commit.
        assert_eq!(store.current_user(), Some(winner.clone()));
        assert_eq!(repo.stored(), Some(winner));
    }

    #[tokio::test(start_paused = true)]
    async fn social_login_identities_are_deterministic() {
        let store = store_with(Arc::new(MemoryRepo::new()));
        store.restore().await;

        let google = store.social_login(Provider::Google).await.unwrap();
        assert_eq!(google.name, "Google User");
        assert_eq!(google.email, "google@example.com");

        let linkedin = store.social_login(Provider::Linkedin).await.unwrap();
        assert_eq!(linkedin.name, "Linkedin User");
        assert_eq!(linkedin.email, "linkedin@example.com");
    }

    #[tokio::test(start_paused = true)]
    async fn logout_clears_memory_and_persistence() {
        let repo = Arc::new(MemoryRepo::new());
        let store = store_with(Arc::clone(&repo));
        store.restore().await;
        store.login("gone@example.com", "pw").await.unwrap();

        store.logout().await;
        assert_eq!(store.current_user(), None);
        assert_eq!(repo.stored(), None);

        // A fresh process restoring from the same repository stays anonymous.
        let next = store_with(repo);
        next.restore().await;
        assert_eq!(next.current_user(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_persistence_write_does_not_reject_the_login() {
        let repo = Arc::new(MemoryRepo::failing_writes());
        let store = store_with(repo);
        store.restore().await;

        let identity = store.login("still@here.com", "pw").await.unwrap();
        assert_eq!(store.current_user(), Some(identity));
    }
}
