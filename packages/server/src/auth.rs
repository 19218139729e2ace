//! Phone-number accounts and bearer sessions.
//!
//! Accounts are held in memory for the life of the process; sessions
//! expire after [`SESSION_TTL_HOURS`]. A request is signed in when it
//! carries `Authorization: Bearer <token>` or the [`SESSION_COOKIE`] cookie
//! with a live session.

use std::{
    collections::BTreeMap,
    sync::{PoisonError, RwLock},
};

use actix_web::{HttpRequest, http::header};
use air_map_server_models::{SignUpRequest, UserProfile};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "air_map_session";

/// Session lifetime.
pub const SESSION_TTL_HOURS: i64 = 24 * 7;

/// Phone number that is always reported as taken.
pub const RESERVED_PHONE: &str = "9999999999";

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

/// Sign-up and sign-in failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The phone number is already registered.
    #[error("User already exists with this phone number.")]
    AlreadyExists,
    /// No account has that phone number.
    #[error("User not found. Please sign up.")]
    NotFound,
}

/// Account and session storage.
pub trait SessionStore: Send + Sync {
    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// * [`AuthError::AlreadyExists`] if the phone is taken
    fn sign_up(&self, request: SignUpRequest) -> Result<UserProfile, AuthError>;

    /// Looks up an account by phone.
    ///
    /// # Errors
    ///
    /// * [`AuthError::NotFound`] if no account has that phone
    fn sign_in(&self, phone: &str) -> Result<UserProfile, AuthError>;

    /// Opens a session and returns its token.
    fn start_session(&self, user: UserProfile) -> String;

    /// The user a token belongs to.
    fn session(&self, token: &str) -> Option<UserProfile>;

    /// Ends a session. Returns whether it existed.
    fn end_session(&self, token: &str) -> bool;
}

#[derive(Debug, Clone)]
struct Session {
    user: UserProfile,
    expires_at: DateTime<Utc>,
}

/// Process-local [`SessionStore`]. Expired sessions are dropped whenever a
/// new one starts.
#[derive(Debug)]
pub struct InMemorySessionStore {
    users: RwLock<BTreeMap<String, UserProfile>>,
    sessions: RwLock<BTreeMap<String, Session>>,
    ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::hours(SESSION_TTL_HOURS))
    }
}

impl InMemorySessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store whose sessions last `ttl`.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            users: RwLock::default(),
            sessions: RwLock::default(),
            ttl,
        }
    }

    /// Number of sessions currently held, expired or not.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn random_user_id(rng: &mut impl Rng) -> String {
    let suffix: String = (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
        .collect();
    format!("user_{suffix}")
}

impl SessionStore for InMemorySessionStore {
    fn sign_up(&self, request: SignUpRequest) -> Result<UserProfile, AuthError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if request.phone == RESERVED_PHONE || users.contains_key(&request.phone) {
            return Err(AuthError::AlreadyExists);
        }

        let user = UserProfile {
            id: random_user_id(&mut rand::thread_rng()),
            full_name: request.full_name,
            phone: request.phone,
            role: request.role,
            email: request.email.filter(|e| !e.trim().is_empty()),
        };
        users.insert(user.phone.clone(), user.clone());
        log::info!("Registered {} as {}", user.id, user.role);
        Ok(user)
    }

    fn sign_in(&self, phone: &str) -> Result<UserProfile, AuthError> {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(phone)
            .cloned()
            .ok_or(AuthError::NotFound)
    }

    fn start_session(&self, user: UserProfile) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions.retain(|_, s| s.expires_at > now);
        sessions.insert(
            token.clone(),
            Session {
                user,
                expires_at: now + self.ttl,
            },
        );
        token
    }

    fn session(&self, token: &str) -> Option<UserProfile> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .filter(|s| s.expires_at > Utc::now())
            .map(|s| s.user.clone())
    }

    fn end_session(&self, token: &str) -> bool {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }
}

/// Session tokens a request carries, header first, then cookie.
#[must_use]
pub fn session_tokens(req: &HttpRequest) -> Vec<String> {
    let bearer = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let cookie = req
        .cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty());

    let mut tokens: Vec<String> = bearer.into_iter().collect();
    if let Some(cookie) = cookie.filter(|c| !tokens.contains(c)) {
        tokens.push(cookie);
    }
    tokens
}

/// The signed-in user for a request: the first carried token with a live
/// session.
#[must_use]
pub fn current_user(req: &HttpRequest, store: &dyn SessionStore) -> Option<UserProfile> {
    session_tokens(req)
        .iter()
        .find_map(|token| store.session(token))
}
