//! Main authentication service implementation

use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::entities::account::{Account, Credentials};
use crate::domain::entities::token::SessionMetadata;
use crate::domain::value_objects::{AccountView, AuthRequest, AuthResponse, RegisterRequest};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, RefreshTokenRepository};
use crate::services::password::PasswordVerifier;
use crate::services::token::{RefreshTokenLedger, TokenService};

/// Authentication service orchestrating the full session lifecycle
///
/// A session credential pair moves through
/// `ISSUED -> ACTIVE -> {ROTATED | REVOKED | EXPIRED}`; the terminal states
/// are reached by rotation on refresh, bulk revocation on logout, or the
/// ledger record outliving its expiry.
pub struct AuthService<A, R>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
{
    /// Credential store holding account records
    accounts: Arc<A>,
    /// One-way password hashing and verification
    password_verifier: PasswordVerifier,
    /// Signer/verifier for access and refresh tokens
    token_service: TokenService,
    /// Persisted refresh token ledger with rotate-on-use
    ledger: RefreshTokenLedger<R>,
}

impl<A, R> AuthService<A, R>
where
    A: AccountRepository,
    R: RefreshTokenRepository,
{
    /// Create a new authentication service
    pub fn new(
        accounts: Arc<A>,
        password_verifier: PasswordVerifier,
        token_service: TokenService,
        ledger: RefreshTokenLedger<R>,
    ) -> Self {
        Self {
            accounts,
            password_verifier,
            token_service,
            ledger,
        }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// * `AuthError::DuplicateUsername` / `AuthError::DuplicateEmail` -
    ///   an account with that identifier already exists
    /// * `DomainError::Validation` - a field fails the shape checks
    ///
    /// The returned view never contains the password hash.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<AccountView> {
        validate_registration(&request)?;

        if self.accounts.exists_by_username(&request.username).await? {
            return Err(AuthError::DuplicateUsername.into());
        }
        if self.accounts.exists_by_email(&request.email).await? {
            return Err(AuthError::DuplicateEmail.into());
        }

        let password_hash = self.password_verifier.hash(&request.password)?;
        let account = Account::new(
            request.username,
            request.email,
            password_hash,
            request.first_name,
            request.last_name,
        );

        let saved = self.accounts.save(account).await?;
        info!(username = %saved.username, "account registered");

        Ok(AccountView::from(&saved))
    }

    /// Authenticate a user and issue a token pair
    ///
    /// Unknown identifier and wrong password both fail with
    /// `AuthError::InvalidCredentials`; the miss path burns an equivalent
    /// bcrypt verification so the two are not distinguishable by timing.
    pub async fn login(
        &self,
        request: AuthRequest,
        metadata: SessionMetadata,
    ) -> DomainResult<AuthResponse> {
        let account = match self
            .accounts
            .find_by_username_or_email(&request.username_or_email)
            .await?
        {
            Some(account) => account,
            None => {
                self.password_verifier.dummy_verify(&request.password);
                warn!("login rejected: unknown identifier");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self
            .password_verifier
            .verify(&request.password, account.credential_hash())
        {
            warn!(username = %account.username, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        if account.locked {
            warn!(username = %account.username, "login rejected: account locked");
            return Err(AuthError::AccountLocked.into());
        }
        if !account.can_authenticate() {
            warn!(username = %account.username, "login rejected: account disabled");
            return Err(AuthError::AccountDisabled.into());
        }

        let response = self.issue_session(&account, metadata).await?;

        let mut account = account;
        account.record_login();
        self.accounts.save(account).await?;

        Ok(response)
    }

    /// Exchange a refresh token for a fresh token pair, rotating the old one
    ///
    /// Every internal rejection (unknown, revoked, expired, wrong type,
    /// orphaned) collapses outward to `AuthError::InvalidRefreshToken`; the
    /// logs keep the distinction. A rotated token replayed any number of
    /// times keeps failing through the revoked path, and of N concurrent
    /// calls with the same token at most one wins the ledger's
    /// compare-and-set.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        metadata: SessionMetadata,
    ) -> DomainResult<AuthResponse> {
        // The signed token must verify before the ledger is consulted
        let claims = self
            .token_service
            .verify(refresh_token)
            .map_err(|e| collapse_refresh_error(e, "signature"))?;

        if !claims.is_refresh_token() {
            warn!("refresh rejected: access token presented");
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let record = self
            .ledger
            .validate(refresh_token)
            .await
            .map_err(|e| collapse_refresh_error(e, "ledger"))?;

        let account = self
            .accounts
            .find_by_id(record.account_id)
            .await?
            .ok_or_else(|| {
                warn!("refresh rejected: account no longer exists");
                DomainError::from(AuthError::InvalidRefreshToken)
            })?;

        if claims.sub != account.username || !account.can_authenticate() {
            warn!(username = %account.username, "refresh rejected: account unusable");
            return Err(AuthError::InvalidRefreshToken.into());
        }

        // Consume the old record before its replacement exists
        self.ledger
            .rotate(&record)
            .await
            .map_err(|e| collapse_refresh_error(e, "rotation"))?;

        self.issue_session(&account, metadata).await
    }

    /// Verify a bearer token for request authorization and return its subject
    ///
    /// Accepts the token with or without the `Bearer ` scheme prefix.
    /// Refresh tokens are not valid here.
    pub fn authenticate_request(&self, bearer_token: &str) -> DomainResult<String> {
        let token = bearer_token
            .strip_prefix("Bearer ")
            .unwrap_or(bearer_token)
            .trim();

        let claims = self.token_service.verify(token)?;
        if claims.is_refresh_token() {
            return Err(TokenError::WrongTokenType.into());
        }

        Ok(claims.sub)
    }

    /// Revoke every live refresh token of an account (logout everywhere)
    pub async fn logout(&self, account_id: Uuid) -> DomainResult<usize> {
        let revoked = self.ledger.revoke_all_for(account_id).await?;
        info!(%account_id, revoked, "sessions revoked");
        Ok(revoked)
    }

    /// Issue an access+refresh pair and persist the refresh record
    async fn issue_session(
        &self,
        account: &Account,
        metadata: SessionMetadata,
    ) -> DomainResult<AuthResponse> {
        let access_token = self.token_service.issue_access_token(account.identifier())?;
        let refresh_token = self.token_service.issue_refresh_token(account.identifier())?;

        self.ledger
            .issue(account.id, &refresh_token, metadata)
            .await?;

        info!(username = %account.username, "session issued");

        Ok(AuthResponse::bearer(
            access_token,
            refresh_token,
            self.token_service.config().access_expiry_secs(),
        ))
    }
}

/// Collapse internal refresh failures into the single outward error
///
/// Infrastructure errors pass through untouched: a storage outage must stay
/// retryable and never read as a bad token.
fn collapse_refresh_error(err: DomainError, stage: &str) -> DomainError {
    match err {
        DomainError::Token(reason) => {
            warn!(%reason, stage, "refresh token rejected");
            AuthError::InvalidRefreshToken.into()
        }
        other => other,
    }
}

fn validate_registration(request: &RegisterRequest) -> DomainResult<()> {
    let username_len = request.username.chars().count();
    if !(3..=50).contains(&username_len) {
        return Err(DomainError::Validation {
            message: "username must be between 3 and 50 characters".to_string(),
        });
    }
    if !request.email.contains('@') || request.email.starts_with('@') || request.email.ends_with('@')
    {
        return Err(DomainError::Validation {
            message: "email should be valid".to_string(),
        });
    }
    if request.password.chars().count() < 6 {
        return Err(DomainError::Validation {
            message: "password must be at least 6 characters".to_string(),
        });
    }
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(DomainError::Validation {
            message: "first and last name are required".to_string(),
        });
    }
    Ok(())
}
