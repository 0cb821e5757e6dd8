//! In-process identity provider.
//!
//! Accounts live in memory for the lifetime of the process. Passwords are
//! stored as Argon2id hashes and ID tokens are HS256 JWTs signed with the
//! configured secret.

use std::collections::HashMap;

use async_trait::async_trait;
use dissio_core::error::{codes, ProviderError};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::identity::{
    AccountUpdate, AuthResult, CreatedAccount, Identity, IdentityProvider, SignIn,
};
use super::password::{hash_password, verify_password};
use super::token::{decode_token, issue_token, TokenConfig};

#[derive(Debug, Clone)]
struct Account {
    email: String,
    display_name: String,
    password_hash: String,
}

fn user_not_found(uid: &str) -> ProviderError {
    ProviderError::new(
        codes::AUTH_USER_NOT_FOUND,
        format!("There is no account with uid {uid}"),
    )
}

fn email_taken() -> ProviderError {
    ProviderError::new(
        codes::AUTH_ALREADY_EXISTS,
        "The email address is already in use by another account",
    )
}

pub struct LocalIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    tokens: TokenConfig,
}

impl LocalIdentityProvider {
    pub fn new(tokens: TokenConfig) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            tokens,
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> AuthResult<CreatedAccount> {
        let password_hash = hash_password(password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == email) {
            return Err(email_taken());
        }

        let uid = Uuid::new_v4().simple().to_string();
        accounts.insert(
            uid.clone(),
            Account {
                email: email.to_string(),
                display_name: display_name.to_string(),
                password_hash,
            },
        );
        tracing::debug!(uid = %uid, "Account created");

        Ok(CreatedAccount { uid })
    }

    async fn verify_token(&self, token: &str) -> AuthResult<Identity> {
        let claims = decode_token(token, &self.tokens)?;

        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&claims.sub)
            .ok_or_else(|| user_not_found(&claims.sub))?;

        Ok(Identity {
            uid: claims.sub.clone(),
            email: account.email.clone(),
            display_name: account.display_name.clone(),
        })
    }

    async fn update_account(&self, uid: &str, update: &AccountUpdate) -> AuthResult<()> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &update.email {
            if accounts.iter().any(|(id, a)| id != uid && &a.email == email) {
                return Err(email_taken());
            }
        }

        let account = accounts.get_mut(uid).ok_or_else(|| user_not_found(uid))?;
        if let Some(email) = &update.email {
            account.email = email.clone();
        }
        if let Some(display_name) = &update.display_name {
            account.display_name = display_name.clone();
        }
        Ok(())
    }

    async fn delete_account(&self, uid: &str) -> AuthResult<()> {
        self.accounts
            .write()
            .await
            .remove(uid)
            .map(|_| ())
            .ok_or_else(|| user_not_found(uid))
    }

    async fn sign_in(&self, email: &str, password: &str) -> AuthResult<SignIn> {
        let invalid =
            || ProviderError::new(codes::AUTH_INVALID_CREDENTIAL, "Invalid email or password");

        let found = {
            let accounts = self.accounts.read().await;
            accounts
                .iter()
                .find(|(_, a)| a.email == email)
                .map(|(uid, a)| (uid.clone(), a.clone()))
        };
        // Unknown email and wrong password are indistinguishable to callers.
        let (uid, account) = found.ok_or_else(invalid)?;
        if !verify_password(password, &account.password_hash)? {
            return Err(invalid());
        }

        let id_token = issue_token(&uid, &account.email, &account.display_name, &self.tokens)?;
        Ok(SignIn {
            id_token,
            uid,
            expires_in: self.tokens.expires_in_secs(),
        })
    }
}
