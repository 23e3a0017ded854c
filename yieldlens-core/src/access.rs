//! Access gating for wallet-only pool categories.
//!
//! A [`Session`] combines a wallet connection and an email login. Gated
//! categories (see [`PoolCategory::is_gated`]) are visible once either is active.

use async_trait::async_trait;

use crate::{PoolCategory, UserAuth, WalletConnection, YieldError};

/// Accounts and chain reported by a wallet provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletAccounts {
    /// Authorized accounts; the first one is treated as active.
    pub accounts: Vec<String>,
    /// Chain id as a `0x`-prefixed hex string, as wallets report it.
    pub chain_id: Option<String>,
}

/// Capability interface for a browser-style wallet (account request, chain id).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the wallet to authorize accounts.
    async fn connect(&self) -> Result<WalletAccounts, YieldError>;

    /// Release the connection. Wallets without an explicit disconnect can rely
    /// on the default.
    async fn disconnect(&self) -> Result<(), YieldError> {
        Ok(())
    }

    /// Accounts currently authorized, without prompting.
    async fn current_accounts(&self) -> Result<WalletAccounts, YieldError>;
}

/// Parse a wallet chain id such as `"0x1"` or `"0xa4b1"`.
fn parse_chain_id(hex: &str) -> Result<u64, YieldError> {
    let trimmed = hex.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u64::from_str_radix(digits, 16)
        .map_err(|_| YieldError::InvalidArg(format!("invalid chain id: {hex}")))
}

/// Wallet and login state for one dashboard user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    wallet: WalletConnection,
    auth: UserAuth,
}

impl Session {
    /// A fresh session: no wallet, not logged in.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wallet connection.
    #[must_use]
    pub const fn wallet(&self) -> &WalletConnection {
        &self.wallet
    }

    /// Current login state.
    #[must_use]
    pub const fn auth(&self) -> &UserAuth {
        &self.auth
    }

    /// Request accounts from `provider` and record the first one.
    ///
    /// # Errors
    /// Returns the provider's error unchanged, `Wallet` when no account was
    /// authorized, or `InvalidArg` for an unparseable chain id. The session is
    /// left untouched on error.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, provider), err))]
    pub async fn connect_wallet(&mut self, provider: &dyn WalletProvider) -> Result<(), YieldError> {
        let reported = provider.connect().await?;
        let Some(address) = reported.accounts.first().cloned() else {
            return Err(YieldError::Wallet("no accounts authorized".into()));
        };
        let chain_id = reported
            .chain_id
            .as_deref()
            .map(parse_chain_id)
            .transpose()?;
        self.wallet = WalletConnection {
            is_connected: true,
            address: Some(address),
            chain_id,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(chain_id = ?self.wallet.chain_id, "wallet connected");
        Ok(())
    }

    /// Re-read accounts from `provider` without prompting and apply them as an
    /// account change.
    ///
    /// # Errors
    /// Returns the provider's error; the session is left untouched.
    pub async fn refresh(&mut self, provider: &dyn WalletProvider) -> Result<(), YieldError> {
        let reported = provider.current_accounts().await?;
        self.on_accounts_changed(&reported.accounts);
        if self.wallet.is_connected
            && let Some(hex) = reported.chain_id.as_deref()
        {
            self.on_chain_changed(hex)?;
        }
        Ok(())
    }

    /// Forget the wallet connection.
    pub fn disconnect_wallet(&mut self) {
        self.wallet = WalletConnection::default();
    }

    /// Release the wallet through `provider`, then forget the connection.
    ///
    /// # Errors
    /// Returns the provider's error; the local connection is cleared regardless.
    pub async fn disconnect_wallet_with(
        &mut self,
        provider: &dyn WalletProvider,
    ) -> Result<(), YieldError> {
        self.disconnect_wallet();
        provider.disconnect().await
    }

    /// Apply an `accountsChanged` notification. An empty list disconnects.
    pub fn on_accounts_changed(&mut self, accounts: &[String]) {
        match accounts.first() {
            None => self.disconnect_wallet(),
            Some(first) => {
                self.wallet.is_connected = true;
                self.wallet.address = Some(first.clone());
            }
        }
    }

    /// Apply a `chainChanged` notification carrying a hex chain id.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `hex` is not a hexadecimal number.
    pub fn on_chain_changed(&mut self, hex: &str) -> Result<(), YieldError> {
        self.wallet.chain_id = Some(parse_chain_id(hex)?);
        Ok(())
    }

    /// Log in with email and password. Any non-empty pair is accepted.
    ///
    /// # Errors
    /// Returns `InvalidArg` when either field is empty.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), YieldError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(YieldError::InvalidArg("invalid credentials".into()));
        }
        self.auth = UserAuth {
            is_logged_in: true,
            email: Some(email.trim().to_string()),
        };
        Ok(())
    }

    /// Clear the login.
    pub fn logout(&mut self) {
        self.auth = UserAuth::default();
    }

    /// True when a wallet is connected or the user is logged in.
    #[must_use]
    pub const fn is_yield_aggregator_unlocked(&self) -> bool {
        self.wallet.is_connected || self.auth.is_logged_in
    }

    /// Whether pools of `category` are visible to this session.
    #[must_use]
    pub const fn is_unlocked(&self, category: PoolCategory) -> bool {
        !category.is_gated() || self.is_yield_aggregator_unlocked()
    }
}
