//! Domain client
//!
//! Wraps a [`Session`] with the authenticated domain calls. Every call is a
//! form POST to the web host carrying `Authorization: AuthJWT <access token>`,
//! and every response comes back in a [`ResponseEnvelope`].

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::endpoints::Endpoints;
use super::envelope::ResponseEnvelope;
use super::session::{ExportedSession, Session};
use super::transport::Transport;
use crate::error::{MoneyLoverError, MoneyLoverResult};
use crate::models::{Category, Transaction, TransactionInput, UserInfo, Wallet};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TransactionList {
    transactions: Vec<Transaction>,
}

/// Authenticated MoneyLover client
pub struct MoneyLoverClient {
    transport: Transport,
    endpoints: Endpoints,
    session: Session,
}

impl MoneyLoverClient {
    /// Log in and build a client around the fresh session
    pub fn login(
        transport: Transport,
        endpoints: Endpoints,
        email: &str,
        password: &str,
    ) -> MoneyLoverResult<Self> {
        let session = Session::login(&transport, &endpoints, email, password)?;
        Ok(Self {
            transport,
            endpoints,
            session,
        })
    }

    /// Build a client from exported credentials; call [`refresh`](Self::refresh) before use
    pub fn restore(
        transport: Transport,
        endpoints: Endpoints,
        credentials: ExportedSession,
    ) -> Self {
        Self {
            transport,
            endpoints,
            session: Session::from(credentials),
        }
    }

    /// Renew the session's access token
    pub fn refresh(&mut self) -> MoneyLoverResult<()> {
        self.session.refresh(&self.transport, &self.endpoints)
    }

    /// Export the credentials worth persisting
    pub fn export(&self) -> ExportedSession {
        self.session.export()
    }

    /// Get the underlying session
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Get the endpoints this client talks to
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch the logged-in user
    pub fn get_user_info(&self) -> MoneyLoverResult<UserInfo> {
        let path = "/user/info";
        self.post_request::<UserInfo>("user.info", path, &[])?
            .ok_or_else(|| MoneyLoverError::Decode {
                url: self.endpoints.api(path),
                message: "response has no user data".into(),
            })
    }

    /// List every wallet the user can see
    pub fn get_wallets(&self) -> MoneyLoverResult<Vec<Wallet>> {
        let wallets: Vec<Wallet> = self
            .post_request("wallet.list", "/wallet/list", &[])?
            .unwrap_or_default();
        debug!("Fetched {} wallets", wallets.len());
        Ok(wallets)
    }

    /// List the categories of a wallet
    pub fn get_categories(&self, wallet_id: &str) -> MoneyLoverResult<Vec<Category>> {
        let categories: Vec<Category> = self
            .post_request("category.list", "/category/list", &[("walletId", wallet_id)])?
            .unwrap_or_default();
        debug!("Fetched {} categories for wallet {}", categories.len(), wallet_id);
        Ok(categories)
    }

    /// List a wallet's transactions between two dates, inclusive
    ///
    /// Both bounds are sent as the local calendar day they fall on.
    pub fn get_transactions<Tz: TimeZone, Tz2: TimeZone>(
        &self,
        wallet_id: &str,
        start: &DateTime<Tz>,
        end: &DateTime<Tz2>,
    ) -> MoneyLoverResult<Vec<Transaction>> {
        let start_date = local_day(start);
        let end_date = local_day(end);

        let list: TransactionList = self
            .post_request(
                "transaction.list",
                "/transaction/list",
                &[
                    ("walletId", wallet_id),
                    ("startDate", start_date.as_str()),
                    ("endDate", end_date.as_str()),
                ],
            )?
            .unwrap_or_default();

        debug!(
            "Fetched {} transactions for wallet {} ({} to {})",
            list.transactions.len(),
            wallet_id,
            start_date,
            end_date
        );
        Ok(list.transactions)
    }

    /// Add a transaction, returning the server's record of it
    pub fn add_transaction(
        &self,
        input: &TransactionInput,
    ) -> MoneyLoverResult<Map<String, Value>> {
        input.validate()?;

        let trans_info = serde_json::to_string(input)?;
        let created: Map<String, Value> = self
            .post_request(
                "transaction.add",
                "/transaction/add",
                &[("transInfo", trans_info.as_str())],
            )?
            .unwrap_or_default();

        debug!("Added transaction {}", input);
        Ok(created)
    }

    fn post_request<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        path: &str,
        form: &[(&str, &str)],
    ) -> MoneyLoverResult<Option<T>> {
        if !self.session.is_authenticated() {
            return Err(MoneyLoverError::MissingAccessToken);
        }

        let authorization = format!("AuthJWT {}", self.session.access_token());
        let envelope: ResponseEnvelope<T> = self.transport.post_form(
            &self.endpoints.api(path),
            form,
            &[("Authorization", authorization.as_str())],
        )?;
        envelope.into_result(operation)
    }
}

fn local_day<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    value.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

impl fmt::Display for MoneyLoverClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Client[{}]", self.session)
    }
}

impl fmt::Debug for MoneyLoverClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoneyLoverClient")
            .field("endpoints", &self.endpoints)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
