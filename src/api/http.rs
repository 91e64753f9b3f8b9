//! Implements the `Api` trait over REST with `reqwest`.

use crate::api::wire::{
    self, CreateRequest, CreateResponse, DeleteResponse, LogInRequest, LogInResponse,
    ProfileResponse, TotalsResponse, TransactionsResponse, UpdateRequest, UpdateResponse,
};
use crate::api::{
    Api, Page, ADD_TRANSACTION, ALL_TRANSACTIONS, DELETE_TRANSACTION, LOG_IN, PROFILE,
    TRANSACTION_TOTALS, UPDATE_TRANSACTION,
};
use crate::error::Res;
use crate::model::{
    AggregateTotal, Transaction, TransactionId, User, UserId, UserProfile, ValidTransaction,
};
use crate::Config;
use anyhow::{bail, Context};
use reqwest::{Client, Request, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const ROLE_HEADER: &str = "x-hasura-role";
const USER_ID_HEADER: &str = "x-hasura-user-id";
const SECRET_HEADER: &str = "x-hasura-admin-secret";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Talks to the finance API at a base URL. Cloning is cheap, the connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base: Url,
    secret: Option<String>,
}

impl HttpApi {
    /// Creates a client for the API configured in `config`.
    pub fn new(config: &Config) -> Res<Self> {
        Self::with_base(
            config.api_url().clone(),
            config.api_secret().map(str::to_string),
        )
    }

    /// Creates a client for the API at `base`, which should end with a `/`.
    pub fn with_base(base: Url, secret: Option<String>) -> Res<Self> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .context("Unable to create the HTTP client")?;
        Ok(Self {
            client,
            base,
            secret,
        })
    }

    fn endpoint(&self, name: &str) -> Res<Url> {
        self.base
            .join(name)
            .with_context(|| format!("Unable to build the URL for '{name}'"))
    }

    /// Adds the secret header, when one is configured.
    fn with_secret(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.secret {
            Some(secret) => builder.header(SECRET_HEADER, secret),
            None => builder,
        }
    }

    /// Adds the headers that identify `user` to the server.
    fn as_user(&self, builder: RequestBuilder, user: User) -> RequestBuilder {
        self.with_secret(builder)
            .header(ROLE_HEADER, user.role())
            .header(USER_ID_HEADER, user.user_id().to_string())
    }

    pub(crate) fn log_in_request(&self, email: &str, password: &str) -> Res<Request> {
        let builder = self
            .client
            .post(self.endpoint(LOG_IN)?)
            .json(&LogInRequest { email, password });
        self.with_secret(builder)
            .build()
            .context("Unable to build the log in request")
    }

    pub(crate) fn transactions_request(&self, user: User, page: Page) -> Res<Request> {
        let builder = self
            .client
            .get(self.endpoint(ALL_TRANSACTIONS)?)
            .query(&[("limit", page.limit()), ("offset", page.offset())]);
        self.as_user(builder, user)
            .build()
            .context("Unable to build the transactions request")
    }

    pub(crate) fn totals_request(&self, user: User) -> Res<Request> {
        let builder = self.client.get(self.endpoint(TRANSACTION_TOTALS)?);
        self.as_user(builder, user)
            .build()
            .context("Unable to build the totals request")
    }

    pub(crate) fn create_request(
        &self,
        user: User,
        transaction: &ValidTransaction,
    ) -> Res<Request> {
        let builder = self
            .client
            .post(self.endpoint(ADD_TRANSACTION)?)
            .json(&CreateRequest::new(transaction, user.user_id()));
        self.as_user(builder, user)
            .build()
            .context("Unable to build the add transaction request")
    }

    pub(crate) fn update_request(
        &self,
        user: User,
        id: TransactionId,
        transaction: &ValidTransaction,
    ) -> Res<Request> {
        let builder = self
            .client
            .post(self.endpoint(UPDATE_TRANSACTION)?)
            .json(&UpdateRequest::new(transaction, id));
        self.as_user(builder, user)
            .build()
            .context("Unable to build the update transaction request")
    }

    pub(crate) fn delete_request(&self, user: User, id: TransactionId) -> Res<Request> {
        let builder = self
            .client
            .delete(self.endpoint(DELETE_TRANSACTION)?)
            .query(&[("id", id)]);
        self.as_user(builder, user)
            .build()
            .context("Unable to build the delete transaction request")
    }

    pub(crate) fn profile_request(&self, user: User) -> Res<Request> {
        let builder = self.client.get(self.endpoint(PROFILE)?);
        self.as_user(builder, user)
            .build()
            .context("Unable to build the profile request")
    }

    /// Sends `request`, fails on any non-2xx status, and parses the body as `T`.
    async fn send<T>(&self, request: Request) -> Res<T>
    where
        T: DeserializeOwned,
    {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("{method} {url}");

        let response = self
            .client
            .execute(request)
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format!("Unable to read the response from {url}"))?;
        trace!("{status} {body}");

        if !status.is_success() {
            bail!("{method} {url} returned {status}: {body}");
        }
        wire::parse(&body).with_context(|| format!("Unexpected response from {url}"))
    }
}

#[async_trait::async_trait]
impl Api for HttpApi {
    async fn log_in(&self, email: &str, password: &str) -> Res<UserId> {
        let response: LogInResponse = self.send(self.log_in_request(email, password)?).await?;
        response.user_id()
    }

    async fn fetch_transactions(&self, user: User, page: Page) -> Res<Vec<Transaction>> {
        let response: TransactionsResponse =
            self.send(self.transactions_request(user, page)?).await?;
        Ok(response
            .transactions
            .into_iter()
            .map(Transaction::from)
            .collect())
    }

    async fn fetch_totals(&self, user: User) -> Res<Vec<AggregateTotal>> {
        let response: TotalsResponse = self.send(self.totals_request(user)?).await?;
        Ok(response
            .totals_credit_debit_transactions
            .into_iter()
            .map(AggregateTotal::from)
            .collect())
    }

    async fn create_transaction(
        &self,
        user: User,
        transaction: &ValidTransaction,
    ) -> Res<Transaction> {
        let response: CreateResponse = self.send(self.create_request(user, transaction)?).await?;
        Ok(response.insert_transactions_one.into())
    }

    async fn update_transaction(
        &self,
        user: User,
        id: TransactionId,
        transaction: &ValidTransaction,
    ) -> Res<Transaction> {
        let response: UpdateResponse = self
            .send(self.update_request(user, id, transaction)?)
            .await?;
        match response.update_transactions_by_pk {
            Some(row) => Ok(row.into()),
            None => bail!("The server has no transaction with id {id}"),
        }
    }

    async fn delete_transaction(&self, user: User, id: TransactionId) -> Res<TransactionId> {
        let response: DeleteResponse = self.send(self.delete_request(user, id)?).await?;
        match response.delete_transactions_by_pk {
            Some(row) => Ok(row.id),
            None => bail!("The server has no transaction with id {id}"),
        }
    }

    async fn fetch_profile(&self, user: User) -> Res<UserProfile> {
        let response: ProfileResponse = self.send(self.profile_request(user)?).await?;
        response.profile()
    }
}
