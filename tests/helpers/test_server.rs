// Application context for endpoint tests
//
// Builds the real `AppServices` over in-memory repositories so requests run
// through every extractor, service and error mapping without a database.
// Tests keep handles to the stores to seed data and inspect writes.

use std::sync::Arc;

use actix_web::http::header;
use async_trait::async_trait;
use fintrack::accounts::Account;
use fintrack::categories::CustomCategory;
use fintrack::envelopes::Envelope;
use fintrack::health::ReadinessProbe;
use fintrack::transactions::{SplitPolicy, Transaction};
use fintrack::users::TokenService;
use fintrack::{AppServices, Repositories};

use super::memory::{MemoryStore, MemoryUserStore};

pub const TEST_TOKEN_SECRET: &str = "test-secret-0123456789abcdef";

/// Readiness probe with a fixed answer
pub struct StaticProbe(pub bool);

#[async_trait]
impl ReadinessProbe for StaticProbe {
    async fn database_ready(&self) -> bool {
        self.0
    }
}

pub struct TestContext {
    pub users: Arc<MemoryUserStore>,
    pub transactions: Arc<MemoryStore<Transaction>>,
    pub accounts: Arc<MemoryStore<Account>>,
    pub categories: Arc<MemoryStore<CustomCategory>>,
    pub envelopes: Arc<MemoryStore<Envelope>>,
    pub tokens: TokenService,
    pub services: AppServices,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_policy(SplitPolicy::Divide)
    }

    /// Context whose installment endpoint defaults to `policy`
    pub fn with_policy(policy: SplitPolicy) -> Self {
        let users = Arc::new(MemoryUserStore::default());
        let transactions = Arc::new(MemoryStore::<Transaction>::new());
        let accounts = Arc::new(MemoryStore::<Account>::new());
        let categories = Arc::new(MemoryStore::<CustomCategory>::new());
        let envelopes = Arc::new(MemoryStore::<Envelope>::new());

        let linked = transactions.clone();
        accounts.count_references_with(Box::new(move |id: &str, user_id: &str| {
            linked.count_where(|t| t.user_id == user_id && t.account_id.as_deref() == Some(id))
        }));
        let linked = transactions.clone();
        categories.count_references_with(Box::new(move |id: &str, user_id: &str| {
            linked.count_where(|t| {
                t.user_id == user_id && t.custom_category_id.as_deref() == Some(id)
            })
        }));

        let tokens = TokenService::new(TEST_TOKEN_SECRET, 1);

        let repos = Repositories {
            users: users.clone(),
            transactions: transactions.clone(),
            accounts: accounts.clone(),
            categories: categories.clone(),
            envelopes: envelopes.clone(),
        };
        let services = AppServices::new(repos, tokens.clone(), policy, Arc::new(StaticProbe(true)));

        Self {
            users,
            transactions,
            accounts,
            categories,
            envelopes,
            tokens,
            services,
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        self.tokens
            .issue(user_id, &format!("{}@example.com", user_id))
            .expect("token issuance should not fail")
    }

    /// `Authorization` header acting as `user_id`
    pub fn auth_header(&self, user_id: &str) -> (header::HeaderName, String) {
        (
            header::AUTHORIZATION,
            format!("Bearer {}", self.token_for(user_id)),
        )
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
