// Application wiring
//
// `Repositories` bundles the storage backends; `AppServices` builds every
// service on top of them and mounts the routes. The binary passes MySQL
// repositories, tests pass in-memory ones.

use std::sync::Arc;

use actix_web::web;
use sqlx::MySqlPool;

use crate::config::Config;
use crate::middleware;
use crate::modules::accounts::{self, AccountRepository, AccountService, MySqlAccountRepository};
use crate::modules::categories::{
    self, CategoryRepository, CategoryService, MySqlCategoryRepository,
};
use crate::modules::envelopes::{self, EnvelopeRepository, EnvelopeService, MySqlEnvelopeRepository};
use crate::modules::health::{self, ReadinessProbe};
use crate::modules::transactions::{
    self, MySqlTransactionRepository, SplitPolicy, TransactionRepository, TransactionService,
};
use crate::modules::users::{self, AuthService, MySqlUserRepository, TokenService, UserRepository};

#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub accounts: Arc<dyn AccountRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub envelopes: Arc<dyn EnvelopeRepository>,
}

impl Repositories {
    pub fn mysql(pool: &MySqlPool) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            transactions: Arc::new(MySqlTransactionRepository::new(pool.clone())),
            accounts: Arc::new(MySqlAccountRepository::new(pool.clone())),
            categories: Arc::new(MySqlCategoryRepository::new(pool.clone())),
            envelopes: Arc::new(MySqlEnvelopeRepository::new(pool.clone())),
        }
    }
}

/// Everything a worker's `App` needs, cheap to clone into each worker
#[derive(Clone)]
pub struct AppServices {
    pub tokens: web::Data<TokenService>,
    pub auth: web::Data<AuthService>,
    pub transactions: web::Data<TransactionService>,
    pub accounts: web::Data<AccountService>,
    pub categories: web::Data<CategoryService>,
    pub envelopes: web::Data<EnvelopeService>,
    pub readiness: web::Data<dyn ReadinessProbe>,
}

impl AppServices {
    pub fn new(
        repos: Repositories,
        tokens: TokenService,
        split_policy: SplitPolicy,
        readiness: Arc<dyn ReadinessProbe>,
    ) -> Self {
        Self {
            auth: web::Data::new(AuthService::new(repos.users.clone(), tokens.clone())),
            tokens: web::Data::new(tokens),
            transactions: web::Data::new(TransactionService::new(
                repos.transactions.clone(),
                repos.accounts.clone(),
                repos.categories.clone(),
                split_policy,
            )),
            accounts: web::Data::new(AccountService::new(
                repos.accounts.clone(),
                repos.transactions.clone(),
            )),
            categories: web::Data::new(CategoryService::new(repos.categories.clone())),
            envelopes: web::Data::new(EnvelopeService::new(repos.envelopes)),
            readiness: web::Data::from(readiness),
        }
    }

    /// Production wiring over one MySQL pool
    pub fn from_config(config: &Config, pool: &MySqlPool) -> Self {
        Self::new(
            Repositories::mysql(pool),
            TokenService::new(&config.auth.token_secret, config.auth.token_ttl_hours),
            config.app.split_policy,
            Arc::new(pool.clone()),
        )
    }

    /// Register shared state, extractor configs and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tokens.clone())
            .app_data(self.auth.clone())
            .app_data(self.transactions.clone())
            .app_data(self.accounts.clone())
            .app_data(self.categories.clone())
            .app_data(self.envelopes.clone())
            .app_data(self.readiness.clone())
            .app_data(middleware::json_config())
            .app_data(middleware::path_config())
            .app_data(middleware::query_config())
            .configure(health::configure)
            .service(
                web::scope("/api")
                    .configure(users::controllers::configure)
                    .service(
                        web::scope("/transactions").configure(transactions::controllers::configure),
                    )
                    .service(web::scope("/envelopes").configure(envelopes::controllers::configure))
                    .service(
                        web::scope("/categories").configure(categories::controllers::configure),
                    )
                    .service(web::scope("/accounts").configure(accounts::controllers::configure)),
            );
    }
}
