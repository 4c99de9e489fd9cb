//! Business logic services

pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod email;
pub mod gateway;
pub mod payments;
pub mod storage;

use crate::{config::AppConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub catalog: catalog::CatalogService,
    pub bookings: bookings::BookingsService,
    pub payments: payments::PaymentsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, config: &AppConfig) -> AppResult<Self> {
        let gateway = gateway::PaymentGateway::new(&config.payment)?;
        let storage = storage::StorageService::new(config.storage.clone())?;
        let email = email::EmailService::new(config.email.clone());

        Ok(Self {
            auth: auth::AuthService::new(config.auth.clone()),
            catalog: catalog::CatalogService::new(repository.clone(), storage),
            bookings: bookings::BookingsService::new(repository.clone()),
            payments: payments::PaymentsService::new(
                repository,
                gateway,
                email,
                config.payment.default_currency.clone(),
            ),
        })
    }
}
