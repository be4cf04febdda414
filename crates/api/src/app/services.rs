//! Service wiring: stores, application services and the AI client.

use std::sync::Arc;

use winnerlens_ai::{AiError, GeminiClient, ProductCopywriter};
use winnerlens_auth::{Hs256JwtIssuer, PasswordHasher};
use winnerlens_core::ProductId;
use winnerlens_infra::{AccountService, InMemoryOwnerStore, InMemoryUserDirectory, ProductCatalog};
use winnerlens_products::Product;

use crate::config::ApiConfig;

pub type ProductStore = Arc<InMemoryOwnerStore<ProductId, Product>>;
pub type UserStore = Arc<InMemoryUserDirectory>;

/// Everything request handlers need, shared behind an `Arc`.
pub struct AppServices {
    pub catalog: ProductCatalog<ProductStore>,
    pub accounts: AccountService<UserStore>,
    pub copywriter: ProductCopywriter,
}

pub fn build_services(config: &ApiConfig) -> Result<AppServices, AiError> {
    let catalog = ProductCatalog::new(Arc::new(InMemoryOwnerStore::new()));

    let accounts = AccountService::new(
        Arc::new(InMemoryUserDirectory::new()),
        PasswordHasher::new(config.bcrypt_cost),
        Arc::new(Hs256JwtIssuer::new(config.jwt_secret.as_bytes())),
        config.jwt_expires_in,
    );

    let copywriter = match &config.gemini_api_key {
        Some(key) => {
            let mut client = GeminiClient::new(key.clone(), config.gemini_model.clone())?;
            if let Some(base_url) = &config.gemini_base_url {
                client = client.with_base_url(base_url.clone());
            }
            tracing::info!(model = client.model(), "AI copywriting enabled");
            ProductCopywriter::new(Arc::new(client))
        }
        None => ProductCopywriter::disabled(),
    };

    Ok(AppServices {
        catalog,
        accounts,
        copywriter,
    })
}
