use std::sync::Arc;

use bloglist_auth::{Hs256TokenService, PasswordHasher};
use bloglist_core::{BlogPost, Contact, User};
use bloglist_infra::{InMemoryDocumentStore, SharedStore};

use crate::config::ApiConfig;

/// Everything a request handler needs, shared behind one `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub contacts: SharedStore<Contact>,
    pub blogs: SharedStore<BlogPost>,
    pub users: SharedStore<User>,
    pub tokens: Arc<Hs256TokenService>,
    pub hasher: PasswordHasher,
}

/// Build services based on configuration.
///
/// `USE_PERSISTENT_STORES=true` selects Postgres-backed stores when the
/// `postgres` feature is compiled in; otherwise everything lives in memory.
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    if config.use_persistent_stores {
        #[cfg(feature = "postgres")]
        {
            return build_persistent_services(config).await;
        }
        #[cfg(not(feature = "postgres"))]
        {
            tracing::warn!(
                "USE_PERSISTENT_STORES=true but postgres feature not enabled, falling back to in-memory"
            );
        }
    }

    build_in_memory_services(config)
}

pub fn build_in_memory_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    let contacts = if config.seed_phonebook {
        InMemoryDocumentStore::with_documents(sample_contacts())?
    } else {
        InMemoryDocumentStore::new()
    };

    Ok(AppServices {
        contacts: Arc::new(contacts),
        blogs: Arc::new(InMemoryDocumentStore::<BlogPost>::new()),
        users: Arc::new(InMemoryDocumentStore::<User>::new()),
        tokens: Arc::new(token_service(config)),
        hasher: PasswordHasher::new(config.bcrypt_cost),
    })
}

#[cfg(feature = "postgres")]
async fn build_persistent_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    use anyhow::Context;
    use bloglist_infra::{DocumentStore, PostgresDocumentStore, store::postgres::ensure_schema};
    use sqlx::PgPool;

    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;

    let pool = PgPool::connect(database_url)
        .await
        .context("failed to connect to Postgres")?;
    ensure_schema(&pool).await?;

    let contacts = PostgresDocumentStore::<Contact>::new(pool.clone());
    if config.seed_phonebook && contacts.count().await? == 0 {
        for contact in sample_contacts() {
            contacts.insert(contact).await?;
        }
        tracing::info!("seeded phonebook");
    }

    tracing::info!("using postgres document stores");

    Ok(AppServices {
        contacts: Arc::new(contacts),
        blogs: Arc::new(PostgresDocumentStore::<BlogPost>::new(pool.clone())),
        users: Arc::new(PostgresDocumentStore::<User>::new(pool)),
        tokens: Arc::new(token_service(config)),
        hasher: PasswordHasher::new(config.bcrypt_cost),
    })
}

fn token_service(config: &ApiConfig) -> Hs256TokenService {
    Hs256TokenService::new(config.jwt_secret.as_bytes(), config.token_ttl())
}

fn sample_contacts() -> Vec<Contact> {
    [
        ("Arto Hellas", "040-123456"),
        ("Ada Lovelace", "39-44-5323523"),
        ("Dan Abramov", "12-43-234345"),
        ("Mary Poppendieck", "39-23-6423122"),
    ]
    .into_iter()
    .map(|(name, number)| Contact::new(name, Some(number.to_string())))
    .collect()
}

#[cfg(test)]
mod tests {
    use bloglist_infra::DocumentStore;

    use super::*;

    #[tokio::test]
    async fn seeds_phonebook_when_enabled() {
        let mut config = ApiConfig::for_tests("secret");
        config.seed_phonebook = true;

        let services = build_services(&config).await.unwrap();
        let contacts = services.contacts.find_all().await.unwrap();

        assert_eq!(contacts.len(), 4);
        assert_eq!(contacts[0].name, "Arto Hellas");
    }

    #[tokio::test]
    async fn test_config_starts_empty() {
        let services = build_services(&ApiConfig::for_tests("secret")).await.unwrap();

        assert_eq!(services.contacts.count().await.unwrap(), 0);
        assert_eq!(services.blogs.count().await.unwrap(), 0);
        assert_eq!(services.users.count().await.unwrap(), 0);
        assert_eq!(services.hasher.cost(), 4);
    }
}
