use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::{
    error::{ErrorKind, WriteError, WriteFailure},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database, IndexModel,
};
use std::time::Duration;

use super::{StoreError, UserStore};
use crate::models::user::User;

const USERS: &str = "users";
const DUPLICATE_KEY: i32 = 11000;

pub async fn create_mongo_client(uri: &str) -> Result<Client, StoreError> {
    log::info!("Connecting to MongoDB");

    let mut client_options = ClientOptions::parse(uri).await?;

    client_options.connect_timeout = Some(Duration::from_secs(10));
    client_options.server_selection_timeout = Some(Duration::from_secs(10));
    client_options.max_pool_size = Some(10);
    client_options.min_pool_size = Some(1);

    let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
    client_options.server_api = Some(server_api);

    Ok(Client::with_options(client_options)?)
}

pub struct MongoUserStore {
    database: Database,
    users: Collection<User>,
}

impl MongoUserStore {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = create_mongo_client(uri).await?;
        let database = client.database(database);
        let store = MongoUserStore {
            users: database.collection(USERS),
            database,
        };

        match store.ping().await {
            Ok(()) => log::info!("Connected to MongoDB and verified with ping command"),
            Err(err) => {
                log::warn!("Connected to MongoDB but ping test failed: {}", err);
                log::warn!("The API may still work, but some functionality might be impaired");
            }
        }

        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let unique_username = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.users.create_index(unique_username).await?;
        Ok(())
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(WriteError { code: DUPLICATE_KEY, .. }))
    )
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, mut user: User) -> Result<User, StoreError> {
        user.id.get_or_insert_with(ObjectId::new);

        match self.users.insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(err) if is_duplicate_key(&err) => Err(StoreError::DuplicateUsername(user.username)),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "_id": *id }).await?)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.find_one(doc! { "username": username }).await?)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        let id = user.id.ok_or(StoreError::MissingId)?;
        let result = self.users.replace_one(doc! { "_id": id }, user).await?;
        if result.matched_count == 0 {
            return Err(StoreError::MissingUser(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
