//! `PostgreSQL` repository implementation for user directory storage.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::user::{
    domain::{
        CredentialHash, EmailAddress, PersistedUserData, Role, User, UserId, UserDomainError,
    },
    ports::{UserRepository, UserRepositoryError, UserRepositoryResult, UserSearch},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by user adapters.
pub type UserPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed user repository.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: UserPgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: UserPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserRepositoryError::persistence)?
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn store(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_unique_violation(err, user_id, &email))?;
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &User) -> UserRepositoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let row = to_new_row(user);

        self.run_blocking(move |connection| {
            let affected = diesel::update(users::table.filter(users::id.eq(row.id)))
                .set((
                    users::name.eq(row.name),
                    users::email.eq(row.email),
                    users::role.eq(row.role),
                    users::is_active.eq(row.is_active),
                    users::credential_hash.eq(row.credential_hash),
                    users::updated_at.eq(row.updated_at),
                ))
                .execute(connection)
                .map_err(|err| map_unique_violation(err, user_id, &email))?;
            if affected == 0 {
                return Err(UserRepositoryError::NotFound(user_id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserRepositoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        let lookup: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::id.eq_any(&lookup))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .order(users::created_at.desc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn search(&self, search: &UserSearch) -> UserRepositoryResult<Vec<User>> {
        let criteria = search.clone();
        self.run_blocking(move |connection| {
            let mut query = users::table.into_boxed();
            if let Some(role) = criteria.role {
                query = query.filter(users::role.eq(role.as_str()));
            }
            if let Some(active) = criteria.active {
                query = query.filter(users::is_active.eq(active));
            }
            if let Some(text) = &criteria.text {
                let pattern = format!("%{text}%");
                query = query.filter(
                    users::name
                        .ilike(pattern.clone())
                        .or(users::email.ilike(pattern)),
                );
            }
            let rows = query
                .order(users::created_at.desc())
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        name: user.name().to_owned(),
        email: user.email().as_str().to_owned(),
        role: user.role().as_str().to_owned(),
        is_active: user.is_active(),
        credential_hash: user.credential_hash().as_str().to_owned(),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserRepositoryResult<User> {
    let role = Role::try_from(row.role.as_str()).map_err(UserRepositoryError::persistence)?;
    let credential_hash = CredentialHash::new(row.credential_hash)
        .map_err(|err: UserDomainError| UserRepositoryError::persistence(err))?;

    Ok(User::from_persisted(PersistedUserData {
        id: UserId::from_uuid(row.id),
        name: row.name,
        email: EmailAddress::from_trusted(row.email),
        role,
        is_active: row.is_active,
        credential_hash,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

/// Maps unique-constraint violations onto semantic duplicate errors.
fn map_unique_violation(
    err: DieselError,
    user_id: UserId,
    email: &EmailAddress,
) -> UserRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if info.constraint_name().is_some_and(|name| name.contains("email")) =>
        {
            UserRepositoryError::DuplicateEmail(email.clone())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserRepositoryError::DuplicateUser(user_id)
        }
        _ => UserRepositoryError::persistence(err),
    }
}
