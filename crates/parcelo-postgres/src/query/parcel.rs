//! Parcel repository for managing delivery orders.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{NewParcel, Parcel, UpdateParcel};
use crate::types::ParcelStatus;
use crate::{PgError, PgResult, schema};

/// Repository for parcel database operations.
///
/// Handles the delivery order lifecycle: creation, owner-scoped and
/// admin-wide listings, status progression, and both soft and permanent
/// deletion. Soft-deleted parcels are excluded from every lookup.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParcelRepository;

impl ParcelRepository {
    /// Creates a new parcel delivery order.
    ///
    /// New parcels start in the default `pending` status.
    pub async fn create_parcel(
        conn: &mut AsyncPgConnection,
        new_parcel: NewParcel,
    ) -> PgResult<Parcel> {
        use schema::parcels;

        diesel::insert_into(parcels::table)
            .values(&new_parcel)
            .returning(Parcel::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a parcel by its unique identifier.
    ///
    /// Soft-deleted parcels are excluded. Ownership is not checked here;
    /// callers enforce access scoping.
    pub async fn find_parcel_by_id(
        conn: &mut AsyncPgConnection,
        parcel_id: Uuid,
    ) -> PgResult<Option<Parcel>> {
        use schema::parcels::{self, dsl};

        parcels::table
            .filter(dsl::id.eq(parcel_id))
            .filter(dsl::deleted_at.is_null())
            .select(Parcel::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Lists parcels owned by a specific user, with pagination support.
    ///
    /// Parcels are ordered by creation time with most recent first.
    pub async fn list_parcels_by_owner(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
        status: Option<ParcelStatus>,
        pagination: Pagination,
    ) -> PgResult<Vec<Parcel>> {
        use schema::parcels::{self, dsl};

        let mut query = parcels::table
            .filter(dsl::owner_id.eq(owner_id))
            .filter(dsl::deleted_at.is_null())
            .into_boxed();

        if let Some(status) = status {
            query = query.filter(dsl::status.eq(status));
        }

        query
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Parcel::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Lists all parcels across every owner, with pagination support.
    ///
    /// Intended for admin views; handler-level authorization gates access.
    pub async fn list_all_parcels(
        conn: &mut AsyncPgConnection,
        status: Option<ParcelStatus>,
        pagination: Pagination,
    ) -> PgResult<Vec<Parcel>> {
        use schema::parcels::{self, dsl};

        let mut query = parcels::table.filter(dsl::deleted_at.is_null()).into_boxed();

        if let Some(status) = status {
            query = query.filter(dsl::status.eq(status));
        }

        query
            .order(dsl::created_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Parcel::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }

    /// Updates a parcel with new information.
    ///
    /// Applies partial updates: only fields set to `Some(value)` are modified,
    /// and `updated_at` is advanced. Callers are responsible for rejecting
    /// edits to terminal-status parcels before reaching this method.
    pub async fn update_parcel(
        conn: &mut AsyncPgConnection,
        parcel_id: Uuid,
        updates: UpdateParcel,
    ) -> PgResult<Parcel> {
        use schema::parcels::{self, dsl};

        diesel::update(
            parcels::table
                .filter(dsl::id.eq(parcel_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set((&updates, dsl::updated_at.eq(diesel::dsl::now)))
        .returning(Parcel::as_returning())
        .get_result(conn)
        .await
        .map_err(PgError::from)
    }

    /// Soft deletes a parcel by setting the deletion timestamp.
    ///
    /// Preserves the row for audit purposes. Returns `None` if the parcel was
    /// not found or was already deleted.
    pub async fn delete_parcel(
        conn: &mut AsyncPgConnection,
        parcel_id: Uuid,
    ) -> PgResult<Option<Parcel>> {
        use schema::parcels::{self, dsl};

        diesel::update(
            parcels::table
                .filter(dsl::id.eq(parcel_id))
                .filter(dsl::deleted_at.is_null()),
        )
        .set((
            dsl::deleted_at.eq(diesel::dsl::now),
            dsl::updated_at.eq(diesel::dsl::now),
        ))
        .returning(Parcel::as_returning())
        .get_result(conn)
        .await
        .optional()
        .map_err(PgError::from)
    }

    /// Permanently removes a parcel row from the database.
    ///
    /// Unlike [`delete_parcel`], this also removes already soft-deleted rows.
    /// Returns the number of rows removed (0 or 1).
    ///
    /// [`delete_parcel`]: Self::delete_parcel
    pub async fn hard_delete_parcel(
        conn: &mut AsyncPgConnection,
        parcel_id: Uuid,
    ) -> PgResult<usize> {
        use schema::parcels::{self, dsl};

        diesel::delete(parcels::table.filter(dsl::id.eq(parcel_id)))
            .execute(conn)
            .await
            .map_err(PgError::from)
    }
}
