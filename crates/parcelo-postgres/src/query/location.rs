//! Location repository for managing the tracking location vocabulary.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::Pagination;
use crate::model::{Location, NewLocation, UpdateLocation};
use crate::{PgError, PgResult, schema};

/// Repository for location database operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocationRepository;

impl LocationRepository {
    /// Creates a new named location.
    ///
    /// Display names are unique case-insensitively; a duplicate surfaces as
    /// a [`PgError`] carrying a constraint violation.
    pub async fn create_location(
        conn: &mut AsyncPgConnection,
        mut new_location: NewLocation,
    ) -> PgResult<Location> {
        use schema::locations;

        new_location.display_name = new_location.display_name.trim().to_owned();

        diesel::insert_into(locations::table)
            .values(&new_location)
            .returning(Location::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a location by its unique identifier.
    pub async fn find_location_by_id(
        conn: &mut AsyncPgConnection,
        location_id: Uuid,
    ) -> PgResult<Option<Location>> {
        use schema::locations::{self, dsl};

        locations::table
            .filter(dsl::id.eq(location_id))
            .select(Location::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Updates a location with new information.
    pub async fn update_location(
        conn: &mut AsyncPgConnection,
        location_id: Uuid,
        mut updates: UpdateLocation,
    ) -> PgResult<Location> {
        use schema::locations::{self, dsl};

        if let Some(name) = updates.display_name.as_mut() {
            *name = name.trim().to_owned();
        }

        diesel::update(locations::table.filter(dsl::id.eq(location_id)))
            .set((&updates, dsl::updated_at.eq(diesel::dsl::now)))
            .returning(Location::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Lists all locations with pagination support.
    ///
    /// Locations are ordered alphabetically by display name.
    pub async fn list_locations(
        conn: &mut AsyncPgConnection,
        pagination: Pagination,
    ) -> PgResult<Vec<Location>> {
        use schema::locations::{self, dsl};

        locations::table
            .order(dsl::display_name.asc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(Location::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }
}
