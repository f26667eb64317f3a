//! Database models for all tables.
//!
//! Each table has up to three model types:
//!
//! - A main read model (`Queryable` + `Selectable`)
//! - A `New*` insert model (`Insertable`)
//! - An `Update*` change set (`AsChangeset`)

mod location;
mod parcel;
mod user;

pub use location::{Location, NewLocation, UpdateLocation};
pub use parcel::{NewParcel, Parcel, UpdateParcel};
pub use user::{NewUser, UpdateUser, User};
