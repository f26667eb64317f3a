//! Authentication services: password hashing and token signing keys.

mod auth_keys;
mod password_hasher;

pub use self::auth_keys::AuthKeys;
pub use self::password_hasher::AuthHasher;
