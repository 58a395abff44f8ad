//! Security adapters (credential hashing).

pub mod bcrypt_hasher;

pub use self::bcrypt_hasher::BcryptPasswordHasher;
