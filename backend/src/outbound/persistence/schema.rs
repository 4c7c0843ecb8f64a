//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations`. Columns the adapters never read
//! (`users.date_joined`, `auth_tokens.created_at`) rely on server defaults
//! and are left out.

diesel::table! {
    /// Registered accounts keyed by UUID.
    users (id) {
        id -> Uuid,
        /// Normalised email; unique.
        email -> Varchar,
        /// PHC-formatted password hash.
        password_hash -> Text,
        name -> Varchar,
        is_active -> Bool,
        is_staff -> Bool,
        is_superuser -> Bool,
    }
}

diesel::table! {
    /// SHA-256 digests of issued bearer tokens.
    auth_tokens (digest) {
        digest -> Varchar,
        user_id -> Uuid,
    }
}

diesel::joinable!(auth_tokens -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(auth_tokens, users);
