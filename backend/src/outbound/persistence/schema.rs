//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Registered organizations (adoption agencies and shelters).
    ///
    /// Besides the primary key, the migrations create a unique index on
    /// `lower(email)`; it is the authoritative guard against concurrent
    /// registrations with the same email.
    orgs (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Organization display name.
        name -> Varchar,
        /// Name of the responsible contact person.
        author_name -> Varchar,
        /// Contact email, unique case-insensitively.
        email -> Varchar,
        /// WhatsApp contact number.
        whatsapp -> Varchar,
        /// Salted one-way password digest.
        password_hash -> Varchar,
        /// Postal code.
        cep -> Varchar,
        /// Address: state.
        state -> Varchar,
        /// Address: city (searched by substring, case-insensitively).
        city -> Varchar,
        /// Address: neighborhood.
        neighborhood -> Varchar,
        /// Address: street and number.
        street -> Varchar,
        /// Location latitude in [-90, 90].
        latitude -> Float8,
        /// Location longitude in [-180, 180].
        longitude -> Float8,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Adoptable pets, each owned by exactly one organization.
    ///
    /// The characteristic columns store the legacy wire tokens; the
    /// domain validates them against closed enumerations on read.
    pets (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Pet name.
        name -> Varchar,
        /// Optional free-text description.
        about -> Nullable<Text>,
        /// Age token: FILHOTE, ADULTO, or IDOSO.
        age -> Varchar,
        /// Size token: PEQUENO, MEDIO, or GRANDE.
        size -> Varchar,
        /// Energy level token: "01" through "05".
        energy_level -> Varchar,
        /// Independence token: BAIXO, MEDIO, or ALTO.
        independence -> Varchar,
        /// Environment token: APARTAMENTO, CASA, QUINTAL_PEQUENO, or
        /// QUINTAL_GRANDE.
        environment -> Varchar,
        /// Ordered, non-empty list of adoption requirements.
        adoption_requirements -> Array<Text>,
        /// Ordered list of photo URLs (may be empty).
        photos -> Array<Text>,
        /// Owning organization (foreign key to orgs.id).
        org_id -> Uuid,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(pets -> orgs (org_id));
diesel::allow_tables_to_appear_in_same_query!(orgs, pets);
