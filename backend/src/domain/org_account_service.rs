//! Organization account use-cases: registration and authentication.
//!
//! Each call is a short-lived, stateless unit of work composed of one or
//! two repository calls plus validation. Store and hasher references are
//! injected at construction so tests can substitute the in-memory
//! adapters.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    CredentialError, LoginService, OrgPersistenceError, OrgRegistration, OrgRepository,
    PasswordHasher, RegisterOrgRequest,
};
use crate::domain::{Error, NewOrg, Org, OrgCredentials};

/// Service implementing [`OrgRegistration`] and [`LoginService`].
#[derive(Clone)]
pub struct OrgAccountService<R, H> {
    orgs: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> OrgAccountService<R, H> {
    /// Create a new service with the given repository and hasher.
    pub fn new(orgs: Arc<R>, hasher: Arc<H>) -> Self {
        Self { orgs, hasher }
    }
}

fn map_org_persistence_error(error: OrgPersistenceError) -> Error {
    match error {
        OrgPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("organization repository unavailable: {message}"))
        }
        OrgPersistenceError::Query { message } => {
            Error::internal(format!("organization repository error: {message}"))
        }
        OrgPersistenceError::DuplicateEmail { .. } => duplicate_email_error(),
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    // The message never contains credential material, only adapter context.
    Error::internal(format!("credential hashing failed: {error}"))
}

fn duplicate_email_error() -> Error {
    Error::conflict("organization with same email already exists")
}

fn invalid_credentials_error() -> Error {
    // Deliberately identical for unknown email and wrong password.
    Error::unauthorized("invalid credentials")
}

impl<R, H> OrgAccountService<R, H>
where
    R: OrgRepository,
    H: PasswordHasher,
{
    fn validate_profile(request: &RegisterOrgRequest) -> Result<(), Error> {
        let address = [
            &request.cep,
            &request.state,
            &request.city,
            &request.neighborhood,
            &request.street,
        ];
        if address.iter().any(|field| field.trim().is_empty()) {
            return Err(Error::invalid_request("complete address is required"));
        }

        if request.whatsapp.trim().is_empty() {
            return Err(Error::invalid_request("whatsapp number is required"));
        }

        Ok(())
    }
}

#[async_trait]
impl<R, H> OrgRegistration for OrgAccountService<R, H>
where
    R: OrgRepository,
    H: PasswordHasher,
{
    async fn register(&self, request: RegisterOrgRequest) -> Result<Org, Error> {
        // Uniqueness is checked before profile completeness; the storage
        // unique constraint remains the authoritative guard against
        // concurrent registrations racing past this pre-check.
        let existing = self
            .orgs
            .find_by_email(&request.email)
            .await
            .map_err(map_org_persistence_error)?;
        if existing.is_some() {
            return Err(duplicate_email_error());
        }

        Self::validate_profile(&request)?;

        let password_hash = self
            .hasher
            .hash(request.password.as_str())
            .map_err(map_credential_error)?;

        let org = self
            .orgs
            .create(NewOrg {
                name: request.name,
                author_name: request.author_name,
                email: request.email,
                whatsapp: request.whatsapp,
                password_hash,
                cep: request.cep,
                state: request.state,
                city: request.city,
                neighborhood: request.neighborhood,
                street: request.street,
                latitude: request.latitude,
                longitude: request.longitude,
            })
            .await
            .map_err(map_org_persistence_error)?;

        debug!(org_id = %org.id, "organization registered");
        Ok(org)
    }
}

#[async_trait]
impl<R, H> LoginService for OrgAccountService<R, H>
where
    R: OrgRepository,
    H: PasswordHasher,
{
    async fn authenticate(&self, credentials: &OrgCredentials) -> Result<Org, Error> {
        let org = self
            .orgs
            .find_by_email(credentials.email())
            .await
            .map_err(map_org_persistence_error)?
            .ok_or_else(invalid_credentials_error)?;

        let matches = self
            .hasher
            .verify(credentials.password(), &org.password_hash)
            .map_err(map_credential_error)?;
        if !matches {
            return Err(invalid_credentials_error());
        }

        Ok(org)
    }
}

#[cfg(test)]
mod tests {
    //! Use-case coverage backed by the in-memory repository.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::outbound::persistence::memory::InMemoryOrgRepository;
    use crate::outbound::security::BcryptPasswordHasher;
    use rstest::rstest;
    use zeroize::Zeroizing;

    fn service() -> OrgAccountService<InMemoryOrgRepository, BcryptPasswordHasher> {
        OrgAccountService::new(
            Arc::new(InMemoryOrgRepository::new()),
            Arc::new(BcryptPasswordHasher::fast_for_tests()),
        )
    }

    fn request(email: &str) -> RegisterOrgRequest {
        RegisterOrgRequest {
            name: "Pet Paradise".to_owned(),
            author_name: "John Doe".to_owned(),
            email: email.to_owned(),
            whatsapp: "11999999999".to_owned(),
            password: Zeroizing::new("123456".to_owned()),
            cep: "01234-567".to_owned(),
            state: "SP".to_owned(),
            city: "São Paulo".to_owned(),
            neighborhood: "Centro".to_owned(),
            street: "Rua das Flores, 123".to_owned(),
            latitude: -23.550_52,
            longitude: -46.633_309,
        }
    }

    #[tokio::test]
    async fn registers_an_organization() {
        let sut = service();
        let org = sut
            .register(request("john@petparadise.com"))
            .await
            .expect("registration succeeds");

        assert_eq!(org.email, "john@petparadise.com");
        assert_eq!(org.city, "São Paulo");
    }

    #[tokio::test]
    async fn hashes_the_password_upon_registration() {
        let sut = service();
        let org = sut
            .register(request("john@petparadise.com"))
            .await
            .expect("registration succeeds");

        assert_ne!(org.password_hash, "123456");
        let hasher = BcryptPasswordHasher::fast_for_tests();
        assert!(hasher
            .verify("123456", &org.password_hash)
            .expect("digest is well-formed"));
        assert!(!hasher
            .verify("654321", &org.password_hash)
            .expect("digest is well-formed"));
    }

    #[tokio::test]
    async fn rejects_duplicate_emails_and_keeps_one_record() {
        let orgs = Arc::new(InMemoryOrgRepository::new());
        let sut = OrgAccountService::new(
            Arc::clone(&orgs),
            Arc::new(BcryptPasswordHasher::fast_for_tests()),
        );

        sut.register(request("john@petparadise.com"))
            .await
            .expect("first registration succeeds");
        let err = sut
            .register(request("john@petparadise.com"))
            .await
            .expect_err("second registration must fail");

        assert_eq!(err.code(), ErrorCode::Conflict);
        let persisted = orgs
            .find_many_by_city("São Paulo")
            .await
            .expect("listing succeeds");
        assert_eq!(persisted.len(), 1);
    }

    #[rstest]
    #[case::cep(|r: &mut RegisterOrgRequest| r.cep.clear())]
    #[case::state(|r: &mut RegisterOrgRequest| r.state.clear())]
    #[case::city(|r: &mut RegisterOrgRequest| r.city.clear())]
    #[case::neighborhood(|r: &mut RegisterOrgRequest| r.neighborhood.clear())]
    #[case::street(|r: &mut RegisterOrgRequest| r.street = "   ".to_owned())]
    #[tokio::test]
    async fn rejects_incomplete_addresses(#[case] blank: fn(&mut RegisterOrgRequest)) {
        let sut = service();
        let mut incomplete = request("john@petparadise.com");
        blank(&mut incomplete);

        let err = sut
            .register(incomplete)
            .await
            .expect_err("incomplete address must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn rejects_missing_whatsapp() {
        let sut = service();
        let mut incomplete = request("john@petparadise.com");
        incomplete.whatsapp.clear();

        let err = sut
            .register(incomplete)
            .await
            .expect_err("missing whatsapp must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn authenticates_with_correct_credentials() {
        let sut = service();
        sut.register(request("john@petparadise.com"))
            .await
            .expect("registration succeeds");

        let creds = OrgCredentials::try_from_parts("john@petparadise.com", "123456")
            .expect("credentials shape");
        let org = sut
            .authenticate(&creds)
            .await
            .expect("authentication succeeds");
        assert_eq!(org.email, "john@petparadise.com");
    }

    #[rstest]
    #[case::wrong_password("john@petparadise.com", "wrong-password")]
    #[case::unknown_email("nobody@petparadise.com", "123456")]
    #[tokio::test]
    async fn authentication_failures_are_indistinguishable(
        #[case] email: &str,
        #[case] password: &str,
    ) {
        let sut = service();
        sut.register(request("john@petparadise.com"))
            .await
            .expect("registration succeeds");

        let creds = OrgCredentials::try_from_parts(email, password).expect("credentials shape");
        let err = sut
            .authenticate(&creds)
            .await
            .expect_err("authentication must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "invalid credentials");
    }

    #[tokio::test]
    async fn email_lookup_is_case_insensitive() {
        let sut = service();
        sut.register(request("John@PetParadise.com"))
            .await
            .expect("registration succeeds");

        let err = sut
            .register(request("john@petparadise.com"))
            .await
            .expect_err("same email with different casing must conflict");
        assert_eq!(err.code(), ErrorCode::Conflict);
    }
}
