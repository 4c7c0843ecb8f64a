//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

const VALID_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

#[fixture]
fn user() -> User {
    User::builder(
        UserId::new(VALID_ID).expect("fixture id"),
        EmailAddress::new("ada@example.com").expect("fixture email"),
        PasswordHash::new("$argon2id$v=19$fixture"),
    )
    .build()
}

#[rstest]
#[case("test@PROGYNY.COM", "test@progyny.com")]
#[case("Test@Example.Com", "Test@example.com")]
#[case("  spaced@example.com  ", "spaced@example.com")]
fn email_domain_is_lowercased(#[case] raw: &str, #[case] expected: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_ref(), expected);
}

#[rstest]
#[case("", UserValidationError::EmptyEmail)]
#[case("   ", UserValidationError::EmptyEmail)]
#[case("no-at-sign", UserValidationError::InvalidEmail)]
#[case("user@nodot", UserValidationError::InvalidEmail)]
#[case("white space@example.com", UserValidationError::InvalidEmail)]
#[case("@example.com", UserValidationError::InvalidEmail)]
fn rejects_invalid_email(#[case] raw: &str, #[case] expected: UserValidationError) {
    assert_eq!(EmailAddress::new(raw), Err(expected));
}

#[rstest]
fn rejects_overlong_email() {
    let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
    assert_eq!(
        EmailAddress::new(raw),
        Err(UserValidationError::EmailTooLong { max: EMAIL_MAX })
    );
}

#[rstest]
fn missing_email_is_empty() {
    assert_eq!(
        EmailAddress::from_optional(None),
        Err(UserValidationError::EmptyEmail)
    );
}

#[rstest]
fn normalise_leaves_addresses_without_at_sign() {
    assert_eq!(normalise_email("LOCALONLY"), "LOCALONLY");
}

#[rstest]
#[case("", true)]
#[case("  Ada Lovelace ", false)]
fn display_name_accepts_empty_and_trims(#[case] raw: &str, #[case] empty: bool) {
    let name = DisplayName::new(raw).expect("valid name");
    assert_eq!(name.is_empty(), empty);
    assert_eq!(name.as_ref(), raw.trim());
}

#[rstest]
fn display_name_rejects_overlong_values() {
    let raw = "n".repeat(DISPLAY_NAME_MAX + 1);
    assert_eq!(
        DisplayName::new(raw),
        Err(UserValidationError::NameTooLong {
            max: DISPLAY_NAME_MAX
        })
    );
}

#[rstest]
#[case("not-a-uuid")]
#[case(" 3fa85f64-5717-4562-b3fc-2c963f66afa6")]
fn user_id_rejects_malformed_values(#[case] raw: &str) {
    assert_eq!(UserId::new(raw), Err(UserValidationError::InvalidId));
}

#[rstest]
fn builder_defaults_to_active_member(user: User) {
    assert!(user.is_active());
    assert!(!user.is_staff());
    assert!(!user.is_superuser());
    assert!(user.name().is_empty());
}

#[rstest]
fn superuser_access_implies_staff(user: User) {
    let rebuilt = User::builder(*user.id(), user.email().clone(), user.password_hash().clone())
        .access(AccessLevel::Superuser)
        .build();
    assert!(rebuilt.is_staff());
    assert!(rebuilt.is_superuser());
}

#[rstest]
#[case(false, false, Ok(AccessLevel::Member))]
#[case(true, false, Ok(AccessLevel::Staff))]
#[case(true, true, Ok(AccessLevel::Superuser))]
#[case(false, true, Err(UserValidationError::InconsistentAccess))]
fn access_level_from_flags(
    #[case] is_staff: bool,
    #[case] is_superuser: bool,
    #[case] expected: Result<AccessLevel, UserValidationError>,
) {
    assert_eq!(AccessLevel::from_flags(is_staff, is_superuser), expected);
}

#[rstest]
fn with_methods_replace_mutable_fields(user: User) {
    let email = EmailAddress::new("new@example.com").expect("email");
    let name = DisplayName::new("New Name").expect("name");
    let updated = user
        .clone()
        .with_email(email.clone())
        .with_name(name.clone())
        .with_password_hash(PasswordHash::new("other"))
        .with_active(false);

    assert_eq!(updated.id(), user.id());
    assert_eq!(updated.email(), &email);
    assert_eq!(updated.name(), &name);
    assert_eq!(updated.password_hash().as_str(), "other");
    assert!(!updated.is_active());
}

#[rstest]
#[case(UserValidationError::EmptyEmail, "email", "empty_email")]
#[case(UserValidationError::PasswordTooShort { min: 6 }, "password", "password_too_short")]
#[case(UserValidationError::NameTooLong { max: 255 }, "name", "name_too_long")]
fn validation_errors_expose_field_and_code(
    #[case] error: UserValidationError,
    #[case] field: &str,
    #[case] code: &str,
) {
    assert_eq!(error.field(), field);
    assert_eq!(error.code(), code);
}

#[rstest]
fn email_deserialises_through_validation() {
    let parsed: Result<EmailAddress, _> = serde_json::from_str("\"bad\"");
    assert!(parsed.is_err());
    let parsed: EmailAddress =
        serde_json::from_str("\"x@EXAMPLE.com\"").expect("valid email deserialises");
    assert_eq!(parsed.as_ref(), "x@example.com");
}
