//! Format and business checks on candidate identities.
//!
//! - No IO
//! - No panics on user input
//! - Deterministic for a given `today`
//!
//! Checks short-circuit in a fixed order (email, phone, document, age) so the
//! reported error is stable for input that is malformed in several fields.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use mesa_core::RestaurantId;

use crate::{Candidate, IdentityError, RoleName};

pub const MINIMUM_AGE: u32 = 18;
pub const MAX_PHONE_LENGTH: usize = 13;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{1,12}$").expect("phone pattern compiles"));

static DOCUMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("document pattern compiles"));

/// Identity class being provisioned. Selects the role and the extra checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKind {
    Owner,
    Employee,
    Client,
}

impl IdentityKind {
    pub fn role_name(&self) -> RoleName {
        match self {
            IdentityKind::Owner => RoleName::Owner,
            IdentityKind::Employee => RoleName::Employee,
            IdentityKind::Client => RoleName::Client,
        }
    }

    /// Only owners must prove legal age.
    pub fn requires_adult(&self) -> bool {
        matches!(self, IdentityKind::Owner)
    }

    /// Only employees are scoped to a restaurant.
    pub fn requires_restaurant(&self) -> bool {
        matches!(self, IdentityKind::Employee)
    }
}

pub fn validate_email(email: &str) -> Result<(), IdentityError> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(IdentityError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), IdentityError> {
    if phone.chars().count() > MAX_PHONE_LENGTH || !PHONE_PATTERN.is_match(phone) {
        return Err(IdentityError::InvalidPhone);
    }
    Ok(())
}

pub fn validate_document(document: &str) -> Result<(), IdentityError> {
    if !DOCUMENT_PATTERN.is_match(document) {
        return Err(IdentityError::InvalidDocument);
    }
    Ok(())
}

/// Age in whole calendar years on `today`; `None` for a birth date after `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> Option<u32> {
    today.years_since(birth_date)
}

pub fn validate_age(birth_date: Option<NaiveDate>, today: NaiveDate) -> Result<(), IdentityError> {
    let Some(birth_date) = birth_date else {
        return Err(IdentityError::UnderageUser("Birth date is required".to_string()));
    };

    match age_on(birth_date, today) {
        Some(age) if age >= MINIMUM_AGE => Ok(()),
        _ => Err(IdentityError::UnderageUser(
            "User must be of legal age (18 years or older)".to_string(),
        )),
    }
}

/// A restaurant binding is required for employees and refused for everyone else.
pub fn validate_restaurant_binding(
    kind: IdentityKind,
    restaurant_id: Option<RestaurantId>,
) -> Result<(), IdentityError> {
    match (kind.requires_restaurant(), restaurant_id) {
        (true, None) => Err(IdentityError::InvalidRestaurantBinding(
            "Employee must be bound to a restaurant".to_string(),
        )),
        (false, Some(_)) => Err(IdentityError::InvalidRestaurantBinding(format!(
            "Role {} cannot be bound to a restaurant",
            kind.role_name()
        ))),
        _ => Ok(()),
    }
}

/// Run the format checks (plus the owner age check) for `kind`.
///
/// Duplicate-existence and restaurant-binding checks need the store's answer
/// first and run in the provisioning service.
pub fn validate_candidate(
    kind: IdentityKind,
    candidate: &Candidate,
    today: NaiveDate,
) -> Result<(), IdentityError> {
    validate_email(&candidate.email)?;
    validate_phone(&candidate.phone)?;
    validate_document(&candidate.identity_document)?;
    if kind.requires_adult() {
        validate_age(candidate.birth_date, today)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Months};
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn candidate() -> Candidate {
        Candidate {
            first_name: "Luis".to_string(),
            last_name: "Pardo".to_string(),
            identity_document: "123456789".to_string(),
            phone: "+573001234567".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1996, 1, 2),
            email: "luis@example.com".to_string(),
            password: "secret".to_string(),
            restaurant_id: None,
        }
    }

    #[test]
    fn accepts_well_formed_emails() {
        for email in ["a@b.com", "first.last+tag@sub.domain.co", "x_y-z@host-1.io"] {
            assert!(validate_email(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "a@b", "a@b.c", "@b.com", "a b@c.com", "a@b.c0m"] {
            assert_eq!(validate_email(email), Err(IdentityError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn phone_allows_optional_plus_and_up_to_thirteen_chars() {
        assert!(validate_phone("+573001234567").is_ok());
        assert!(validate_phone("3001234567").is_ok());
        assert!(validate_phone("1").is_ok());
        assert_eq!(validate_phone("+5730012345678"), Err(IdentityError::InvalidPhone));
        assert_eq!(validate_phone("5730012345678"), Err(IdentityError::InvalidPhone));
        assert_eq!(validate_phone(""), Err(IdentityError::InvalidPhone));
        assert_eq!(validate_phone("+"), Err(IdentityError::InvalidPhone));
        assert_eq!(validate_phone("300-123"), Err(IdentityError::InvalidPhone));
    }

    #[test]
    fn document_must_be_digits_only() {
        assert!(validate_document("0012345").is_ok());
        for doc in ["", "12.345", "12 345", "A12345", "-123"] {
            assert_eq!(validate_document(doc), Err(IdentityError::InvalidDocument), "{doc}");
        }
    }

    #[test]
    fn age_boundary_is_inclusive() {
        let eighteen_years_ago = today().checked_sub_months(Months::new(18 * 12)).unwrap();
        assert!(validate_age(Some(eighteen_years_ago), today()).is_ok());

        let one_day_short = eighteen_years_ago.checked_add_days(Days::new(1)).unwrap();
        assert!(matches!(
            validate_age(Some(one_day_short), today()),
            Err(IdentityError::UnderageUser(_))
        ));
    }

    #[test]
    fn missing_birth_date_is_underage() {
        let err = validate_age(None, today()).unwrap_err();
        assert_eq!(err, IdentityError::UnderageUser("Birth date is required".to_string()));
    }

    #[test]
    fn birth_date_in_the_future_is_underage() {
        let tomorrow = today().checked_add_days(Days::new(1)).unwrap();
        assert!(matches!(
            validate_age(Some(tomorrow), today()),
            Err(IdentityError::UnderageUser(_))
        ));
    }

    #[test]
    fn age_uses_calendar_periods_not_year_subtraction() {
        let birth = NaiveDate::from_ymd_opt(2008, 10, 20).unwrap();
        assert_eq!(age_on(birth, today()), Some(17));
        let birth = NaiveDate::from_ymd_opt(2008, 10, 19).unwrap();
        assert_eq!(age_on(birth, today()), Some(18));
    }

    #[test]
    fn email_is_reported_before_phone_and_document() {
        let c = Candidate {
            email: "broken".to_string(),
            phone: "abc".to_string(),
            identity_document: "x".to_string(),
            ..candidate()
        };
        assert_eq!(
            validate_candidate(IdentityKind::Client, &c, today()),
            Err(IdentityError::InvalidEmail)
        );

        let c = Candidate {
            email: "ok@example.com".to_string(),
            ..c
        };
        assert_eq!(
            validate_candidate(IdentityKind::Client, &c, today()),
            Err(IdentityError::InvalidPhone)
        );
    }

    #[test]
    fn age_is_only_checked_for_owners() {
        let c = Candidate {
            birth_date: None,
            ..candidate()
        };
        assert!(validate_candidate(IdentityKind::Client, &c, today()).is_ok());
        assert!(validate_candidate(IdentityKind::Employee, &c, today()).is_ok());
        assert!(matches!(
            validate_candidate(IdentityKind::Owner, &c, today()),
            Err(IdentityError::UnderageUser(_))
        ));
    }

    #[test]
    fn restaurant_binding_is_required_only_for_employees() {
        let restaurant = Some(RestaurantId::new(7));
        assert!(validate_restaurant_binding(IdentityKind::Employee, restaurant).is_ok());
        assert!(validate_restaurant_binding(IdentityKind::Owner, None).is_ok());
        assert!(validate_restaurant_binding(IdentityKind::Client, None).is_ok());

        assert!(matches!(
            validate_restaurant_binding(IdentityKind::Employee, None),
            Err(IdentityError::InvalidRestaurantBinding(_))
        ));
        assert!(matches!(
            validate_restaurant_binding(IdentityKind::Owner, restaurant),
            Err(IdentityError::InvalidRestaurantBinding(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any phone longer than 13 characters is rejected.
        #[test]
        fn overlong_phones_are_rejected(phone in "\\+?[0-9]{13,20}") {
            prop_assume!(phone.chars().count() > MAX_PHONE_LENGTH);
            prop_assert_eq!(validate_phone(&phone), Err(IdentityError::InvalidPhone));
        }

        /// Property: a non-digit anywhere but a single leading `+` is rejected.
        #[test]
        fn phones_with_foreign_characters_are_rejected(
            head in "[0-9]{0,5}",
            bad in "[a-zA-Z +()#-]",
            tail in "[0-9]{0,5}",
        ) {
            let phone = format!("{head}{bad}{tail}");
            prop_assume!(!(bad == "+" && head.is_empty() && !tail.is_empty()));
            prop_assert_eq!(validate_phone(&phone), Err(IdentityError::InvalidPhone));
        }

        /// Property: documents containing any non-digit are rejected.
        #[test]
        fn non_numeric_documents_are_rejected(doc in "[0-9]{0,6}[^0-9][0-9a-z]{0,6}") {
            prop_assert_eq!(validate_document(&doc), Err(IdentityError::InvalidDocument));
        }

        /// Property: valid digit-only documents always pass.
        #[test]
        fn numeric_documents_are_accepted(doc in "[0-9]{1,20}") {
            prop_assert!(validate_document(&doc).is_ok());
        }

        /// Property: an email without `@` never passes.
        #[test]
        fn emails_without_at_sign_are_rejected(email in "[A-Za-z0-9.]{0,30}") {
            prop_assert_eq!(validate_email(&email), Err(IdentityError::InvalidEmail));
        }
    }
}
