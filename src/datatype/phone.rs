use crate::common::error::QRResult;

/// International numbers only: a leading `+` and a number the parser accepts.
#[cfg(feature = "phone")]
pub(super) fn validate(value: &str) -> QRResult<bool> {
    if !value.starts_with('+') {
        return Ok(false);
    }
    Ok(phonenumber::parse(None, value).is_ok())
}

#[cfg(not(feature = "phone"))]
pub(super) fn validate(_value: &str) -> QRResult<bool> {
    use crate::common::error::{Dependency, QRError};

    Err(QRError::MissingDependency(Dependency::Phone))
}

#[cfg(all(test, feature = "phone"))]
mod phone_tests {
    use test_case::test_case;

    use super::validate;

    #[test_case("+1 123 456 7890", true)]
    #[test_case("+442012345678", true)]
    #[test_case("+989358919279", true)]
    #[test_case("989358919279", false; "missing_plus")]
    #[test_case("", false; "empty")]
    fn test_validate(phone: &str, exp: bool) {
        assert_eq!(validate(phone).unwrap(), exp);
    }
}
