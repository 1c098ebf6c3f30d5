use email_address::{EmailAddress, Options};

const BLACKLISTED_DOMAINS: [&str; 2] = ["example.com", "test.com"];

pub(super) fn validate(value: &str) -> bool {
    let opts = Options::default().with_required_tld().without_domain_literal().without_display_text();
    let Ok(addr) = EmailAddress::parse_with_options(value, opts) else {
        return false;
    };
    if !is_plain_address(addr.local_part(), addr.domain()) {
        return false;
    }
    let domain = addr.domain().to_ascii_lowercase();
    !BLACKLISTED_DOMAINS.contains(&domain.as_str())
}

/// ASCII-only local part and domain, ending in an alphabetic TLD of two or more letters.
/// Quoted local parts and internationalized addresses pass the RFC parse but not this.
fn is_plain_address(local: &str, domain: &str) -> bool {
    let local_ok = local.chars().all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let domain_ok = domain.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
    let tld_ok = domain
        .rsplit_once('.')
        .is_some_and(|(_, tld)| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    !local.is_empty() && local_ok && domain_ok && tld_ok
}

#[cfg(test)]
mod email_tests {
    use test_case::test_case;

    use super::validate;

    #[test_case("abcdef@yahoo.com")]
    #[test_case("user@example.org")]
    #[test_case("john.doe@gmail.com")]
    #[test_case("a@b.co")]
    #[test_case("info@heroexpert.ir")]
    #[test_case("j-doe1234@domain.com")]
    #[test_case("email+alias@domain.com")]
    #[test_case("first_last%tag@sub.domain.info")]
    fn test_valid(email: &str) {
        assert!(validate(email));
    }

    #[test_case("plainaddress")]
    #[test_case("missing@tld")]
    #[test_case("@missinglocalpart.com")]
    #[test_case("missingdomain@.com")]
    #[test_case("missingat.com")]
    #[test_case("user@.com")]
    #[test_case("user@com")]
    #[test_case("email@-domain.com")]
    #[test_case("email@domain..com")]
    #[test_case("email@domain.com "; "trailing_space")]
    #[test_case(" email@domain.com"; "leading_space")]
    #[test_case("John <john@domain.com>"; "display_name")]
    #[test_case("a@b.c"; "one_letter_tld")]
    #[test_case("user@domain.c0m"; "digit_in_tld")]
    #[test_case("user!#$@domain.com"; "special_chars_in_local_part")]
    #[test_case("\"quoted\"@domain.com"; "quoted_local_part")]
    #[test_case("usér@domain.com"; "non_ascii_local_part")]
    #[test_case("user@dömain.com"; "non_ascii_domain")]
    fn test_malformed(email: &str) {
        assert!(!validate(email));
    }

    #[test_case("user@example.com")]
    #[test_case("user@test.com")]
    #[test_case("user@EXAMPLE.com"; "uppercase")]
    fn test_blacklisted(email: &str) {
        assert!(!validate(email));
    }
}
