// Geolocation
//------------------------------------------------------------------------------

/// Accepts `lat,lng` or `lat,lng,alt` with `lat` in [-90, 90] and `lng` in [-180, 180].
/// Fields are plain decimal numbers; surrounding whitespace makes a field malformed.
pub(super) fn validate(value: &str) -> bool {
    let fields: Option<Vec<f64>> = value.split(',').map(parse_field).collect();
    let Some(fields) = fields else {
        return false;
    };

    match fields[..] {
        [lat, lng] | [lat, lng, _] => (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng),
        _ => false,
    }
}

fn parse_field(field: &str) -> Option<f64> {
    let numeric = !field.is_empty()
        && field.bytes().all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+'))
        && field.bytes().any(|b| b.is_ascii_digit());
    if !numeric {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod location_tests {
    use proptest::prelude::*;
    use test_case::test_case;

    use super::validate;

    #[test_case("51.3890,12.3")]
    #[test_case("51.3890,12.3,24")]
    #[test_case("-45.123,-123.456")]
    #[test_case("0,0")]
    #[test_case("90,180")]
    #[test_case("-90,-180")]
    fn test_valid(loc: &str) {
        assert!(validate(loc));
    }

    #[test_case("91,0"; "lat_out_of_range")]
    #[test_case("0,181"; "lng_out_of_range")]
    #[test_case("51.3890,12.3,abc"; "alt_not_numeric")]
    #[test_case("abc,12.3"; "lat_not_numeric")]
    #[test_case("51.3890,abc"; "lng_not_numeric")]
    #[test_case("51.3890"; "single_field")]
    #[test_case("51.3890,12.3,24,5"; "too_many_fields")]
    #[test_case(""; "empty")]
    #[test_case(" "; "blank")]
    #[test_case(","; "comma_only")]
    #[test_case("51.3890,"; "missing_lng")]
    #[test_case(",12.3"; "missing_lat")]
    #[test_case("51.3890,,12.3"; "empty_middle")]
    #[test_case("51.3890, 12.3, "; "whitespace")]
    #[test_case("NaN,0"; "nan")]
    #[test_case("inf,0"; "infinite")]
    #[test_case("1e1,0"; "exponent")]
    fn test_invalid(loc: &str) {
        assert!(!validate(loc));
    }

    proptest! {
        #[test]
        fn proptest_in_range(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let loc = format!("{lat},{lng}");
            prop_assert!(validate(&loc));
        }

        #[test]
        fn proptest_lat_out_of_range(lat in 90.001f64..1e6, lng in -180.0f64..=180.0) {
            let loc = format!("{lat},{lng}");
            let neg = format!("-{lat},{lng}");
            prop_assert!(!validate(&loc));
            prop_assert!(!validate(&neg));
        }
    }
}
