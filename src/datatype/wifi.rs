// Wifi credentials
//------------------------------------------------------------------------------

const MAX_SSID_LEN: usize = 32;

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Security {
    Wpa,
    Wpa2,
    Wep,
    NoPass,
}

impl Security {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "WPA" => Some(Self::Wpa),
            "WPA2" | "WPA/WPA2-Personal" => Some(Self::Wpa2),
            "WEP" => Some(Self::Wep),
            "nopass" => Some(Self::NoPass),
            _ => None,
        }
    }

    fn accepts(&self, password: &str) -> bool {
        match self {
            Self::Wpa | Self::Wpa2 => (8..=63).contains(&password.len()),
            Self::Wep => {
                matches!(password.len(), 10 | 26) && password.bytes().all(|b| b.is_ascii_hexdigit())
            }
            Self::NoPass => password.is_empty(),
        }
    }
}

/// Accepts `WIFI:T:<type>;S:<ssid>;P:<password>;` with every field present.
pub(super) fn validate(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("WIFI:T:") else {
        return false;
    };
    let Some((security, rest)) = rest.split_once(';') else {
        return false;
    };
    let Some(security) = Security::parse(security) else {
        return false;
    };

    let Some(rest) = rest.strip_prefix("S:") else {
        return false;
    };
    let Some((ssid, rest)) = rest.split_once(';') else {
        return false;
    };
    if ssid.is_empty() || ssid.len() > MAX_SSID_LEN || ssid.contains(':') {
        return false;
    }

    let Some(rest) = rest.strip_prefix("P:") else {
        return false;
    };
    let Some((password, rest)) = rest.split_once(';') else {
        return false;
    };

    rest.is_empty() && security.accepts(password)
}
