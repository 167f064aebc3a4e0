// src/common/email.rs
//! Email address syntax checks and provider-aware normalization.

use regex::Regex;
use std::sync::LazyLock;

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_BYTES: usize = 64;
const MAX_DOMAIN_BYTES: usize = 254;
const MAX_LABEL_LENGTH: usize = 63;

static LOCAL_ATOM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+\-/=?^_`{|}~\x{00A1}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]+$",
    )
    .expect("local part pattern is valid")
});

static QUOTED_LOCAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:[^"\\]|\\[^\n])*$"#).expect("quoted local part pattern is valid")
});

static DOMAIN_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\-\x{00A1}-\x{FFFF}]+$").expect("domain label pattern is valid")
});

static TOP_LEVEL_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:[a-z\x{00A1}-\x{00A8}\x{00AA}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}]{2,}|xn[a-z0-9\-]{2,})$",
    )
    .expect("tld pattern is valid")
});

/// Returns true when `value` is a syntactically valid email address with a
/// fully qualified domain.
pub fn is_email(value: &str) -> bool {
    if value.chars().count() > MAX_EMAIL_LENGTH {
        return false;
    }

    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };

    if local.len() > MAX_LOCAL_PART_BYTES || domain.len() > MAX_DOMAIN_BYTES {
        return false;
    }

    if !is_fqdn(domain) {
        return false;
    }

    if let Some(quoted) = local
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return QUOTED_LOCAL.is_match(quoted);
    }

    local.split('.').all(|atom| LOCAL_ATOM.is_match(atom))
}

fn is_fqdn(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let tld = labels[labels.len() - 1];
    if !TOP_LEVEL_DOMAIN.is_match(tld) || tld.chars().any(char::is_whitespace) {
        return false;
    }

    labels.iter().all(|label| {
        label.chars().count() <= MAX_LABEL_LENGTH
            && DOMAIN_LABEL.is_match(label)
            && !label.chars().any(|c| ('\u{FF01}'..='\u{FF5E}').contains(&c))
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

const GMAIL_DOMAINS: [&str; 2] = ["gmail.com", "googlemail.com"];

const ICLOUD_DOMAINS: [&str; 2] = ["icloud.com", "me.com"];

const OUTLOOK_DOMAINS: [&str; 81] = [
    "hotmail.at", "hotmail.be", "hotmail.ca", "hotmail.cl", "hotmail.co.il",
    "hotmail.co.nz", "hotmail.co.th", "hotmail.co.uk", "hotmail.com", "hotmail.com.ar",
    "hotmail.com.au", "hotmail.com.br", "hotmail.com.gr", "hotmail.com.mx", "hotmail.com.pe",
    "hotmail.com.tr", "hotmail.com.vn", "hotmail.cz", "hotmail.de", "hotmail.dk",
    "hotmail.es", "hotmail.fr", "hotmail.hu", "hotmail.id", "hotmail.ie",
    "hotmail.in", "hotmail.it", "hotmail.jp", "hotmail.kr", "hotmail.lv",
    "hotmail.my", "hotmail.ph", "hotmail.pt", "hotmail.sa", "hotmail.sg",
    "hotmail.sk", "live.be", "live.co.uk", "live.com", "live.com.ar",
    "live.com.mx", "live.de", "live.es", "live.eu", "live.fr",
    "live.it", "live.nl", "msn.com", "outlook.at", "outlook.be",
    "outlook.cl", "outlook.co.il", "outlook.co.nz", "outlook.co.th", "outlook.com",
    "outlook.com.ar", "outlook.com.au", "outlook.com.br", "outlook.com.gr", "outlook.com.pe",
    "outlook.com.tr", "outlook.com.vn", "outlook.cz", "outlook.de", "outlook.dk",
    "outlook.es", "outlook.fr", "outlook.hu", "outlook.id", "outlook.ie",
    "outlook.in", "outlook.it", "outlook.jp", "outlook.kr", "outlook.lv",
    "outlook.my", "outlook.ph", "outlook.pt", "outlook.sa", "outlook.sg",
    "outlook.sk",
];

const YAHOO_DOMAINS: [&str; 9] = [
    "rocketmail.com", "yahoo.ca", "yahoo.co.uk", "yahoo.com", "yahoo.de",
    "yahoo.fr", "yahoo.in", "yahoo.it", "ymail.com",
];

const YANDEX_DOMAINS: [&str; 6] = [
    "yandex.ru", "yandex.ua", "yandex.kz", "yandex.com", "yandex.by", "ya.ru",
];

/// Provider-specific normalization switches. `Default` enables every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeEmailOptions {
    pub all_lowercase: bool,
    pub gmail_lowercase: bool,
    pub gmail_remove_dots: bool,
    pub gmail_remove_subaddress: bool,
    pub gmail_convert_googlemaildotcom: bool,
    pub outlookdotcom_lowercase: bool,
    pub outlookdotcom_remove_subaddress: bool,
    pub yahoo_lowercase: bool,
    pub yahoo_remove_subaddress: bool,
    pub yandex_lowercase: bool,
    pub yandex_convert_yandexru: bool,
    pub icloud_lowercase: bool,
    pub icloud_remove_subaddress: bool,
}

impl Default for NormalizeEmailOptions {
    fn default() -> Self {
        Self {
            all_lowercase: true,
            gmail_lowercase: true,
            gmail_remove_dots: true,
            gmail_remove_subaddress: true,
            gmail_convert_googlemaildotcom: true,
            outlookdotcom_lowercase: true,
            outlookdotcom_remove_subaddress: true,
            yahoo_lowercase: true,
            yahoo_remove_subaddress: true,
            yandex_lowercase: true,
            yandex_convert_yandexru: true,
            icloud_lowercase: true,
            icloud_remove_subaddress: true,
        }
    }
}

/// Canonicalizes an address for storage and comparison.
///
/// Returns `None` when the input has no `@` or when stripping a subaddress
/// leaves nothing of the local part.
pub fn normalize_email(email: &str, options: &NormalizeEmailOptions) -> Option<String> {
    let (user, domain) = email.rsplit_once('@')?;
    let mut domain = domain.to_lowercase();
    let mut user = user.to_string();

    if GMAIL_DOMAINS.contains(&domain.as_str()) {
        if options.gmail_remove_subaddress {
            user = strip_plus_subaddress(&user);
        }
        if options.gmail_remove_dots {
            user = remove_single_dots(&user);
        }
        if user.is_empty() {
            return None;
        }
        if options.all_lowercase || options.gmail_lowercase {
            user = user.to_lowercase();
        }
        if options.gmail_convert_googlemaildotcom {
            domain = "gmail.com".to_string();
        }
    } else if ICLOUD_DOMAINS.contains(&domain.as_str()) {
        if options.icloud_remove_subaddress {
            user = strip_plus_subaddress(&user);
        }
        if user.is_empty() {
            return None;
        }
        if options.all_lowercase || options.icloud_lowercase {
            user = user.to_lowercase();
        }
    } else if OUTLOOK_DOMAINS.contains(&domain.as_str()) {
        if options.outlookdotcom_remove_subaddress {
            user = strip_plus_subaddress(&user);
        }
        if user.is_empty() {
            return None;
        }
        if options.all_lowercase || options.outlookdotcom_lowercase {
            user = user.to_lowercase();
        }
    } else if YAHOO_DOMAINS.contains(&domain.as_str()) {
        if options.yahoo_remove_subaddress {
            if let Some((head, _)) = user.rsplit_once('-') {
                user = head.to_string();
            }
        }
        if user.is_empty() {
            return None;
        }
        if options.all_lowercase || options.yahoo_lowercase {
            user = user.to_lowercase();
        }
    } else if YANDEX_DOMAINS.contains(&domain.as_str()) {
        if options.all_lowercase || options.yandex_lowercase {
            user = user.to_lowercase();
        }
        if options.yandex_convert_yandexru {
            domain = "yandex.ru".to_string();
        }
    } else if options.all_lowercase {
        user = user.to_lowercase();
    }

    Some(format!("{}@{}", user, domain))
}

fn strip_plus_subaddress(user: &str) -> String {
    user.split('+').next().unwrap_or_default().to_string()
}

/// Removes lone dots; runs of two or more dots are kept as-is.
fn remove_single_dots(user: &str) -> String {
    let mut out = String::with_capacity(user.len());
    let mut dots = 0usize;
    for c in user.chars() {
        if c == '.' {
            dots += 1;
            continue;
        }
        if dots > 1 {
            out.extend(std::iter::repeat('.').take(dots));
        }
        dots = 0;
        out.push(c);
    }
    if dots > 1 {
        out.extend(std::iter::repeat('.').take(dots));
    }
    out
}
