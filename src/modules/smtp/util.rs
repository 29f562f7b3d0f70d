use rand::Rng;

use crate::utc_now;

/// Bare message id; the builder adds the angle brackets.
pub fn generate_message_id() -> String {
    let random_bytes: [u8; 16] = rand::rng().random();
    format!("{}.{}@contactmailer", utc_now!(), hex::encode(random_bytes))
}

/// Host name announced in EHLO.
pub fn local_host() -> String {
    gethostname::gethostname()
        .to_str()
        .filter(|name| !name.is_empty())
        .unwrap_or("[127.0.0.1]")
        .to_string()
}
