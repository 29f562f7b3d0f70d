// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::{Component, Path};

use rand::Rng;

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::raise_error;

const TOKEN_PREFIX: char = 'A';
const TOKEN_HEX_LENGTH: usize = 10;
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Names one submission's directory under the uploads root.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StagingToken(String);

impl StagingToken {
    /// Accepts any value that is exactly one normal path component.
    pub fn new(value: impl Into<String>) -> ContactMailerResult<Self> {
        let value = value.into();
        let mut components = Path::new(&value).components();
        let single_component = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_component || value.contains(['/', '\\']) {
            return Err(raise_error!(
                format!("'{}' is not a valid staging token", value),
                ErrorCode::InvalidStagingToken
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StagingToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for StagingToken {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

pub trait StagingTokenSource: Send + Sync {
    fn next_token(&self) -> StagingToken;
}

/// `A` followed by ten uppercase hex digits.
#[derive(Clone, Copy, Debug, Default)]
pub struct HexStagingTokenSource;

impl StagingTokenSource for HexStagingTokenSource {
    fn next_token(&self) -> StagingToken {
        let mut rng = rand::rng();
        let mut token = String::with_capacity(1 + TOKEN_HEX_LENGTH);
        token.push(TOKEN_PREFIX);
        for _ in 0..TOKEN_HEX_LENGTH {
            token.push(HEX_DIGITS[rng.random_range(0..HEX_DIGITS.len())] as char);
        }
        StagingToken(token)
    }
}
