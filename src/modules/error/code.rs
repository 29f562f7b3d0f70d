// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem::http::StatusCode;
use poem_openapi::Enum;

#[derive(Copy, Clone, Debug, Enum, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCode {
    // Submission validation errors (10000–10999)
    InvalidParameter = 10000,
    MissingField = 10010,
    FieldTooShort = 10020,
    FieldTooLong = 10030,
    InvalidEmail = 10040,
    MissingConfiguration = 10050,
    InvalidPort = 10060,
    PayloadTooLarge = 10070,
    RequestTimeout = 10080,
    MethodNotAllowed = 10090,

    // Attachment staging errors (20000–20999)
    MissingStagingToken = 20000,
    InvalidStagingToken = 20010,
    StagingIoFailed = 20020,
    UnsupportedAttachmentType = 20030,

    // Resource errors (30000–30999)
    ResourceNotFound = 30000,

    // Network connection errors (40000–40999)
    ConnectionTimeout = 40010,

    // Mail service errors (50000–50999)
    SmtpCommandFailed = 50030,
    SmtpConnectionFailed = 50040,
    SmtpAuthenticationFailed = 50050,

    // Internal system errors (70000–70999)
    InternalError = 70000,
    UnhandledPoemError = 70010,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::InvalidParameter
            | ErrorCode::MissingField
            | ErrorCode::FieldTooShort
            | ErrorCode::FieldTooLong
            | ErrorCode::InvalidEmail
            | ErrorCode::MissingStagingToken
            | ErrorCode::InvalidStagingToken
            | ErrorCode::UnsupportedAttachmentType => StatusCode::BAD_REQUEST,
            ErrorCode::ResourceNotFound => StatusCode::NOT_FOUND,
            ErrorCode::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::InternalError
            | ErrorCode::MissingConfiguration
            | ErrorCode::InvalidPort
            | ErrorCode::StagingIoFailed
            | ErrorCode::ConnectionTimeout
            | ErrorCode::SmtpCommandFailed
            | ErrorCode::SmtpConnectionFailed
            | ErrorCode::SmtpAuthenticationFailed
            | ErrorCode::UnhandledPoemError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
