// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use contact::ContactApi;
use poem_openapi::{OpenApiService, Tags};

use crate::contactmailer_version;

pub mod contact;

#[derive(Tags)]
pub enum ApiTags {
    Contact,
}

pub fn create_openapi_service() -> OpenApiService<ContactApi, ()> {
    OpenApiService::new(ContactApi, "ContactMailerApi", contactmailer_version!())
}
