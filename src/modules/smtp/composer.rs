// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::Path;

use mail_send::mail_builder::MessageBuilder;

use crate::modules::error::{code::ErrorCode, ContactMailerResult};
use crate::modules::smtp::config::Mailbox;
use crate::modules::smtp::util::generate_message_id;
use crate::raise_error;

pub const SUBMISSION_HEADING: &str =
    "<h2>The following message was submitted to the Email Submission Form.</h2>";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageSubtype {
    Gif,
    Jpg,
}

impl ImageSubtype {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSubtype::Gif => "gif",
            ImageSubtype::Jpg => "jpg",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageSubtype::Gif => "image/gif",
            ImageSubtype::Jpg => "image/jpg",
        }
    }

    /// Maps a staged file to its image subtype by extension, ignoring case.
    pub fn from_path(path: &Path) -> ContactMailerResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match extension.as_deref() {
            Some("gif") => Ok(ImageSubtype::Gif),
            Some("jpg") | Some("jpeg") => Ok(ImageSubtype::Jpg),
            _ => Err(raise_error!(
                format!("'{}' is an invalid file type", path.display()),
                ErrorCode::UnsupportedAttachmentType
            )),
        }
    }
}

impl fmt::Display for ImageSubtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One image part of a multipart submission. Always sent as a base64 encoded
/// attachment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentPart {
    pub file_name: String,
    pub subtype: ImageSubtype,
    pub content: Vec<u8>,
}

impl AttachmentPart {
    pub const DISPOSITION: &'static str = "attachment";
    pub const TRANSFER_ENCODING: &'static str = "base64";

    pub fn disposition(&self) -> &'static str {
        Self::DISPOSITION
    }

    pub fn transfer_encoding(&self) -> &'static str {
        Self::TRANSFER_ENCODING
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageBody {
    Html(String),
    Multipart {
        html: String,
        attachments: Vec<AttachmentPart>,
    },
}

impl MessageBody {
    pub fn html(&self) -> &str {
        match self {
            MessageBody::Html(html) => html,
            MessageBody::Multipart { html, .. } => html,
        }
    }

    pub fn attachments(&self) -> &[AttachmentPart] {
        match self {
            MessageBody::Html(_) => &[],
            MessageBody::Multipart { attachments, .. } => attachments,
        }
    }

    /// Number of MIME parts: the body plus one per attachment.
    pub fn part_count(&self) -> usize {
        1 + self.attachments().len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComposedMessage {
    pub sender: String,
    pub recipient: String,
    pub subject: String,
    pub body: MessageBody,
}

impl ComposedMessage {
    /// Renders into a MIME builder: a lone `text/html` part, or
    /// `multipart/mixed` with the html part first and the images after it.
    pub fn to_builder(&self) -> MessageBuilder<'_> {
        let builder = MessageBuilder::new()
            .from(self.sender.as_str())
            .to(self.recipient.as_str())
            .subject(self.subject.as_str())
            .message_id(generate_message_id())
            .html_body(self.body.html());

        self.body
            .attachments()
            .iter()
            .fold(builder, |builder, attachment| {
                builder.attachment(
                    attachment.subtype.content_type(),
                    attachment.file_name.as_str(),
                    attachment.content.as_slice(),
                )
            })
    }
}

pub struct MessageComposer;

impl MessageComposer {
    /// Values are interpolated as-is, without HTML escaping.
    pub fn compose_body(name: &str, email: &str, message: &str) -> String {
        [
            SUBMISSION_HEADING.to_string(),
            format!("Message From: {}<BR>", name),
            format!("Reply Email Address: {}<BR>", email),
            "<BR>".to_string(),
            "Message Content:".to_string(),
            format!("<p>{}</p>", message),
        ]
        .join("\n")
            + "\n"
    }

    /// Attaches every file of `dir`, in directory listing order. Contents are
    /// read whole, so no file handle is left open once this returns.
    pub async fn compose_with_attachments(
        html: String,
        dir: &Path,
    ) -> ContactMailerResult<MessageBody> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            raise_error!(
                format!("Failed to list '{}': {:#?}", dir.display(), e),
                ErrorCode::StagingIoFailed
            )
        })?;

        let mut attachments = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            raise_error!(
                format!("Failed to list '{}': {:#?}", dir.display(), e),
                ErrorCode::StagingIoFailed
            )
        })? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let subtype = ImageSubtype::from_path(&path)?;
            let content = tokio::fs::read(&path).await.map_err(|e| {
                raise_error!(
                    format!("Failed to read '{}': {:#?}", path.display(), e),
                    ErrorCode::StagingIoFailed
                )
            })?;
            attachments.push(AttachmentPart {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                subtype,
                content,
            });
        }

        Ok(MessageBody::Multipart { html, attachments })
    }

    pub fn compose(mailbox: &Mailbox, name: &str, body: MessageBody) -> ComposedMessage {
        ComposedMessage {
            sender: mailbox.sender.clone(),
            recipient: mailbox.recipient.clone(),
            subject: format!("Email Submission From {}", name),
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn mailbox() -> Mailbox {
        Mailbox {
            sender: "forms@example.com".into(),
            recipient: "inbox@example.com".into(),
        }
    }

    #[test]
    fn test_compose_body_layout() {
        let body = MessageComposer::compose_body("Alice", "alice@example.com", "Hello there");
        assert_eq!(
            body,
            "<h2>The following message was submitted to the Email Submission Form.</h2>\n\
             Message From: Alice<BR>\n\
             Reply Email Address: alice@example.com<BR>\n\
             <BR>\n\
             Message Content:\n\
             <p>Hello there</p>\n"
        );
    }

    #[test]
    fn test_compose_body_is_not_escaped() {
        let body = MessageComposer::compose_body("<b>Bob</b>", "bob@example.com", "a & b <i>c</i>");
        assert!(body.contains("Message From: <b>Bob</b><BR>"));
        assert!(body.contains("<p>a & b <i>c</i></p>"));
    }

    #[test]
    fn test_subtype_from_path() {
        assert_eq!(
            ImageSubtype::from_path(Path::new("/tmp/cat.gif")).unwrap(),
            ImageSubtype::Gif
        );
        assert_eq!(
            ImageSubtype::from_path(Path::new("photo.JPEG")).unwrap(),
            ImageSubtype::Jpg
        );
        assert_eq!(
            ImageSubtype::from_path(Path::new("photo.Jpg")).unwrap(),
            ImageSubtype::Jpg
        );
        for name in ["notes.txt", "image.png", "noextension"] {
            let error = ImageSubtype::from_path(Path::new(name)).unwrap_err();
            assert_eq!(error.code(), ErrorCode::UnsupportedAttachmentType);
        }
    }

    #[test]
    fn test_compose_sets_envelope_and_subject() {
        let message =
            MessageComposer::compose(&mailbox(), "Alice", MessageBody::Html("<p>x</p>".into()));
        assert_eq!(message.sender, "forms@example.com");
        assert_eq!(message.recipient, "inbox@example.com");
        assert_eq!(message.subject, "Email Submission From Alice");
        assert_eq!(message.body.part_count(), 1);
    }

    #[tokio::test]
    async fn test_compose_with_attachments() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("cat.gif"), b"GIF89a-cat").unwrap();
        std::fs::write(dir.path().join("photo.JPEG"), b"\xff\xd8\xff-photo").unwrap();

        let body = MessageComposer::compose_with_attachments("<p>hi</p>".into(), dir.path())
            .await
            .unwrap();
        assert_eq!(body.html(), "<p>hi</p>");
        assert_eq!(body.part_count(), 3);

        let mut names: Vec<&str> = body
            .attachments()
            .iter()
            .map(|a| a.file_name.as_str())
            .collect();
        names.sort();
        assert_eq!(names, vec!["cat.gif", "photo.JPEG"]);

        for attachment in body.attachments() {
            assert_eq!(attachment.disposition(), "attachment");
            assert_eq!(attachment.transfer_encoding(), "base64");
            match attachment.file_name.as_str() {
                "cat.gif" => {
                    assert_eq!(attachment.subtype, ImageSubtype::Gif);
                    assert_eq!(attachment.content, b"GIF89a-cat");
                }
                _ => assert_eq!(attachment.subtype.as_str(), "jpg"),
            }
        }
    }

    #[tokio::test]
    async fn test_compose_follows_listing_order() {
        let dir = tempdir().unwrap();
        for name in ["a.gif", "b.jpg", "c.jpeg", "d.gif"] {
            std::fs::write(dir.path().join(name), name.as_bytes()).unwrap();
        }
        let listing: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();

        let body = MessageComposer::compose_with_attachments(String::new(), dir.path())
            .await
            .unwrap();
        let names: Vec<String> = body
            .attachments()
            .iter()
            .map(|a| a.file_name.clone())
            .collect();
        assert_eq!(names, listing);
    }

    #[tokio::test]
    async fn test_unsupported_file_fails_whole_composition() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("cat.gif"), b"GIF89a").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"plain").unwrap();

        let error = MessageComposer::compose_with_attachments(String::new(), dir.path())
            .await
            .unwrap_err();
        assert_eq!(error.code(), ErrorCode::UnsupportedAttachmentType);
    }

    #[tokio::test]
    async fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let error =
            MessageComposer::compose_with_attachments(String::new(), &dir.path().join("gone"))
                .await
                .unwrap_err();
        assert_eq!(error.code(), ErrorCode::StagingIoFailed);
    }

    #[test]
    fn test_render_plain_message() {
        let html = MessageComposer::compose_body("Alice", "alice@example.com", "Hello there");
        let message = MessageComposer::compose(&mailbox(), "Alice", MessageBody::Html(html));
        let raw = message.to_builder().write_to_vec().unwrap();
        let raw = String::from_utf8_lossy(&raw);

        assert!(raw.contains("Subject: Email Submission From Alice"));
        assert!(raw.contains("forms@example.com"));
        assert!(raw.contains("inbox@example.com"));
        assert!(raw.contains("text/html"));
        assert!(!raw.contains("multipart/mixed"));
        assert!(raw.contains("Message From: Alice<BR>"));
    }

    #[test]
    fn test_render_multipart_message() {
        let body = MessageBody::Multipart {
            html: "<p>hi</p>".into(),
            attachments: vec![AttachmentPart {
                file_name: "cat.gif".into(),
                subtype: ImageSubtype::Gif,
                content: vec![0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x00, 0xff, 0x10, 0x80],
            }],
        };
        let message = MessageComposer::compose(&mailbox(), "Alice", body);
        let raw = message.to_builder().write_to_vec().unwrap();
        let raw = String::from_utf8_lossy(&raw).to_ascii_lowercase();

        assert!(raw.contains("multipart/mixed"));
        assert!(raw.contains("image/gif"));
        assert!(raw.contains("content-transfer-encoding: base64"));
        assert!(raw.contains("attachment"));
        assert!(raw.contains("cat.gif"));
        assert!(raw.find("text/html").unwrap() < raw.find("image/gif").unwrap());
    }
}
