//! Shared test fixtures and utilities for all test types
//!
//! This module provides common test setup patterns to reduce duplication
//! and make tests more maintainable.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use std::path::Path;
use tempfile::TempDir;

use image_vault::{create_router, ApplicationBuilder, Config};

pub const BOUNDARY: &str = "image-vault-test-boundary";

/// Router over a fresh storage root in a temporary directory
pub struct TestEnvironment {
    pub router: Router,
    pub config: Config,
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    /// Default configuration with the storage root inside a temp dir
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Same as [`TestEnvironment::new`] with a chance to adjust the config
    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let mut config = Config::default();
        config.upload_dir = temp_dir.path().join("uploads");
        config.durable_writes = false;
        adjust(&mut config);

        let state = ApplicationBuilder::new(config.clone())
            .with_storage()
            .await
            .expect("Failed to init storage")
            .build()
            .expect("Failed to build application");

        Self {
            router: create_router(state),
            config,
            temp_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.config.upload_dir
    }

    /// Published object names, staging area excluded
    pub fn stored_objects(&self) -> Vec<String> {
        list_objects(self.upload_dir())
    }
}

pub fn list_objects(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(root)
        .expect("Failed to read upload dir")
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// One part of a `multipart/form-data` body
pub struct FormPart {
    pub name: String,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl FormPart {
    pub fn file(content_type: &str, filename: &str, data: &[u8]) -> Self {
        Self {
            name: "file".to_string(),
            filename: Some(filename.to_string()),
            content_type: Some(content_type.to_string()),
            data: data.to_vec(),
        }
    }

    pub fn text(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            filename: None,
            content_type: None,
            data: value.as_bytes().to_vec(),
        }
    }
}

pub fn multipart_body(parts: &[FormPart]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());

        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = &part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");

        if let Some(content_type) = &part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }

        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// `POST /api/upload` request builder, pre-set with the multipart content type
pub fn upload_request() -> axum::http::request::Builder {
    Request::builder()
        .method(Method::POST)
        .uri("/api/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
}

/// Upload a single file field with no extra headers
pub fn image_upload(content_type: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let parts = [FormPart::file(content_type, filename, data)];
    upload_request()
        .body(Body::from(multipart_body(&parts)))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Helper to extract JSON response
pub async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub fn sha256_hex(data: &[u8]) -> String {
    image_vault::infrastructure::storage::ContentHasher::digest(data).to_string()
}
