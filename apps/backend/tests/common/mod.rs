//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up an app over a throwaway data directory
//! - Helper functions for creating test data
//! - Authentication helpers

#![allow(dead_code)]

pub mod fixtures;

use std::path::Path;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use axum_test::TestServer;
use tempfile::TempDir;

use quiz_core::SequentialIds;
use quizhost_backend::config::ServerConfig;
use quizhost_backend::AppState;

/// Test context owning the app state and its temporary data directory.
///
/// The directory is removed when the context is dropped.
pub struct TestContext {
    pub state: AppState,
    data_dir: TempDir,
}

impl TestContext {
    /// Create a new test context with admin routes open.
    pub async fn new() -> Self {
        Self::build(None).await
    }

    /// Create a new test context whose admin routes require `token`.
    pub async fn with_admin_token(token: &str) -> Self {
        Self::build(Some(token.to_string())).await
    }

    async fn build(admin_token: Option<String>) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create temp data dir");

        let config = ServerConfig {
            data_dir: data_dir.path().to_path_buf(),
            admin_token,
            ..ServerConfig::default()
        };

        let state = AppState::open(config, Arc::new(SequentialIds::starting_at(1)))
            .await
            .expect("Failed to open app state");

        Self { state, data_dir }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        quizhost_backend::router(self.state.clone())
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// Number of files currently stored in the uploads directory.
    pub fn stored_upload_count(&self) -> usize {
        std::fs::read_dir(self.data_dir().join("uploads"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header value")
    }
}
