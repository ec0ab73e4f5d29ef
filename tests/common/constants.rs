//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When test data changes (user credentials, seeded poems, etc.),
//! update only this file.

// ============================================================================
// Test User Credentials
// ============================================================================

/// Regular test user, author of the seeded poems
pub const TEST_USER: &str = "testuser";

/// Regular test user password
pub const TEST_PASS: &str = "testpass123";

/// Second user, for cross-user scenarios
pub const OTHER_USER: &str = "otheruser";

/// Second user password
pub const OTHER_PASS: &str = "otherpass123";

// ============================================================================
// Seeded Poems
// ============================================================================

/// Id of the first seeded poem
pub const POEM_1_ID: &str = "poem-1";

/// Title of the first seeded poem
pub const POEM_1_TITLE: &str = "Morning Frost";

/// Id of the second seeded poem
pub const POEM_2_ID: &str = "poem-2";

/// Title of the second seeded poem
pub const POEM_2_TITLE: &str = "Harbor Lights";

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;
