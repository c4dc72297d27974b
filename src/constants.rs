//! Application constants for TLC Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// TLC service URLs and file names
pub mod tlc {
    /// NYC TLC trip record data landing page
    pub const PAGE_URL: &str = "https://www1.nyc.gov/site/tlc/about/tlc-trip-record-data.page";

    /// Default directory for downloaded data files
    pub const DATA_DIR: &str = "data";

    /// Side file persisting the discovered URL list for audit and replay
    pub const URL_LIST_FILE: &str = "tlc_nyc_data_url_list.txt";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "TLC-Fetcher/0.1.0 (Trip Record Research Tool)";

    /// Default HTTP request timeout (covers the whole body read)
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 16;

    /// Maximum number of redirects to follow
    pub const MAX_REDIRECTS: usize = 10;
}

/// Web scraping CSS selectors
pub mod selectors {
    /// CSS selector for dataset links inside the TLC page's FAQ accordion
    pub const DATASET_LINK_SELECTOR: &str = "div.faq-v1 a[href]";
}

/// Worker and concurrency configuration
pub mod workers {
    /// Default number of concurrent downloads
    pub const DEFAULT_WORKER_COUNT: usize = 8;

    /// Maximum permitted concurrent downloads
    pub const MAX_WORKER_COUNT: usize = 32;
}

/// File operation constants
pub mod files {
    /// Temporary file suffix for atomic write-then-rename operations
    pub const TEMP_FILE_SUFFIX: &str = ".tmp";
}

// Re-export commonly used constants for convenience
pub use files::TEMP_FILE_SUFFIX;
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use tlc::{DATA_DIR, PAGE_URL, URL_LIST_FILE};
pub use workers::{DEFAULT_WORKER_COUNT, MAX_WORKER_COUNT};
