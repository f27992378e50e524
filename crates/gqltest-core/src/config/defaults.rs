//! Default values for gqltest configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Fixture Contract
// ============================================================================

/// File holding the GraphQL query of a test case (required for validity).
pub const REQUEST_FILE_NAME: &str = "request.gql";

/// File holding the expected JSON response (required for validity).
pub const RESPONSE_FILE_NAME: &str = "response.json";

/// Optional file holding the query variables as a JSON object.
pub const VARIABLES_FILE_NAME: &str = "variables.json";

/// Optional file holding jq filters, one per line.
pub const TRANSFORM_FILE_NAME: &str = "transform.jq";

/// Directories whose name equals or starts with this marker are excluded
/// from discovery, including their entire subtree.
pub const SKIP_MARKER: &str = "SKIP";

// ============================================================================
// Client Defaults
// ============================================================================

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default header carrying the per-suite account id.
pub const DEFAULT_ACCOUNT_HEADER: &str = "X-Account-Id";

// ============================================================================
// Config Locations
// ============================================================================

/// Project-local config file name.
pub const DEFAULT_CONFIG_FILE: &str = "gqltest.toml";

/// Subdirectory of the user config dir holding the user-level config.
pub const DEFAULT_CONFIG_DIR: &str = "gqltest";
