// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator - provisions employees, blocs and machines
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// Operator - reports anomalies on the shop floor
pub const ROLE_OPERATOR: &str = "ROLE_OPERATOR";

/// Technician - takes and resolves reported anomalies
pub const ROLE_TECH: &str = "ROLE_TECH";

// =============================================================================
// USER-FACING MESSAGES
// =============================================================================

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please sign in again.";

pub const NETWORK_ERROR_MESSAGE: &str =
    "Unable to reach the server. Check your connection and try again.";

pub const GENERIC_REJECTION_MESSAGE: &str = "The server rejected the request.";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password. Please try again.";

// =============================================================================
// PHOTO ATTACHMENTS
// =============================================================================

/// Prefix of generated photo filenames (`anomaly_<unix-millis>.<ext>`)
pub const PHOTO_FILENAME_PREFIX: &str = "anomaly";

/// Extension used when the source file has none
pub const DEFAULT_PHOTO_EXTENSION: &str = "jpg";

/// Header carrying the client-generated submission key
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";
