// Shared constants - single source of truth for class names, delays and
// user-facing messages that more than one module needs.

// Focus helper
pub const DEFAULT_FOCUS_DELAY_MS: u32 = 300;
pub const CARET_END_OFFSET: u32 = 1000;

// Component ids
pub const RANDOM_ID_PREFIX: &str = "r";
pub const RANDOM_ID_MAX: u32 = 100_000_000;
pub const DEFAULT_ELEM_ID_PREFIX: &str = "e";

// Attributes
pub const ATTR_TYPE: &str = "type";
pub const ATTR_ROLE: &str = "role";
pub const ATTR_ARIA_LABEL: &str = "aria-label";
pub const ATTR_BS_DISMISS: &str = "data-bs-dismiss";
pub const BUTTON_TYPE_BUTTON: &str = "button";
pub const BUTTON_TYPE_SUBMIT: &str = "submit";

// Bootstrap classes
pub const CSS_HIDDEN: &str = "d-none";
pub const CSS_FORM_CONTROL: &str = "form-control";
pub const CSS_FORM_LABEL: &str = "form-label";
pub const CSS_FORM_TEXT: &str = "form-text";
pub const CSS_FORM_CHECK: &str = "form-check";
pub const CSS_FORM_CHECK_INPUT: &str = "form-check-input";
pub const CSS_FORM_CHECK_LABEL: &str = "form-check-label";
pub const CSS_BTN_CLOSE: &str = "btn-close";
pub const DEFAULT_FORM_CONTROL_CLASSES: &str = "mb-3";
pub const DEFAULT_LOADING_CLASSES: &str = "text-center";
pub const DEFAULT_TOASTS_CLASSES: &str = "toast-container position-fixed";
pub const DEFAULT_TEXTAREA_ROWS: u32 = 3;

// Layout
pub const ROOT_ID: &str = "root";
pub const ROOT_MAX_WIDTH: &str = "775px";
pub const ROOT_MAX_WIDTH_WIDE: &str = "992px";
pub const APP_NAME: &str = "Local Buckets";

// Timestamp prefix used by alerts and toasts
pub const TIME_FORMAT: &str = "%H:%M:%S";

// Error formatting
pub const NO_RESPONSE_SUFFIX: &str = "The request was made but no response was received.";
pub const INTERNAL_SERVER_ERROR: &str = "500 Internal Server Error";
pub const ERR_SAME_NAME_FILES: &str = "ErrSameNameFiles";
