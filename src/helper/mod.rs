pub mod form_helpers;
pub mod listing_helpers;
pub mod metadata_helpers;
pub mod public_helpers;
pub mod sanitization_helpers;
pub mod validation_helpers;
