//! Form validation
//!
//! Field validators return displayable messages instead of raising; the
//! [`FormValidator`] collects those messages per field so a whole form can
//! be checked at once.

pub mod form;
pub mod validators;

pub use form::FormValidator;
pub use validators::FieldResult;
