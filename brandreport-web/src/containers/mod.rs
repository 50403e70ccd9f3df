pub(crate) mod header;
pub(crate) mod layout;
pub(crate) mod signup_validation;
