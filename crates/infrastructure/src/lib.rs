//! nsquery Infrastructure Layer
pub mod dns;
