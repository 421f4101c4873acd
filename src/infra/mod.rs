//! HTTP-backed implementations of the collaborator traits.

pub mod aviationstack;
pub mod restcountries;
