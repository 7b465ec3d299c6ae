//! CNAB Bundle
//!
//! This crate contains the serializable types of a CNAB bundle descriptor
//! (`bundle.json`): invocation images, application images, credentials,
//! custom actions and parameters.
//!
//! Parameter default values and allowed values are kept as raw JSON when a
//! bundle is loaded, because their shape depends on the parameter's declared
//! type. They are decoded on demand:
//!
//! - typed, with [`Parameter::default_as`] / [`Parameter::allowed_as`] (or
//!   the `default_int`, `allowed_strings`, ... shorthands), which fail if the
//!   parameter is declared with a different type;
//! - type-erased, with [`Parameter::default_value`] /
//!   [`Parameter::allowed_values`], which return [`ParameterValue`]s matching
//!   whatever type the parameter declares.
//!
//! An omitted payload and an explicit `null` both mean "not supplied".

mod bundle;
mod credential;
mod error;
mod image;
mod parameter;
pub mod resolve;
mod value;

pub use bundle::{Action, Bundle, Maintainer};
pub use credential::Credential;
pub use error::ParameterError;
pub use image::{Image, ImageBase, InvocationImage, LocationReference, Platform};
pub use parameter::{Parameter, ParameterDestination, ParameterMetadata};
pub use resolve::{resolve_allowed, resolve_allowed_as, resolve_default, resolve_default_as};
pub use value::{NativeType, ParameterType, ParameterValue, PayloadKind, RawPayload};
