#![forbid(unsafe_code)]

//! Error types reported by host capabilities and configuration checks.
//!
//! Controllers absorb [`CapabilityError`]s: a failed focus move or inert
//! toggle is logged and the surrounding transition still completes.
//! [`ConfigError`] is returned to the caller because it describes a host
//! wiring mistake, not a runtime condition.

use std::fmt;

use crate::element::ElementRef;

/// A host capability could not carry out a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityError {
    /// The referenced element is detached, hidden, inert, or unknown.
    StaleTarget(ElementRef),
    /// The request targeted the whole document instead of an application root.
    DocumentRoot,
    /// The designated root element does not exist.
    MissingRoot(ElementRef),
}

impl fmt::Display for CapabilityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleTarget(el) => write!(f, "element {el} is stale or not focusable"),
            Self::DocumentRoot => write!(f, "refusing to apply to the document root"),
            Self::MissingRoot(el) => write!(f, "root element {el} does not exist"),
        }
    }
}

impl std::error::Error for CapabilityError {}

/// Invalid controller configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The inert root is the dialog surface itself.
    InertRootIsSurface(ElementRef),
    /// The fallback focus target is the dialog surface, which closing hides.
    FallbackIsSurface(ElementRef),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InertRootIsSurface(el) => {
                write!(f, "inert root {el} is the dialog surface itself")
            }
            Self::FallbackIsSurface(el) => {
                write!(f, "fallback focus target {el} is the dialog surface")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
