#![forbid(unsafe_code)]

//! Errors raised while building or loading catalogs.

use std::fmt;

/// Failure to build or load a catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// Two records in the same catalog share an identifier.
    DuplicateId {
        /// Name of the catalog being built.
        catalog: &'static str,
        /// The repeated identifier.
        id: String,
    },
    /// Reading a catalog file failed.
    Io(std::io::Error),
    /// A catalog file is not valid catalog JSON.
    Json(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { catalog, id } => {
                write!(f, "duplicate id {id:?} in {catalog} catalog")
            }
            Self::Io(err) => write!(f, "catalog i/o error: {err}"),
            Self::Json(err) => write!(f, "invalid catalog json: {err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DuplicateId { .. } => None,
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_message_names_catalog() {
        let err = CatalogError::DuplicateId {
            catalog: "models",
            id: "3".into(),
        };
        assert_eq!(err.to_string(), "duplicate id \"3\" in models catalog");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn json_error_converts_and_keeps_source() {
        let parse = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = CatalogError::from(parse);
        assert!(err.to_string().starts_with("invalid catalog json"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
