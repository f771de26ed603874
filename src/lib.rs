use std::error::Error;

pub mod api;
pub mod app;
pub mod assets;
pub mod bookmarks;
pub mod config;
pub mod content;
pub mod db;
pub mod documents;
pub mod error;
pub mod handler;
pub mod model;
pub mod views;
pub mod web;

pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ContentError;

    #[test]
    fn test_unpack_error_walks_sources() {
        let err = ContentError::Io {
            path: "refs.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(unpack_error(&err), r#"failed to read content payload "refs.json": no such file"#);
    }
}
