//! fhtml source loading
//!
//! A [`SourceProvider`] yields the serialized design document; [`load`]
//! fetches it once and decodes it into the screen tree. The provider is
//! chosen once at startup:
//!
//! - [`RemoteSource`]: a single request to the design tool's REST API.
//! - [`LocalFile`]: a pre-exported JSON file on disk.
//!
//! There is no retry policy. Any failure is returned as a
//! [`LoadError`] and is fatal for the run.

pub mod local;
pub mod remote;

pub use fhtml_tree::{LoadError, RootSelector};
pub use local::LocalFile;
pub use remote::RemoteSource;

use fhtml_tree::Node;

/// Something that can produce the serialized design document.
pub trait SourceProvider {
    /// Human-readable name of the source, used in logs and errors.
    fn describe(&self) -> String;

    /// Obtain the raw JSON text. Called at most once per run.
    fn fetch(&self) -> Result<String, LoadError>;
}

/// Fetch the source description and decode the screen tree.
pub fn load(provider: &dyn SourceProvider, selector: &RootSelector) -> Result<Node, LoadError> {
    let source = provider.describe();
    tracing::info!(%source, "reading source description");

    let json = provider.fetch()?;
    tracing::debug!(%source, bytes = json.len(), "source description read");

    let root = fhtml_tree::decode_document_with(&json, selector)?;
    tracing::info!(screen = %root.name, nodes = root.count(), "decoded screen tree");
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Fixed(Result<String, LoadError>);

    impl SourceProvider for Fixed {
        fn describe(&self) -> String {
            "fixed".into()
        }

        fn fetch(&self) -> Result<String, LoadError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_load_decodes_tree() {
        let provider = Fixed(Ok(r#"{"id": "1:1", "name": "Screen", "type": "FRAME",
            "children": [{"id": "2:1", "type": "TEXT", "characters": "Hi"}]}"#
            .into()));
        let root = load(&provider, &RootSelector::Largest).unwrap();
        assert_eq!(root.name, "Screen");
        assert_eq!(root.count(), 2);
    }

    #[test]
    fn test_load_propagates_unavailable() {
        let err = LoadError::unavailable("fixed", "offline");
        let provider = Fixed(Err(err.clone()));
        assert_eq!(load(&provider, &RootSelector::Largest).unwrap_err(), err);
    }

    #[test]
    fn test_load_reports_malformed() {
        let provider = Fixed(Ok("{\"document\": 3}".into()));
        let err = load(&provider, &RootSelector::Largest).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { .. }));
    }
}
