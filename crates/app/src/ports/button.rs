//! Button cloud port.

use std::future::Future;

use heathub_domain::button::ButtonEdgePair;
use heathub_domain::error::HeatHubError;

/// Reads the wireless button's state from its cloud shadow.
pub trait ButtonCloud {
    /// Fetch the most recent up/down press edges.
    ///
    /// A document without the expected metadata fails with
    /// [`HeatHubError::DataShape`]; an edge the device never reported is
    /// returned as `None` instead.
    fn get_edges(&self) -> impl Future<Output = Result<ButtonEdgePair, HeatHubError>> + Send;
}

impl<T: ButtonCloud + Send + Sync> ButtonCloud for std::sync::Arc<T> {
    fn get_edges(&self) -> impl Future<Output = Result<ButtonEdgePair, HeatHubError>> + Send {
        (**self).get_edges()
    }
}
