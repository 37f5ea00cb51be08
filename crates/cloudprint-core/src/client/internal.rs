use crate::{ClientSettings, http::Dispatcher};

/// State shared by every clone of a [`Client`](crate::Client).
#[derive(Debug)]
pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    pub(crate) dispatcher: Dispatcher,
}

impl InternalClient {
    #[allow(missing_docs)]
    pub fn get_settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Dispatcher used for every authenticated API request.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
