//! Share requests.
//!
//! This crate does not talk to any clipboard or OS share service. A [`ShareRequest`] gathers
//! what the user wants to share and hands it to a [`ShareSink`] the app provides (an OSC 52
//! clipboard writer, a file, IPC, etc).

use log::debug;
use thiserror::Error;

use crate::ext::PushIfSome;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShareItem {
    Text(String),
    Url(String),
    Image(Vec<u8>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShareError {
    #[error("nothing to share")]
    NothingToShare,
    #[error("share rejected: {0}")]
    Rejected(String),
}

pub trait ShareSink {
    fn present(&mut self, items: Vec<ShareItem>) -> Result<(), ShareError>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShareRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    pub image: Option<Vec<u8>>,
}

impl ShareRequest {
    pub fn new(image: Option<Vec<u8>>, text: Option<String>, url: Option<String>) -> Self {
        Self { text, url, image }
    }

    /// Present items in share order: text, then url, then image.
    pub fn items(&self) -> Vec<ShareItem> {
        let mut items = Vec::new();
        items.push_if_some(self.text.clone().map(ShareItem::Text));
        items.push_if_some(self.url.clone().map(ShareItem::Url));
        items.push_if_some(self.image.clone().map(ShareItem::Image));
        items
    }

    /// Hands the items to `sink`. An empty request is never presented.
    pub fn share_with(&self, sink: &mut impl ShareSink) -> Result<(), ShareError> {
        let items = self.items();
        if items.is_empty() {
            return Err(ShareError::NothingToShare);
        }
        debug!("sharing {} item(s)", items.len());
        sink.present(items)
    }
}
