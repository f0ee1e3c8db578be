pub mod api;
pub mod cli;
pub mod collection;
pub mod config;
pub mod error;
pub mod logging;
pub mod notice;
pub mod session;
pub mod sort;
pub mod types;

pub mod commands;

pub use api::{HttpClient, Operation, ShoppingApi};
pub use collection::{CollectionSnapshot, ListCollection, PollHandle};
pub use config::{ClearPolicy, Config};
pub use error::{Result, ShoplistError, TransportError};
pub use notice::{Notice, NoticeLevel};
pub use session::{BatchReport, ClearOutcome, ListSession, SessionOptions, SessionPhase};
pub use types::{Item, ItemDraft, List, Section};
