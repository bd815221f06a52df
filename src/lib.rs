//! Keyword-triggered card responder.
//!
//! Chat messages are scanned for trigger phrases from a prebuilt reverse index
//! (`trigger -> card ids`). The longest trigger contained in the message wins,
//! one of its cards is picked at random, and the matching `<card_dir>/<id>.png`
//! is handed back for sending.
//!
//! - [`card_dict`] / [`rev_index`]: offline card table and its inversion.
//! - [`matcher`]: longest-match-first dispatch, free of filesystem access.
//! - [`responder`]: config snapshot + dispatch + image existence check.
//! - [`api_routes`] / [`interactive_mode`]: HTTP and console front ends.

pub mod api_auth;
pub mod api_routes;
pub mod card_dict;
pub mod card_store;
pub mod config;
pub mod interactive_mode;
pub mod logging_setup;
pub mod matcher;
pub mod responder;
pub mod rev_index;

pub use card_dict::{load_forward_map, CardId, ForwardMap};
pub use card_store::CardStore;
pub use config::{AppSettings, ConfigStore, MatchConfig};
pub use matcher::{EmissionRequest, MatcherState};
pub use responder::{CardEmission, InboundMessage, Responder};
pub use rev_index::{IndexLoadError, ReverseIndex};
