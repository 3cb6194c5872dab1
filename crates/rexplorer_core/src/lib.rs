mod app_config;
mod error;
mod error_formatter;
mod explorer;
mod grouping;
mod key_value;
mod profile;
mod render;
mod task;

pub use app_config::{AppConfig, AppConfigStore, DEFAULT_FONT_SIZE, URL_ENV_VAR};
pub use error::ExplorerError;
pub use error_formatter::{
    ConnectionErrorFormatter, FormattedError, QueryErrorFormatter, sanitize_uri,
};
pub use explorer::Explorer;
pub use grouping::{DEFAULT_DELIMITER, KeyGroups, group_keys, prefix_of};
pub use key_value::{KeyValueStore, MATCH_ALL, decode_key};
pub use profile::{ConnectionProfile, DEFAULT_HOST, DEFAULT_PORT};
pub use render::{
    MarkupPalette, RenderedValue, Token, TokenKind, render_json, render_value,
};
pub use task::{CancelToken, RequestSlot};
