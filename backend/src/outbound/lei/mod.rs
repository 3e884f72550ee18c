//! LEI registry outbound adapter implementing `LeiRecordSource`.

mod dto;
mod http_source;

pub use http_source::LeiHttpSource;
