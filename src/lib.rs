#![warn(
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    rustdoc::missing_crate_level_docs,
    rust_2018_idioms,
    clippy::panic,
    clippy::map_err_ignore,
    clippy::missing_panics_doc,
    clippy::match_wildcard_for_single_variants,
    clippy::wildcard_in_or_patterns,
    clippy::default_trait_access,
    clippy::let_underscore_future,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::get_first,
    clippy::manual_split_once,
    clippy::manual_map,
    clippy::manual_async_fn,
    clippy::needless_pass_by_value,
    clippy::result_large_err,
    clippy::useless_let_if_seq,
    clippy::match_like_matches_macro,
    clippy::unimplemented,
    clippy::manual_ok_or,
    clippy::manual_unwrap_or
)]
#![allow(
    clippy::option_if_let_else,
    clippy::missing_const_for_fn,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions,
    clippy::missing_errors_doc,
    clippy::redundant_closure_for_method_calls
)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
mod stdx;

pub mod platform;
