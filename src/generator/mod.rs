//! Output generation helpers for the downstream artifact writer.

pub mod redirect_page;

pub use redirect_page::page_for_rule;
