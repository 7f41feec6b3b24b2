// word-utility: how strongly does a word signal a text category?
//
// This is the library root. The engine runs corpus -> frequency table ->
// scoring -> ranking; `analysis` orchestrates one request and reports
// progress to whichever host is driving it.

pub mod analysis;
pub mod config;
pub mod corpus;
pub mod error;
pub mod output;
pub mod ranking;
pub mod scoring;
pub mod status;
pub mod table;

#[cfg(feature = "web")]
pub mod web;
