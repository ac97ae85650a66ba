//! Natural language processing components
//!
//! This module provides HTML stripping, stopword filtering, the text
//! normalizer (tokenize + lemmatize + filter), and the POS tagger seam.

pub mod html;
pub mod normalizer;
pub mod stopwords;
pub mod tagger;
