//! Library part of the pcikoll CLI, so that xtask can generate man pages and
//! completions from the argument definitions.

pub mod cli;
mod conversion;
