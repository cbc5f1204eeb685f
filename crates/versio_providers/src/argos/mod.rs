//! Argos: installable phrase-table packages.
//!
//! A package translates one language pair. Installed packages live under
//! `<data_dir>/argos/packages/{from}-{to}/`:
//!
//! ```text
//! metadata.json   {"from_code": "en", "to_code": "de", "package_version": "1.0"}
//! phrases.tsv     source phrase<TAB>target phrase, one per line
//! ```
//!
//! Missing packages are installed on demand from a JSON index listing
//! `{from_code, to_code, package_version, links}` entries. Index refreshes are
//! best effort: a failed refresh is logged and the installed packages are
//! used as they are.

mod index;
mod phrase_table;
mod store;

pub use index::PackageEntry;
pub use phrase_table::PhraseTable;
pub use store::{ArgosStore, argos_id, package_dir_name};
