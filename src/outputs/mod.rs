//! Destinations for collected courses.
//!
//! # Submodules
//!
//! - [`csv`]: Writes one timestamped CSV file per platform run
//! - [`sheets`]: Replaces a platform's tab in a Google Sheets spreadsheet
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! ├── ciee_20250506_140309.csv
//! ├── gov_br_20250506_140311.csv
//! └── senai_20250506_140315.csv
//!
//! spreadsheet
//! ├── CIEE            # Nome do Curso | Área de Conhecimento | ... | Data de Coleta
//! ├── Gov.br
//! └── SENAI
//! ```

pub mod csv;
pub mod sheets;
