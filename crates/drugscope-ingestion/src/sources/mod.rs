//! External data service clients.

pub mod chembl;
pub mod uniprot;
