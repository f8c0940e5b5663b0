//! drugscope-ingestion — Drug/target/keyword aggregation pipeline.
//! Three sequential stages plus a serializer:
//! - Drug catalog fetch (ChEMBL, approved molecules)
//! - Target resolution (mechanisms → single-protein targets → accessions)
//! - Keyword enrichment (UniProtKB keywords per accession)
//! - Output document assembly and write

pub mod models;
pub mod output;
pub mod pacing;
pub mod pipeline;
pub mod progress;
pub mod sources;
