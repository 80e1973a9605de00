pub mod extract;
pub mod ingest;
pub mod storage;
