/// Use cases module containing application business logic orchestration
mod ingest_sboms;

pub use ingest_sboms::IngestSbomsUseCase;
