pub mod clients;
pub mod dtos;
pub mod services;

pub use clients::CatalogApi;
pub use dtos::{Bloc, Machine};
pub use services::{
    FetchedMachines, MachineFetchOutcome, PendingMachineFetch, SelectionCascade, SelectionState,
};
