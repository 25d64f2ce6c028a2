mod selection_cascade;

pub use selection_cascade::{
    FetchedMachines, MachineFetchOutcome, PendingMachineFetch, SelectionCascade, SelectionState,
};
