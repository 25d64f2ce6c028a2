use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::services::SessionStore;
use crate::features::catalog::clients::CatalogApi;
use crate::features::catalog::dtos::{Bloc, Machine};

/// Bloc → machine selection of the anomaly form
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoBlocSelected,
    BlocSelected(Bloc),
    MachineSelected(Bloc, Machine),
}

impl SelectionState {
    pub fn bloc(&self) -> Option<&Bloc> {
        match self {
            SelectionState::NoBlocSelected => None,
            SelectionState::BlocSelected(bloc) | SelectionState::MachineSelected(bloc, _) => {
                Some(bloc)
            }
        }
    }

    pub fn machine(&self) -> Option<&Machine> {
        match self {
            SelectionState::MachineSelected(_, machine) => Some(machine),
            _ => None,
        }
    }
}

/// Machine fetch dispatched by `SelectionCascade::select_bloc`.
///
/// Runs without borrowing the cascade so the user can keep changing the
/// selection while it is in flight; the result goes back through
/// `SelectionCascade::apply`, which drops it if the bloc changed meanwhile.
pub struct PendingMachineFetch {
    generation: u64,
    bloc_id: i64,
    api: Arc<dyn CatalogApi>,
    session: SessionStore,
}

impl PendingMachineFetch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn bloc_id(&self) -> i64 {
        self.bloc_id
    }

    pub async fn run(self) -> FetchedMachines {
        let result = match self.session.require_token().await {
            Ok(token) => {
                let result = self.api.list_machines(&token, self.bloc_id).await;
                self.session.observe(&token, result).await
            }
            Err(e) => Err(e),
        };

        FetchedMachines {
            generation: self.generation,
            bloc_id: self.bloc_id,
            result,
        }
    }
}

/// Completed machine fetch, tagged with the selection it was issued for
#[derive(Debug)]
pub struct FetchedMachines {
    pub generation: u64,
    pub bloc_id: i64,
    pub result: Result<Vec<Machine>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineFetchOutcome {
    /// Machine list replaced with this many entries
    Applied(usize),
    /// Response belonged to a bloc that is no longer selected
    Stale,
}

/// Dependent bloc → machine selection.
///
/// Every `select_bloc` bumps a generation counter; only the response
/// carrying the latest generation may populate the machine list.
pub struct SelectionCascade {
    api: Arc<dyn CatalogApi>,
    session: SessionStore,
    blocs: Vec<Bloc>,
    state: SelectionState,
    machines: Vec<Machine>,
    generation: u64,
    pending: Option<u64>,
}

impl SelectionCascade {
    pub fn new(api: Arc<dyn CatalogApi>, session: SessionStore) -> Self {
        Self {
            api,
            session,
            blocs: Vec::new(),
            state: SelectionState::NoBlocSelected,
            machines: Vec::new(),
            generation: 0,
            pending: None,
        }
    }

    /// Fetch the bloc list offered by the first picker
    pub async fn load_blocs(&mut self) -> Result<&[Bloc]> {
        let token = self.session.require_token().await?;
        let result = self.api.list_blocs(&token).await;
        let blocs = self.session.observe(&token, result).await?;

        tracing::debug!("Loaded {} blocs", blocs.len());
        self.blocs = blocs;
        Ok(&self.blocs)
    }

    /// Select a bloc, discarding any machine choice, and hand back the
    /// machine fetch scoped to it
    pub fn select_bloc(&mut self, bloc: Bloc) -> PendingMachineFetch {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.machines.clear();

        tracing::debug!(
            "Bloc {} selected (generation {})",
            bloc.id,
            self.generation
        );

        let bloc_id = bloc.id;
        self.state = SelectionState::BlocSelected(bloc);

        PendingMachineFetch {
            generation: self.generation,
            bloc_id,
            api: Arc::clone(&self.api),
            session: self.session.clone(),
        }
    }

    /// Apply a finished machine fetch.
    ///
    /// A failure for the current bloc leaves the bloc selected with no
    /// machines and is returned to the caller; nothing is retried.
    pub fn apply(&mut self, fetched: FetchedMachines) -> Result<MachineFetchOutcome> {
        let current_bloc = self.state.bloc().map(|b| b.id);
        if self.pending != Some(fetched.generation) || current_bloc != Some(fetched.bloc_id) {
            tracing::warn!(
                "Discarding stale machine list for bloc {} (generation {}, current {})",
                fetched.bloc_id,
                fetched.generation,
                self.generation
            );
            return Ok(MachineFetchOutcome::Stale);
        }

        self.pending = None;

        match fetched.result {
            Ok(machines) => {
                let (machines, foreign): (Vec<Machine>, Vec<Machine>) = machines
                    .into_iter()
                    .partition(|m| m.bloc_id == fetched.bloc_id);
                if !foreign.is_empty() {
                    tracing::warn!(
                        "Ignoring {} machines not belonging to bloc {}",
                        foreign.len(),
                        fetched.bloc_id
                    );
                }

                self.machines = machines;
                Ok(MachineFetchOutcome::Applied(self.machines.len()))
            }
            Err(e) => {
                tracing::warn!("Machine fetch for bloc {} failed: {}", fetched.bloc_id, e);
                self.machines.clear();
                Err(e)
            }
        }
    }

    /// Select a bloc and wait for its machines
    pub async fn choose_bloc(&mut self, bloc: Bloc) -> Result<&[Machine]> {
        let fetched = self.select_bloc(bloc).run().await;
        self.apply(fetched)?;
        Ok(&self.machines)
    }

    /// Select a machine from the list fetched for the current bloc
    pub fn select_machine(&mut self, machine: &Machine) -> Result<()> {
        let bloc = self
            .state
            .bloc()
            .cloned()
            .ok_or_else(|| AppError::validation(["bloc"]))?;

        if self.pending.is_some() {
            tracing::debug!("Machine selection refused while machines are loading");
            return Err(AppError::validation(["machine"]));
        }

        if machine.bloc_id != bloc.id || !self.machines.iter().any(|m| m.id == machine.id) {
            tracing::debug!(
                "Machine {} (bloc {}) is not offered for bloc {}",
                machine.id,
                machine.bloc_id,
                bloc.id
            );
            return Err(AppError::validation(["machine"]));
        }

        self.state = SelectionState::MachineSelected(bloc, machine.clone());
        Ok(())
    }

    /// Back to an empty selection; any fetch still in flight becomes stale
    pub fn reset(&mut self) {
        self.generation += 1;
        self.pending = None;
        self.machines.clear();
        self.state = SelectionState::NoBlocSelected;
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn blocs(&self) -> &[Bloc] {
        &self.blocs
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn selected_bloc(&self) -> Option<&Bloc> {
        self.state.bloc()
    }

    pub fn selected_machine(&self) -> Option<&Machine> {
        self.state.machine()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_select_machine(&self) -> bool {
        self.state.bloc().is_some() && !self.is_loading()
    }
}
