use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::core::error::{AppError, Result};
use crate::features::admin::clients::AdminApi;
use crate::features::admin::dtos::{
    CreateUserRequestDto, NewBlocDto, NewMachineDto, UserSummaryDto,
};
use crate::features::anomalies::clients::AnomalyApi;
use crate::features::anomalies::dtos::{Anomaly, AnomalyId, AnomalyStatus, AnomalySubmission};
use crate::features::auth::clients::AuthApi;
use crate::features::auth::dtos::{
    MessageResponseDto, SignInRequestDto, SignInResponseDto, SignUpRequestDto,
};
use crate::features::auth::model::{Role, Session};
use crate::features::catalog::clients::CatalogApi;
use crate::features::catalog::dtos::{Bloc, Machine};

// =============================================================================
// FIXTURES
// =============================================================================

pub fn operator_session() -> Session {
    Session::new("operator-jwt", 2, "operateur", vec![Role::Operator])
}

pub fn admin_session() -> Session {
    Session::new("admin-jwt", 1, "admin", vec![Role::Admin])
}

pub fn sign_in_response(username: &str, roles: &[&str]) -> SignInResponseDto {
    SignInResponseDto {
        token: format!("{}-jwt", username),
        token_type: Some("Bearer".to_string()),
        id: 42,
        username: username.to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

pub fn sample_bloc(id: i64, name: &str) -> Bloc {
    Bloc {
        id,
        name: name.to_string(),
        description: None,
    }
}

pub fn sample_machine(id: i64, name: &str, bloc_id: i64) -> Machine {
    Machine {
        id,
        name: name.to_string(),
        bloc_id,
        description: None,
    }
}

pub fn sample_anomaly(id: &str, title: &str) -> Anomaly {
    Anomaly {
        id: AnomalyId::from(id),
        title: title.to_string(),
        description: None,
        status: AnomalyStatus::Todo,
        photo_url: None,
        machine: None,
        assigned_to: None,
        assignment_date: None,
        created_at: None,
        updated_at: None,
    }
}

// =============================================================================
// SCRIPTED BACKEND
// =============================================================================

/// In-memory backend implementing every API trait.
///
/// One-shot calls pop scripted results in order; listings return the last
/// value set. Anything unscripted fails with a `Network` error.
#[derive(Default)]
pub struct MockApi {
    sign_in_results: Mutex<VecDeque<Result<SignInResponseDto>>>,
    sign_up_results: Mutex<VecDeque<Result<MessageResponseDto>>>,
    blocs: Mutex<Option<Result<Vec<Bloc>>>>,
    machines: Mutex<HashMap<i64, Result<Vec<Machine>>>>,
    create_results: Mutex<VecDeque<Result<Anomaly>>>,
    unassigned: Mutex<Option<Result<Vec<Anomaly>>>>,
    assign_results: Mutex<VecDeque<Result<Anomaly>>>,
    create_user_results: Mutex<VecDeque<Result<String>>>,
    create_bloc_results: Mutex<VecDeque<Result<Bloc>>>,
    create_machine_results: Mutex<VecDeque<Result<Machine>>>,
    users: Mutex<Option<Result<Vec<UserSummaryDto>>>>,

    sign_ups: Mutex<Vec<SignUpRequestDto>>,
    submissions: Mutex<Vec<AnomalySubmission>>,
    created_users: Mutex<Vec<CreateUserRequestDto>>,
    created_blocs: Mutex<Vec<NewBlocDto>>,
    created_machines: Mutex<Vec<(i64, NewMachineDto)>>,

    sign_in_calls: AtomicUsize,
    list_machines_calls: AtomicUsize,
    list_unassigned_calls: AtomicUsize,
}

fn unscripted<T>(operation: &str) -> Result<T> {
    Err(AppError::Network(format!("{} not scripted", operation)))
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T>>>, operation: &str) -> Result<T> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| unscripted(operation))
}

fn current<T: Clone>(slot: &Mutex<Option<Result<T>>>, operation: &str) -> Result<T> {
    slot.lock()
        .unwrap()
        .clone()
        .unwrap_or_else(|| unscripted(operation))
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sign_in(&self, result: Result<SignInResponseDto>) {
        self.sign_in_results.lock().unwrap().push_back(result);
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_calls.load(Ordering::SeqCst)
    }

    pub fn push_sign_up(&self, result: Result<MessageResponseDto>) {
        self.sign_up_results.lock().unwrap().push_back(result);
    }

    pub fn sign_ups(&self) -> Vec<SignUpRequestDto> {
        self.sign_ups.lock().unwrap().clone()
    }

    pub fn set_blocs(&self, result: Result<Vec<Bloc>>) {
        *self.blocs.lock().unwrap() = Some(result);
    }

    pub fn set_machines(&self, bloc_id: i64, result: Result<Vec<Machine>>) {
        self.machines.lock().unwrap().insert(bloc_id, result);
    }

    pub fn list_machines_calls(&self) -> usize {
        self.list_machines_calls.load(Ordering::SeqCst)
    }

    pub fn push_create(&self, result: Result<Anomaly>) {
        self.create_results.lock().unwrap().push_back(result);
    }

    pub fn submissions(&self) -> Vec<AnomalySubmission> {
        self.submissions.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn set_unassigned(&self, result: Result<Vec<Anomaly>>) {
        *self.unassigned.lock().unwrap() = Some(result);
    }

    pub fn list_unassigned_calls(&self) -> usize {
        self.list_unassigned_calls.load(Ordering::SeqCst)
    }

    pub fn push_assign(&self, result: Result<Anomaly>) {
        self.assign_results.lock().unwrap().push_back(result);
    }

    pub fn push_create_user(&self, result: Result<String>) {
        self.create_user_results.lock().unwrap().push_back(result);
    }

    pub fn created_users(&self) -> Vec<CreateUserRequestDto> {
        self.created_users.lock().unwrap().clone()
    }

    pub fn push_create_bloc(&self, result: Result<Bloc>) {
        self.create_bloc_results.lock().unwrap().push_back(result);
    }

    pub fn created_blocs(&self) -> Vec<NewBlocDto> {
        self.created_blocs.lock().unwrap().clone()
    }

    pub fn push_create_machine(&self, result: Result<Machine>) {
        self.create_machine_results.lock().unwrap().push_back(result);
    }

    pub fn created_machines(&self) -> Vec<(i64, NewMachineDto)> {
        self.created_machines.lock().unwrap().clone()
    }

    pub fn set_users(&self, result: Result<Vec<UserSummaryDto>>) {
        *self.users.lock().unwrap() = Some(result);
    }
}

#[async_trait]
impl AuthApi for MockApi {
    async fn sign_in(&self, _request: &SignInRequestDto) -> Result<SignInResponseDto> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        pop(&self.sign_in_results, "sign in")
    }

    async fn sign_up(&self, request: &SignUpRequestDto) -> Result<MessageResponseDto> {
        self.sign_ups.lock().unwrap().push(request.clone());
        pop(&self.sign_up_results, "sign up")
    }
}

#[async_trait]
impl CatalogApi for MockApi {
    async fn list_blocs(&self, _token: &str) -> Result<Vec<Bloc>> {
        current(&self.blocs, "list blocs")
    }

    async fn list_machines(&self, _token: &str, bloc_id: i64) -> Result<Vec<Machine>> {
        self.list_machines_calls.fetch_add(1, Ordering::SeqCst);
        self.machines
            .lock()
            .unwrap()
            .get(&bloc_id)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

#[async_trait]
impl AnomalyApi for MockApi {
    async fn create_anomaly(&self, _token: &str, submission: &AnomalySubmission) -> Result<Anomaly> {
        self.submissions.lock().unwrap().push(submission.clone());
        pop(&self.create_results, "create anomaly")
    }

    async fn list_unassigned(&self, _token: &str) -> Result<Vec<Anomaly>> {
        self.list_unassigned_calls.fetch_add(1, Ordering::SeqCst);
        current(&self.unassigned, "list unassigned")
    }

    async fn assign_to_me(&self, _token: &str, _id: &AnomalyId) -> Result<Anomaly> {
        pop(&self.assign_results, "assign anomaly")
    }
}

#[async_trait]
impl AdminApi for MockApi {
    async fn create_user(&self, _token: &str, request: &CreateUserRequestDto) -> Result<String> {
        self.created_users.lock().unwrap().push(request.clone());
        pop(&self.create_user_results, "create user")
    }

    async fn list_users(&self, _token: &str) -> Result<Vec<UserSummaryDto>> {
        current(&self.users, "list users")
    }

    async fn create_bloc(&self, _token: &str, request: &NewBlocDto) -> Result<Bloc> {
        self.created_blocs.lock().unwrap().push(request.clone());
        pop(&self.create_bloc_results, "create bloc")
    }

    async fn create_machine(
        &self,
        _token: &str,
        bloc_id: i64,
        request: &NewMachineDto,
    ) -> Result<Machine> {
        self.created_machines
            .lock()
            .unwrap()
            .push((bloc_id, request.clone()));
        pop(&self.create_machine_results, "create machine")
    }
}
