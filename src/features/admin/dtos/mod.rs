mod admin_dtos;

pub(crate) use admin_dtos::clean_optional;
pub use admin_dtos::{CreateUserRequestDto, NewBlocDto, NewMachineDto, UserSummaryDto};
